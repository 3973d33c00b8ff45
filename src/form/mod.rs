pub mod definitions;
pub mod mapper;
pub mod parser;
pub mod schema;
pub mod validator;
pub mod value;

use serde::{Deserialize, Serialize};

pub use schema::{Bound, Choice, ChoiceWidget, Condition, FieldDefinition, FieldKind};
pub use validator::{FieldErrors, validate, validate_field};
pub use value::{FieldValue, FormSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStep {
    One,
    Two,
}

impl FormStep {
    pub fn as_str(self) -> &'static str {
        match self {
            FormStep::One => "step1",
            FormStep::Two => "step2",
        }
    }

    /// Path segment of the rendered page.
    pub fn slug(self) -> &'static str {
        match self {
            FormStep::One => "etapa-1",
            FormStep::Two => "etapa-2",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "etapa-1" => Some(FormStep::One),
            "etapa-2" => Some(FormStep::Two),
            _ => None,
        }
    }

    /// Submit API path for this step.
    pub fn endpoint(self) -> &'static str {
        match self {
            FormStep::One => "/api/submit-form",
            FormStep::Two => "/api/submit-form-step2",
        }
    }

    pub fn definition(self) -> &'static FormDefinition {
        match self {
            FormStep::One => &definitions::STEP_ONE,
            FormStep::Two => &definitions::STEP_TWO,
        }
    }
}

impl std::fmt::Display for FormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The field set of one form variant. Both steps share the same engine.
#[derive(Debug)]
pub struct FormDefinition {
    pub step: FormStep,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl FormDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Conditional sub-fields are visible only while their parent holds the trigger code.
    pub fn is_visible(&self, field: &FieldDefinition, submission: &FormSubmission) -> bool {
        match field.shown_when {
            None => true,
            Some(cond) => submission.text(cond.field) == Some(cond.equals),
        }
    }
}
