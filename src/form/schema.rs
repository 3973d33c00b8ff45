use chrono::Datelike;

/// One entry of a closed choice set: the code that is submitted and the label shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(code: &'static str, label: &'static str) -> Self {
        Self { code, label }
    }

    /// A choice whose code doubles as its label.
    pub const fn plain(code: &'static str) -> Self {
        Self { code, label: code }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Fixed(i64),
    CurrentYear,
}

impl Bound {
    pub fn resolve(self) -> i64 {
        match self {
            Bound::Fixed(n) => n,
            Bound::CurrentYear => i64::from(chrono::Utc::now().year()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChoiceWidget {
    Radio,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Url,
    Number { min: Bound, max: Bound },
    SingleChoice { choices: &'static [Choice], widget: ChoiceWidget },
    MultiChoice { options: &'static [&'static str] },
}

/// Shows a field only while another field holds a given code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub field: &'static str,
    pub equals: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub required_message: &'static str,
    pub placeholder: &'static str,
    pub section: Option<&'static str>,
    pub shown_when: Option<Condition>,
}

impl FieldDefinition {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            required_message: "",
            placeholder: "",
            section: None,
            shown_when: None,
        }
    }

    pub const fn required(mut self, message: &'static str) -> Self {
        self.required = true;
        self.required_message = message;
        self
    }

    pub const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = text;
        self
    }

    /// Starts a new titled section with this field.
    pub const fn section(mut self, title: &'static str) -> Self {
        self.section = Some(title);
        self
    }

    pub const fn shown_when(mut self, field: &'static str, equals: &'static str) -> Self {
        self.shown_when = Some(Condition { field, equals });
        self
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.kind, FieldKind::MultiChoice { .. })
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind, FieldKind::Number { .. })
    }
}
