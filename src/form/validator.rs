use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::Serialize;

use super::schema::{FieldDefinition, FieldKind};
use super::value::{FieldValue, FormSubmission};
use super::FormDefinition;

const INVALID_OPTION: &str = "Opção inválida";
const INVALID_URL: &str = "URL inválida";
const INVALID_EMAIL: &str = "Email inválido";
const INVALID_NUMBER: &str = "Informe um número válido";
const INVALID_TEXT: &str = "Valor inválido";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Per-field error messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Full validation of a submission against a form. Hidden conditional fields are skipped.
pub fn validate(definition: &FormDefinition, submission: &FormSubmission) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    for field in definition.fields {
        if !definition.is_visible(field, submission) {
            continue;
        }
        if let Err(msg) = validate_field(field, submission.get(field.name)) {
            errors.insert(field.name, msg);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate one field in isolation, for re-validation as the user edits.
pub fn validate_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Result<(), String> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ if field.required => return Err(field.required_message.to_string()),
        _ => return Ok(()),
    };

    match field.kind {
        FieldKind::Text | FieldKind::LongText => match value {
            FieldValue::Text(_) => Ok(()),
            _ => Err(INVALID_TEXT.to_string()),
        },
        FieldKind::Email => match value.as_text() {
            Some(s) if is_email(s.trim()) => Ok(()),
            _ => Err(INVALID_EMAIL.to_string()),
        },
        FieldKind::Url => match value.as_text() {
            Some(s) if is_absolute_url(s.trim()) => Ok(()),
            _ => Err(INVALID_URL.to_string()),
        },
        FieldKind::Number { min, max } => {
            let n = match value {
                FieldValue::Number(n) => *n,
                FieldValue::Text(s) => s.trim().parse().map_err(|_| INVALID_NUMBER.to_string())?,
                FieldValue::Set(_) => return Err(INVALID_NUMBER.to_string()),
            };
            let (min, max) = (min.resolve(), max.resolve());
            if n < min {
                Err(format!("Informe um valor maior ou igual a {min}"))
            } else if n > max {
                Err(format!("Informe um valor menor ou igual a {max}"))
            } else {
                Ok(())
            }
        }
        FieldKind::SingleChoice { choices, .. } => match value.as_text() {
            Some(code) if choices.iter().any(|c| c.code == code) => Ok(()),
            _ => Err(INVALID_OPTION.to_string()),
        },
        FieldKind::MultiChoice { options } => match value {
            FieldValue::Set(items) if items.iter().all(|i| options.contains(&i.as_str())) => Ok(()),
            _ => Err(INVALID_OPTION.to_string()),
        },
    }
}

fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

/// Absolute http(s) URL with a host, written out with its `//` authority marker.
fn is_absolute_url(s: &str) -> bool {
    let Ok(url) = Url::parse(s) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| !h.is_empty())
        && s[url.scheme().len()..].starts_with("://")
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::form::definitions::{self, STEP_ONE, STEP_TWO};

    fn valid_step_one() -> FormSubmission {
        FormSubmission::new()
            .with("Email", "a@b.com")
            .with("Nome Social", "Ana")
            .with("Tipo de Roteirista", "Individual")
            .with("Ano de Nascimento", 1990_i64)
            .with("Raça/Etnia", "Pardo")
            .with("Gênero e Orientação Sexual", "nao_binario")
            .with("PCD", "Não")
            .with("Região", "Norte")
            .with("Formação Acadêmica", "Cinema")
            .with("Cursos e Certificados", "Oficina de roteiro")
            .with("Nível de Experiência", "Iniciante")
            .with("ODS Identificação", vec!["Vida na Água"])
            .with("ODS Projetos", vec!["Vida Terrestre"])
            .with("Motivação Para Participar", vec![definitions::MOTIVATION_OPTIONS[2]])
    }

    fn valid_step_two() -> FormSubmission {
        FormSubmission::new()
            .with("Email", "a@b.com")
            .with("Experiência Roteiro", "Curtas")
            .with("Experiência Núcleos", "Nenhuma")
            .with("Projetos Pessoais", "Um longa")
            .with("Experiência Pesquisa", "Mestrado")
            .with("ODS Identificação", vec!["Educação de Qualidade"])
            .with("Identificação ODS Razão", "Sou professora")
            .with("ODS Projetos", vec!["Educação de Qualidade"])
            .with("Projetos ODS Relação", "Histórias de escola")
    }

    #[test]
    fn valid_submissions_pass() {
        assert_eq!(validate(&STEP_ONE, &valid_step_one()), Ok(()));
        assert_eq!(validate(&STEP_TWO, &valid_step_two()), Ok(()));
    }

    #[test]
    fn each_required_field_is_named_when_empty() {
        let forms: [(&FormDefinition, FormSubmission); 2] =
            [(&STEP_ONE, valid_step_one()), (&STEP_TWO, valid_step_two())];

        for (definition, valid) in forms {
            for field in definition.fields.iter().filter(|f| f.required) {
                let mut form = valid.clone();
                let blank = if field.is_multi() {
                    FieldValue::Set(vec![])
                } else {
                    FieldValue::Text("   ".into())
                };
                form.insert(field.name, blank);

                let errors = validate(definition, &form).unwrap_err();
                assert_eq!(errors.get(field.name), Some(field.required_message));
                assert_eq!(errors.len(), 1, "only {} should fail", field.name);

                form.insert(field.name, valid.get(field.name).unwrap().clone());
                assert_eq!(validate(definition, &form), Ok(()), "{} restored", field.name);
            }
        }
    }

    #[test]
    fn missing_required_field_uses_its_message() {
        let mut form = valid_step_one();
        form.remove("Nome Social");
        let errors = validate(&STEP_ONE, &form).unwrap_err();
        assert_eq!(errors.get("Nome Social"), Some("Nome social é obrigatório"));
    }

    #[test]
    fn email_syntax() {
        let field = STEP_ONE.field("Email").unwrap();
        assert!(validate_field(field, Some(&"a@b.com".into())).is_ok());
        assert_eq!(
            validate_field(field, Some(&"not-an-email".into())),
            Err("Email inválido".to_string())
        );
        assert!(validate_field(field, Some(&"a..b@c.com".into())).is_err());
        assert!(validate_field(field, Some(&"a@b".into())).is_err());
    }

    #[test]
    fn optional_url() {
        let field = STEP_TWO.field("PortfolioLattes").unwrap();
        assert!(validate_field(field, None).is_ok());
        assert!(validate_field(field, Some(&"".into())).is_ok());
        assert!(validate_field(field, Some(&"https://example.com".into())).is_ok());
        assert_eq!(
            validate_field(field, Some(&"ftp:/bad".into())),
            Err("URL inválida".to_string())
        );
        assert!(validate_field(field, Some(&"example.com".into())).is_err());
    }

    #[test]
    fn birth_year_range() {
        let field = STEP_ONE.field("Ano de Nascimento").unwrap();
        let next_year = i64::from(chrono::Utc::now().year()) + 1;
        assert!(validate_field(field, Some(&FieldValue::Number(1990))).is_ok());
        assert!(validate_field(field, Some(&FieldValue::Number(1900))).is_ok());
        assert!(validate_field(field, Some(&FieldValue::Number(1899))).is_err());
        assert!(validate_field(field, Some(&FieldValue::Number(next_year))).is_err());
        assert!(validate_field(field, Some(&FieldValue::Number(next_year - 1))).is_ok());
        assert_eq!(
            validate_field(field, Some(&"mil".into())),
            Err(INVALID_NUMBER.to_string())
        );
    }

    #[test]
    fn ods_selection() {
        let field = STEP_TWO.field("ODS Identificação").unwrap();
        assert_eq!(
            validate_field(field, Some(&FieldValue::Set(vec![]))),
            Err("Selecione pelo menos um ODS".to_string())
        );
        assert!(validate_field(field, Some(&vec!["Vida na Água"].into())).is_ok());
        assert!(validate_field(field, Some(&vec!["Vida em Marte"].into())).is_err());
    }

    #[test]
    fn single_choice_rejects_unknown_code() {
        let mut form = valid_step_one();
        form.insert("Região", "Litoral");
        let errors = validate(&STEP_ONE, &form).unwrap_err();
        assert_eq!(errors.get("Região"), Some(INVALID_OPTION));
    }

    #[test]
    fn hidden_subfield_is_not_validated() {
        let mut form = valid_step_one();
        form.insert("Raça/Etnia (Especifique)", 12_i64);
        assert!(validate(&STEP_ONE, &form).is_ok());

        form.insert("Raça/Etnia", "Outro");
        let errors = validate(&STEP_ONE, &form).unwrap_err();
        assert!(errors.contains("Raça/Etnia (Especifique)"));
    }
}
