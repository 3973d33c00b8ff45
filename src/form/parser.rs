use super::value::{FieldValue, FormSubmission};
use super::FormDefinition;

/// Decode an `application/x-www-form-urlencoded` page post into a submission.
///
/// Repeated keys of multi-choice fields accumulate into a set, numeric fields are
/// parsed when they can be, and keys the form does not declare are dropped.
pub fn parse_form_urlencoded(definition: &FormDefinition, body: &[u8]) -> FormSubmission {
    let mut submission = FormSubmission::new();

    for (key, value) in form_urlencoded::parse(body) {
        let Some(field) = definition.field(&key) else {
            continue;
        };

        if field.is_multi() {
            let mut items = match submission.remove(field.name) {
                Some(FieldValue::Set(items)) => items,
                _ => Vec::new(),
            };
            if !value.is_empty() {
                items.push(value.into_owned());
            }
            submission.insert(field.name, items);
        } else if field.is_number() {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.parse::<i64>() {
                Ok(n) => submission.insert(field.name, n),
                Err(_) => submission.insert(field.name, trimmed),
            }
        } else {
            submission.insert(field.name, value.into_owned());
        }
    }

    submission
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::definitions::STEP_ONE;

    #[test]
    fn repeated_keys_become_a_set() {
        let body = "ODS+Identifica%C3%A7%C3%A3o=Vida+na+%C3%81gua&ODS+Identifica%C3%A7%C3%A3o=Vida+Terrestre";
        let form = parse_form_urlencoded(&STEP_ONE, body.as_bytes());
        assert_eq!(
            form.get("ODS Identificação"),
            Some(&FieldValue::Set(vec!["Vida na Água".into(), "Vida Terrestre".into()]))
        );
    }

    #[test]
    fn numbers_and_unknown_keys() {
        let body = "Ano+de+Nascimento=1990&Email=a%40b.com&csrf=x";
        let form = parse_form_urlencoded(&STEP_ONE, body.as_bytes());
        assert_eq!(form.get("Ano de Nascimento"), Some(&FieldValue::Number(1990)));
        assert_eq!(form.text("Email"), Some("a@b.com"));
        assert!(!form.contains("csrf"));
    }

    #[test]
    fn unparsable_number_is_kept_as_text() {
        let form = parse_form_urlencoded(&STEP_ONE, b"Ano+de+Nascimento=abc");
        assert_eq!(form.text("Ano de Nascimento"), Some("abc"));

        let form = parse_form_urlencoded(&STEP_ONE, b"Ano+de+Nascimento=");
        assert!(!form.contains("Ano de Nascimento"));
    }
}
