use super::definitions::{ETHNICITY, ETHNICITY_OTHER, GENDER, GENDER_OTHER, REGION};
use super::value::{FieldValue, FormSubmission};
use super::FormStep;

/// Code → label table for one enumerated field, as stored in the record sink.
pub struct LabelTable {
    pub field: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

pub const GENDER_LABELS: LabelTable = LabelTable {
    field: GENDER,
    entries: &[
        ("homem_cis_hetero", "Homem Cisgênero Heterossexual"),
        ("mulher_cis_hetero", "Mulher Cisgênero Heterossexual"),
        ("homem_cis_lgbtqia", "Homem Cisgênero LGBTQIA+"),
        ("mulher_cis_lgbtqia", "Mulher Cisgênero LGBTQIA+"),
        ("homem_trans_hetero", "Homem Trans Heterossexual"),
        ("mulher_trans_hetero", "Mulher Trans Heterossexual"),
        ("homem_trans_lgbtqia", "Homem Trans LGBTQIA+"),
        ("mulher_trans_lgbtqia", "Mulher Trans LGBTQIA+"),
        ("nao_binario", "Não Binário"),
        ("outro", "Outro"),
    ],
};

pub const REGION_LABELS: LabelTable = LabelTable {
    field: REGION,
    entries: &[
        ("Norte", "Norte"),
        ("Noroeste", "Noroeste"),
        ("Oeste", "Oeste"),
        ("Sudoeste", "Sudoeste"),
        ("Centro-Sul", "Centro-Sul"),
        ("Centro-Oriental", "Centro-Oriental"),
        ("Metropolitana-de-Curitiba", "Metropolitana de Curitiba"),
        ("Centro-Ocidental", "Centro-Ocidental"),
        ("Sudeste", "Sudeste"),
        ("Nao-mora", "Não moro no Paraná (eliminatória)"),
    ],
};

/// A free-text companion that only carries meaning while its parent holds `other_code`.
struct Companion {
    parent: &'static str,
    other_code: &'static str,
    field: &'static str,
}

const COMPANIONS: &[Companion] = &[
    Companion { parent: GENDER, other_code: "outro", field: GENDER_OTHER },
    Companion { parent: ETHNICITY, other_code: "Outro", field: ETHNICITY_OTHER },
];

impl LabelTable {
    /// Label for `code`; unknown codes pass through unchanged so table drift never blocks a submission.
    pub fn display_label<'a>(&self, code: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }
}

const STEP_ONE_TABLES: &[&LabelTable] = &[&GENDER_LABELS, &REGION_LABELS];

pub fn tables_for(step: FormStep) -> &'static [&'static LabelTable] {
    match step {
        FormStep::One => STEP_ONE_TABLES,
        FormStep::Two => &[],
    }
}

/// Shape a validated submission for the store: only declared fields, numbers as
/// numbers, enumerated codes as display labels, no orphaned "specify" companions.
pub fn map_submission(step: FormStep, submission: &FormSubmission) -> FormSubmission {
    let definition = step.definition();
    let mut mapped = FormSubmission::new();

    for (name, value) in submission.iter() {
        let Some(field) = definition.field(name) else {
            continue;
        };
        let value = match value {
            FieldValue::Text(s) if field.is_number() => match s.trim().parse::<i64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => value.clone(),
            },
            _ => value.clone(),
        };
        mapped.insert(field.name, value);
    }

    for companion in COMPANIONS {
        if !mapped.contains(companion.field) {
            continue;
        }
        let parent_is_other = mapped.text(companion.parent) == Some(companion.other_code);
        let blank = mapped.get(companion.field).is_none_or(FieldValue::is_blank);
        if !parent_is_other || blank {
            mapped.remove(companion.field);
        }
    }

    for table in tables_for(step) {
        if let Some(code) = mapped.text(table.field) {
            let label = table.display_label(code).to_string();
            mapped.insert(table.field, label);
        }
    }

    mapped
}
