use serde::Serialize;
use serde_json::{Map, Value};

use crate::form::FormSubmission;
use crate::sink::Record;

/// Most records the store accepts in a single create call.
pub const MAX_RECORDS: usize = 10;

/// The standard request body: `{"records":[{"fields":{...}}]}`.
///
/// Step-2 clients historically posted the bare field map; `from_json` accepts
/// that shape too and wraps it as a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordEnvelope {
    pub records: Vec<Record>,
}

impl RecordEnvelope {
    pub fn single(fields: Map<String, Value>) -> Self {
        Self {
            records: vec![Record { fields }],
        }
    }

    pub fn from_submission(submission: &FormSubmission) -> Self {
        Self::single(submission.to_json())
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, String> {
        let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?;
        Self::from_json(value)
    }

    pub fn from_json(value: Value) -> Result<Self, String> {
        let Value::Object(mut obj) = value else {
            return Err("Expected a JSON object".to_string());
        };

        let records = match obj.remove("records") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(mut record) => match record.remove("fields") {
                        Some(Value::Object(fields)) => Ok(Record { fields }),
                        _ => Err("Each record needs a \"fields\" object".to_string()),
                    },
                    _ => Err("Each record must be an object".to_string()),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err("\"records\" must be an array".to_string()),
            None => vec![Record { fields: obj }],
        };

        if records.is_empty() || records.iter().any(|r| r.fields.is_empty()) {
            return Err("Submission has no fields".to_string());
        }
        if records.len() > MAX_RECORDS {
            return Err(format!("At most {MAX_RECORDS} records per submission"));
        }

        Ok(Self { records })
    }

    /// The applicant email of the first record, used for duplicate detection.
    pub fn email(&self) -> Option<&str> {
        self.records
            .first()
            .and_then(|r| r.fields.get("Email"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
