pub mod airtable;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use airtable::AirtableSink;

/// One record as accepted by the store: a flat map of field name → value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Map<String, Value>,
}

#[derive(Debug)]
pub enum SinkError {
    NotConfigured,
    Transport(String),
    Status { status: u16, body: String },
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::NotConfigured => write!(f, "record sink credentials are not configured"),
            SinkError::Transport(msg) => write!(f, "request to record sink failed: {msg}"),
            SinkError::Status { status, body } => {
                write!(f, "record sink answered {status}: {body}")
            }
        }
    }
}

impl std::error::Error for SinkError {}

/// The external store. One call creates every record of one submission.
#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    /// Create `records` in `table`, returning the ids the store assigned.
    async fn create_records(&self, table: &str, records: &[Record]) -> Result<Vec<String>, SinkError>;
}
