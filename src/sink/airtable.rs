use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use super::{Record, RecordSink, SinkError};
use crate::config::AirtableConfig;

pub struct AirtableSink {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    base_id: Option<String>,
}

#[derive(Deserialize)]
struct CreateResponse {
    records: Vec<CreatedRecord>,
}

#[derive(Deserialize)]
struct CreatedRecord {
    id: String,
}

impl AirtableSink {
    pub fn new(config: &AirtableConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build Airtable client: {e}"))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            base_id: config.base_id.clone(),
        })
    }

    fn table_url(&self, base_id: &str, table: &str) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SinkError::Transport(format!("invalid API url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SinkError::Transport("API url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(base_id)
            .push(table);
        Ok(url)
    }
}

#[async_trait]
impl RecordSink for AirtableSink {
    fn name(&self) -> &str {
        "airtable"
    }

    async fn create_records(&self, table: &str, records: &[Record]) -> Result<Vec<String>, SinkError> {
        let (Some(token), Some(base_id)) = (self.api_token.as_deref(), self.base_id.as_deref()) else {
            return Err(SinkError::NotConfigured);
        };

        let url = self.table_url(base_id, table)?;

        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "records": records }))
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx means the records exist; an unreadable body only costs us the ids.
        match resp.json::<CreateResponse>().await {
            Ok(created) => Ok(created.records.into_iter().map(|r| r.id).collect()),
            Err(e) => {
                tracing::warn!("Airtable created records in {table} but the response was unreadable: {e}");
                Ok(Vec::new())
            }
        }
    }
}
