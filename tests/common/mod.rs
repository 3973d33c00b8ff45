#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use papoula_intake::config::{AirtableConfig, Config, LimitsConfig};
use papoula_intake::form::FormSubmission;
use papoula_intake::form::definitions::{
    BIRTH_YEAR, EMAIL, ETHNICITY, GENDER, ODS_IDENTIFICATION, ODS_OPTIONS, ODS_PROJECTS, PORTFOLIO,
    REGION,
};
use papoula_intake::sink::{Record, RecordSink, SinkError};
use papoula_intake::state::SharedState;

/// In-memory store that remembers every create call.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(String, Vec<Record>)>>,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<(String, Vec<Record>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Make subsequent create calls answer like a store returning 422.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn create_records(&self, table: &str, records: &[Record]) -> Result<Vec<String>, SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Status {
                status: 422,
                body: r#"{"error":{"type":"INVALID_VALUE_FOR_COLUMN"}}"#.to_string(),
            });
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push((table.to_string(), records.to_vec()));
        Ok((0..records.len())
            .map(|i| format!("rec{}{i}", calls.len()))
            .collect())
    }
}

/// A running test server backed by a `RecordingSink`.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub sink: Arc<RecordingSink>,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// POST a JSON body, return response body + status.
    pub async fn submit_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a urlencoded form to a page, return the HTML + status.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> (String, StatusCode, Option<String>) {
        let mut req = self.client.post(self.url(path)).form(fields);
        if let Some(cookie) = cookie {
            req = req.header(reqwest::header::COOKIE, cookie);
        }
        let resp = req.send().await.expect("form post failed");
        let status = resp.status();
        let set_cookie = resp
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().to_string());
        let html = resp.text().await.unwrap_or_default();
        (html, status, set_cookie)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        trusted_proxies: vec![],
        cors_origins: vec![],
        log_level: "warn".to_string(),
        airtable: AirtableConfig {
            api_token: Some("pat-test".to_string()),
            base_id: Some("appTest".to_string()),
            table: "Candidatos".to_string(),
            api_url: "http://127.0.0.1:9/v0".to_string(),
            timeout_secs: 5,
        },
        limits: LimitsConfig::default(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let sink = Arc::new(RecordingSink::default());
    let (addr, state) = serve(config, sink.clone()).await;

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        sink,
        state,
    }
}

/// Serve the app with any sink, returning its address.
pub async fn serve(config: Config, sink: Arc<dyn RecordSink>) -> (SocketAddr, SharedState) {
    let (app, state) = papoula_intake::build_app(config, sink);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    (addr, state)
}

/// A complete, valid step-1 answer set.
pub fn step_one_submission(email: &str) -> FormSubmission {
    FormSubmission::new()
        .with(EMAIL, email)
        .with("Nome Social", "Maria Silva")
        .with("Tipo de Roteirista", "Individual")
        .with(BIRTH_YEAR, 1990_i64)
        .with(ETHNICITY, "Pardo")
        .with(GENDER, "nao_binario")
        .with("PCD", "Não")
        .with(REGION, "Metropolitana-de-Curitiba")
        .with("Formação Acadêmica", "Cinema e Audiovisual")
        .with("Cursos e Certificados", "Oficina de roteiro")
        .with("Nível de Experiência", "Iniciante")
        .with(ODS_IDENTIFICATION, vec![ODS_OPTIONS[3]])
        .with(ODS_PROJECTS, vec![ODS_OPTIONS[4], ODS_OPTIONS[9]])
        .with("Motivação Para Participar", vec!["Conhecer pessoas do meio."])
}

/// A complete, valid step-2 answer set.
pub fn step_two_submission(email: &str) -> FormSubmission {
    FormSubmission::new()
        .with(EMAIL, email)
        .with("Experiência Roteiro", "Dois curtas escritos")
        .with("Experiência Núcleos", "Nenhuma")
        .with("Projetos Pessoais", "Série sobre a história do Paraná")
        .with(PORTFOLIO, "https://lattes.cnpq.br/123")
        .with("Experiência Pesquisa", "Iniciação científica")
        .with(ODS_IDENTIFICATION, vec![ODS_OPTIONS[0]])
        .with("Identificação ODS Razão", "Trabalho com comunidades")
        .with(ODS_PROJECTS, vec![ODS_OPTIONS[10]])
        .with("Projetos ODS Relação", "Os projetos tratam de cidades")
}

/// The step-1 answers as a urlencoded page post.
pub fn step_one_form(email: &str) -> Vec<(&str, &str)> {
    vec![
        (EMAIL, email),
        ("Nome Social", "Maria Silva"),
        ("Tipo de Roteirista", "Individual"),
        (BIRTH_YEAR, "1990"),
        (ETHNICITY, "Pardo"),
        (GENDER, "nao_binario"),
        ("PCD", "Não"),
        (REGION, "Metropolitana-de-Curitiba"),
        ("Formação Acadêmica", "Cinema e Audiovisual"),
        ("Cursos e Certificados", "Oficina de roteiro"),
        ("Nível de Experiência", "Iniciante"),
        (ODS_IDENTIFICATION, ODS_OPTIONS[3]),
        (ODS_PROJECTS, ODS_OPTIONS[4]),
        (ODS_PROJECTS, ODS_OPTIONS[9]),
        ("Motivação Para Participar", "Conhecer pessoas do meio."),
    ]
}
