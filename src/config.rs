use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    /// Origins allowed to call the submit API from a browser. Empty disables CORS.
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub airtable: AirtableConfig,
    pub limits: LimitsConfig,
}

/// Record store settings. Credentials stay optional at startup: their absence
/// is reported on each submission instead of preventing the pages from serving.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_token: Option<String>,
    pub base_id: Option<String>,
    pub table: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub rate_limit: u32,
    pub rate_window_secs: u64,
    pub cooldown_secs: u64,
    pub dedup_window_secs: u64,
}

impl AirtableConfig {
    /// Both credentials, or `None` when either one is missing or blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.api_token.as_deref().filter(|s| !s.trim().is_empty())?;
        let base = self.base_id.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((token, base))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("INTAKE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_HOST: {e}"))?;

        let port: u16 = env_or("INTAKE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_PORT: {e}"))?;

        let max_body_size: usize = env_or("INTAKE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("INTAKE_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid INTAKE_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_origins: Vec<String> = env_or("INTAKE_CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_level = env_or("INTAKE_LOG_LEVEL", "info");

        let airtable = AirtableConfig {
            api_token: env_optional("AIRTABLE_PAT"),
            base_id: env_optional("AIRTABLE_BASE_ID"),
            table: env_or("AIRTABLE_TABLE", "Candidatos"),
            api_url: env_or("AIRTABLE_API_URL", "https://api.airtable.com/v0")
                .trim_end_matches('/')
                .to_string(),
            timeout_secs: env_or("AIRTABLE_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|e| format!("Invalid AIRTABLE_TIMEOUT_SECS: {e}"))?,
        };

        let limits = LimitsConfig {
            rate_limit: env_or("INTAKE_RATE_LIMIT", "5")
                .parse()
                .map_err(|e| format!("Invalid INTAKE_RATE_LIMIT: {e}"))?,
            rate_window_secs: env_or("INTAKE_RATE_LIMIT_WINDOW_SECS", "60")
                .parse()
                .map_err(|e| format!("Invalid INTAKE_RATE_LIMIT_WINDOW_SECS: {e}"))?,
            cooldown_secs: env_or("INTAKE_COOLDOWN_SECS", "300")
                .parse()
                .map_err(|e| format!("Invalid INTAKE_COOLDOWN_SECS: {e}"))?,
            dedup_window_secs: env_or("INTAKE_DEDUP_WINDOW_SECS", "86400")
                .parse()
                .map_err(|e| format!("Invalid INTAKE_DEDUP_WINDOW_SECS: {e}"))?,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            trusted_proxies,
            cors_origins,
            log_level,
            airtable,
            limits,
        })
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            rate_limit: 5,
            rate_window_secs: 60,
            cooldown_secs: 300,
            dedup_window_secs: 86_400,
        }
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
