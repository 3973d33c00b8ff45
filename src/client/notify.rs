use std::time::Duration;

pub const SUCCESS_MESSAGE: &str = "Formulário enviado com sucesso!";
pub const ERROR_MESSAGE: &str = "Erro ao enviar formulário. Por favor, tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

impl Severity {
    /// How long the message stays on screen before it dismisses itself.
    pub fn display_duration(self) -> Duration {
        match self {
            Severity::Success => Duration::from_secs(4),
            Severity::Warning => Duration::from_secs(5),
            Severity::Error => Duration::from_secs(6),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A transient, auto-dismissing message for the applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success() -> Self {
        Self {
            severity: Severity::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error() -> Self {
        Self {
            severity: Severity::Error,
            message: ERROR_MESSAGE.to_string(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn cooldown(remaining_secs: u64) -> Self {
        Self::warning(format!(
            "Aguarde {} antes de enviar novamente.",
            format_remaining(remaining_secs)
        ))
    }

    pub fn duration(&self) -> Duration {
        self.severity.display_duration()
    }
}

/// `m:ss`
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Used when no UI is attached.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!("{}", notification.message),
            Severity::Warning => tracing::warn!("{}", notification.message),
            Severity::Error => tracing::error!("{}", notification.message),
        }
    }
}
