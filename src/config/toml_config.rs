use crate::domain::model::MessageRequest;
use crate::utils::error::{MailerError, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional message file passed with `--message-file`.
///
/// ```toml
/// [provider]
/// api_base = "https://api.eu.mailgun.net/v3"
/// timeout_seconds = 30
///
/// [message]
/// to = "Jane <jane@example.com>"
/// subject = "Hello Jane"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageFile {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub message: MessageOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Per-field overrides on top of the built-in sandbox message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageOverrides {
    pub domain: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
}

impl MessageFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MailerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl MessageOverrides {
    /// 只覆寫有設定的欄位
    pub fn apply(&self, mut base: MessageRequest) -> MessageRequest {
        if let Some(domain) = &self.domain {
            base.domain = domain.clone();
        }
        if let Some(from) = &self.from {
            base.from = from.clone();
        }
        if let Some(to) = &self.to {
            base.to = to.clone();
        }
        if let Some(subject) = &self.subject {
            base.subject = subject.clone();
        }
        if let Some(text) = &self.text {
            base.text = text.clone();
        }
        if let Some(html) = &self.html {
            base.html = Some(html.clone());
        }
        base
    }
}
