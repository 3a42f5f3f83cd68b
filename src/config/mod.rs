pub mod toml_config;

use crate::core::sender::{EU_API_BASE, US_API_BASE};
use crate::domain::model::{Credentials, MessageRequest};
use crate::utils::error::{MailerError, Result};
use crate::utils::validation::{
    validate_hostname, validate_mailbox, validate_mailbox_list, validate_non_empty_string,
    validate_range, validate_url, Validate,
};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::{MessageFile, MessageOverrides};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    pub fn api_base(self) -> &'static str {
        match self {
            Region::Us => US_API_BASE,
            Region::Eu => EU_API_BASE,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "send-test-email")]
#[command(about = "Send one transactional email through the Mailgun sandbox domain")]
pub struct CliConfig {
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Fail instead of using the placeholder key when API_KEY is unset")]
    pub require_api_key: bool,

    #[arg(long, value_enum, default_value_t = Region::Us)]
    pub region: Region,

    #[arg(long, help = "Override the provider API base URL")]
    pub api_base: Option<String>,

    #[arg(long)]
    pub domain: Option<String>,

    #[arg(long)]
    pub from: Option<String>,

    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub html: Option<String>,

    #[arg(long, help = "TOML file with [provider] and [message] tables")]
    pub message_file: Option<PathBuf>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Everything the sender needs, resolved once at process start.
#[derive(Debug, Clone)]
pub struct MailerSettings {
    pub credentials: Credentials,
    pub api_base: String,
    pub timeout: Option<Duration>,
    pub message: MessageRequest,
}

/// A missing or whitespace-only key counts as unset and falls back to the
/// placeholder unless `require_key` is set. A present key is used verbatim.
pub fn resolve_credentials(api_key: Option<&str>, require_key: bool) -> Result<Credentials> {
    let credentials = match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => Credentials::new(key),
        None if require_key => {
            return Err(MailerError::MissingConfigError {
                field: "API_KEY".to_string(),
            })
        }
        None => Credentials::placeholder(),
    };

    if credentials.is_placeholder() {
        tracing::warn!("⚠️ Sending with the placeholder API key, set API_KEY for real delivery");
    }
    Ok(credentials)
}

#[cfg(feature = "cli")]
impl CliConfig {
    fn overrides(&self) -> MessageOverrides {
        MessageOverrides {
            domain: self.domain.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            subject: self.subject.clone(),
            text: self.text.clone(),
            html: self.html.clone(),
        }
    }

    /// 優先順序：命令列 > message file > 內建預設值
    pub fn resolve(&self) -> Result<MailerSettings> {
        let file = match &self.message_file {
            Some(path) => {
                tracing::debug!("Loading message file: {}", path.display());
                MessageFile::from_file(path)?
            }
            None => MessageFile::default(),
        };

        let message = self
            .overrides()
            .apply(file.message.apply(MessageRequest::default()));

        let api_base = self
            .api_base
            .clone()
            .or(file.provider.api_base)
            .unwrap_or_else(|| self.region.api_base().to_string());

        let timeout = self
            .timeout_secs
            .or(file.provider.timeout_seconds)
            .map(Duration::from_secs);

        let settings = MailerSettings {
            credentials: resolve_credentials(self.api_key.as_deref(), self.require_api_key)?,
            api_base,
            timeout,
            message,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for MessageRequest {
    fn validate(&self) -> Result<()> {
        validate_hostname("domain", &self.domain)?;
        validate_mailbox("from", &self.from)?;
        validate_mailbox_list("to", &self.to)?;
        validate_non_empty_string("subject", &self.subject)?;
        validate_non_empty_string("text", &self.text)?;
        Ok(())
    }
}

impl Validate for MailerSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout_secs", timeout.as_secs(), 1, 600)?;
        }
        self.message.validate()
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::{DEFAULT_SUBJECT, SANDBOX_DOMAIN};
    use std::io::Write;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["send-test-email"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_credentials_uses_given_key() {
        let credentials = resolve_credentials(Some("key-123"), false).unwrap();
        assert_eq!(credentials.api_key(), "key-123");
    }

    #[test]
    fn test_resolve_credentials_keeps_key_verbatim() {
        let credentials = resolve_credentials(Some(" k1 "), false).unwrap();
        assert_eq!(credentials.api_key(), " k1 ");
    }

    #[test]
    fn test_resolve_credentials_placeholder_by_default() {
        let credentials = resolve_credentials(None, false).unwrap();
        assert!(credentials.is_placeholder());
        assert_eq!(credentials.api_key(), "API_KEY");

        let credentials = resolve_credentials(Some("   "), false).unwrap();
        assert!(credentials.is_placeholder());
    }

    #[test]
    fn test_resolve_credentials_required_key_fails_fast() {
        let err = resolve_credentials(None, true).unwrap_err();
        assert!(matches!(err, MailerError::MissingConfigError { ref field } if field == "API_KEY"));

        let err = resolve_credentials(Some(""), true).unwrap_err();
        assert!(matches!(err, MailerError::MissingConfigError { .. }));

        assert!(resolve_credentials(Some("key-123"), true).is_ok());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = parse(&["--api-key", "key-123"]);
        let settings = config.resolve().unwrap();

        assert_eq!(settings.api_base, US_API_BASE);
        assert_eq!(settings.message, MessageRequest::default());
        assert!(settings.timeout.is_none());
        assert_eq!(settings.credentials.api_key(), "key-123");
    }

    #[test]
    fn test_region_selects_api_base() {
        let config = parse(&["--api-key", "k", "--region", "eu"]);
        assert_eq!(config.resolve().unwrap().api_base, EU_API_BASE);

        let config = parse(&["--api-key", "k", "--region", "eu", "--api-base", "http://localhost:9000/v3"]);
        assert_eq!(config.resolve().unwrap().api_base, "http://localhost:9000/v3");
    }

    #[test]
    fn test_cli_overrides_message_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[provider]
timeout_seconds = 15

[message]
to = "File Target <file@example.com>"
subject = "From file"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = parse(&[
            "--api-key",
            "k",
            "--message-file",
            &path,
            "--subject",
            "From flag",
        ]);
        let settings = config.resolve().unwrap();

        assert_eq!(settings.message.to, "File Target <file@example.com>");
        assert_eq!(settings.message.subject, "From flag");
        assert_eq!(settings.message.domain, SANDBOX_DOMAIN);
        assert_eq!(settings.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let config = parse(&["--api-key", "k", "--to", "not-an-address"]);
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, MailerError::InvalidConfigValueError { ref field, .. } if field == "to"));
    }

    #[test]
    fn test_multiple_recipients_are_accepted() {
        let config = parse(&[
            "--api-key",
            "k",
            "--to",
            "a@x.com, Bea <b@y.com>",
        ]);
        let settings = config.resolve().unwrap();
        assert_eq!(settings.message.to, "a@x.com, Bea <b@y.com>");

        let config = parse(&["--api-key", "k", "--to", "a@x.com, nobody"]);
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_domain_with_url_characters_is_rejected() {
        for domain in ["mg.example.com?x=1", "mg.example.com#frag", "mg/example.com", "mg example.com"] {
            let config = parse(&["--api-key", "k", "--domain", domain]);
            let err = config.resolve().unwrap_err();
            assert!(
                matches!(err, MailerError::InvalidConfigValueError { ref field, .. } if field == "domain"),
                "domain {} should be rejected",
                domain
            );
        }

        let config = parse(&["--api-key", "k", "--domain", "mg.example-1.com"]);
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_invalid_api_base_is_rejected() {
        let config = parse(&["--api-key", "k", "--api-base", "ftp://example.com"]);
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        let config = parse(&["--api-key", "k", "--timeout-secs", "0"]);
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_logging_flags_parse() {
        let config = parse(&["--log-json", "--verbose"]);
        assert!(config.log_json);
        assert!(config.verbose);

        let config = parse(&[]);
        assert!(!config.log_json);
        assert!(!config.require_api_key);
    }

    #[test]
    fn test_default_message_validates() {
        let request = MessageRequest::default();
        assert!(request.validate().is_ok());
        assert_eq!(request.subject, DEFAULT_SUBJECT);
    }
}
