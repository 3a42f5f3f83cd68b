use crate::utils::error::{MailerError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MailerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn mailbox_regex() -> &'static Regex {
    static MAILBOX: OnceLock<Regex> = OnceLock::new();
    // `addr@host` 或 `Display Name <addr@host>`
    MAILBOX.get_or_init(|| {
        Regex::new(r"^(?:[^<>]*<[^<>@\s]+@[^<>@\s]+>|[^<>@\s]+@[^<>@\s]+)$")
            .expect("mailbox pattern is valid")
    })
}

pub fn validate_mailbox(field_name: &str, value: &str) -> Result<()> {
    if !mailbox_regex().is_match(value.trim()) {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected `addr@domain` or `Name <addr@domain>`".to_string(),
        });
    }
    Ok(())
}

/// Comma-separated recipients, each checked with [`validate_mailbox`].
pub fn validate_mailbox_list(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    for entry in value.split(',') {
        validate_mailbox(field_name, entry).map_err(|_| MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid recipient `{}`", entry.trim()),
        })?;
    }
    Ok(())
}

fn hostname_regex() -> &'static Regex {
    static HOSTNAME: OnceLock<Regex> = OnceLock::new();
    HOSTNAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$")
            .expect("hostname pattern is valid")
    })
}

/// 網域會直接拼進 URL 路徑，只接受合法的主機名稱字元
pub fn validate_hostname(field_name: &str, value: &str) -> Result<()> {
    if value.len() > 253 || !hostname_regex().is_match(value) {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a hostname such as `mg.example.com`".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
