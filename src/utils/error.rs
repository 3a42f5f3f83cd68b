use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    /// 傳輸、HTTP 狀態或回應解析失敗，一律歸為同一種發送錯誤
    #[error("{message}")]
    SendError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Message file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<reqwest::Error> for MailerError {
    fn from(e: reqwest::Error) -> Self {
        MailerError::SendError {
            message: e.to_string(),
        }
    }
}

impl MailerError {
    pub fn send(message: impl Into<String>) -> Self {
        MailerError::SendError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;
