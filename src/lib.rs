pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{MailerSettings, Region};
pub use core::sender::EmailSender;
pub use domain::model::{Credentials, MessageRequest, MessageResult};
pub use utils::error::{MailerError, Result};
