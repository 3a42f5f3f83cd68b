pub mod sender;

pub use crate::domain::model::{Credentials, MessageRequest, MessageResult};
pub use crate::domain::ports::MessageTransport;
pub use crate::utils::error::Result;
