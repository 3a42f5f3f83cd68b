use crate::domain::model::{MessageRequest, MessageResult};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, request: &MessageRequest) -> Result<MessageResult>;
}
