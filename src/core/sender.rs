use crate::core::{Credentials, MessageRequest, MessageResult, MessageTransport};
use crate::domain::model::API_USER;
use crate::utils::error::{MailerError, Result};
use reqwest::{Client, Request};
use std::time::Duration;

pub const US_API_BASE: &str = "https://api.mailgun.net/v3";
pub const EU_API_BASE: &str = "https://api.eu.mailgun.net/v3";

pub struct EmailSender {
    client: Client,
    api_base: String,
    credentials: Credentials,
}

impl EmailSender {
    pub fn new(api_base: impl Into<String>, credentials: Credentials) -> Result<Self> {
        Self::with_timeout(api_base, credentials, None)
    }

    /// `timeout` of `None` keeps reqwest's defaults.
    pub fn with_timeout(
        api_base: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: api_base.into(),
            credentials,
        })
    }

    pub fn endpoint(&self, domain: &str) -> String {
        format!("{}/{}/messages", self.api_base.trim_end_matches('/'), domain)
    }

    /// Builds the outgoing POST without sending it.
    pub fn build_request(&self, message: &MessageRequest) -> Result<Request> {
        let request = self
            .client
            .post(self.endpoint(&message.domain))
            .basic_auth(API_USER, Some(self.credentials.api_key()))
            .query(&message.params())
            .build()?;
        Ok(request)
    }

    pub async fn send_message(&self, message: &MessageRequest) -> Result<MessageResult> {
        let request = self.build_request(message)?;
        tracing::debug!("POST {} (to: {})", request.url().path(), message.to);

        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(MailerError::send(format!("HTTP {}: {}", status, body.trim())));
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| MailerError::send(format!("Invalid JSON response: {}", e)))?;
        Ok(MessageResult(json))
    }
}

#[async_trait::async_trait]
impl MessageTransport for EmailSender {
    async fn send(&self, request: &MessageRequest) -> Result<MessageResult> {
        self.send_message(request).await
    }
}
