use std::fmt;

pub const SANDBOX_DOMAIN: &str = "sandbox40099185e5954b6c884f2ae7bc6c5a72.mailgun.org";
pub const DEFAULT_FROM: &str =
    "Mailgun Sandbox <postmaster@sandbox40099185e5954b6c884f2ae7bc6c5a72.mailgun.org>";
pub const DEFAULT_TO: &str = "tianzhi chen <tianzhic.dev@gmail.com>";
pub const DEFAULT_SUBJECT: &str = "Hello tianzhi chen";
pub const DEFAULT_TEXT: &str =
    "Congratulations tianzhi chen, you just sent an email with Mailgun! You are truly awesome!";

/// Literal password used when `API_KEY` is unset.
/// Not a real credential.
pub const PLACEHOLDER_API_KEY: &str = "API_KEY";

/// Basic-Auth username expected by the provider.
pub const API_USER: &str = "api";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_API_KEY)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_placeholder(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

// 避免金鑰出現在 debug 日誌
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    pub domain: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

impl MessageRequest {
    /// Form parameters in the order they are sent. `html` only appears when set.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("from", self.from.as_str()),
            ("to", self.to.as_str()),
            ("subject", self.subject.as_str()),
            ("text", self.text.as_str()),
        ];
        if let Some(html) = &self.html {
            params.push(("html", html.as_str()));
        }
        params
    }
}

impl Default for MessageRequest {
    fn default() -> Self {
        Self {
            domain: SANDBOX_DOMAIN.to_string(),
            from: DEFAULT_FROM.to_string(),
            to: DEFAULT_TO.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            text: DEFAULT_TEXT.to_string(),
            html: None,
        }
    }
}

/// Provider response body, kept opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageResult(pub serde_json::Value);

impl MessageResult {
    pub fn body(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for MessageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_has_four_params() {
        let request = MessageRequest::default();
        let names: Vec<&str> = request.params().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["from", "to", "subject", "text"]);
        assert_eq!(request.domain, SANDBOX_DOMAIN);
    }

    #[test]
    fn test_html_param_only_when_set() {
        let request = MessageRequest {
            html: Some("<p>hi</p>".to_string()),
            ..MessageRequest::default()
        };
        let params = request.params();
        assert_eq!(params.len(), 5);
        assert_eq!(params[4], ("html", "<p>hi</p>"));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials::new("key-secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("key-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(Credentials::placeholder().is_placeholder());
    }

    #[test]
    fn test_message_result_displays_compact_json() {
        let result = MessageResult(serde_json::json!({"id": "abc", "message": "Queued"}));
        assert_eq!(result.to_string(), r#"{"id":"abc","message":"Queued"}"#);
    }
}
