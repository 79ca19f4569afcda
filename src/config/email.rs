//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
///
/// Optional: with no API key the notifier is disabled and bookings proceed
/// without a confirmation email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: Option<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Business inbox that receives every booking confirmation
    #[serde(default = "default_notify_inbox")]
    pub notify_inbox: String,
}

impl EmailConfig {
    /// True when a delivery credential is present
    pub fn is_configured(&self) -> bool {
        self.resend_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.resend_api_key {
            if !key.is_empty() && !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if !self.notify_inbox.contains('@') {
            return Err(ValidationError::InvalidNotifyInbox);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            notify_inbox: default_notify_inbox(),
        }
    }
}

fn default_from_email() -> String {
    "info@omnisuiteai.com".to_string()
}

fn default_from_name() -> String {
    "Omni Suite AI".to_string()
}

fn default_notify_inbox() -> String {
    "info@omnisuiteai.com".to_string()
}
