//! Resend notifier: AppointmentNotifier over the Resend HTTP email API.
//!
//! Sends the pre-formatted confirmation to the business inbox and, when
//! present, the client's address. Callers treat delivery as best-effort;
//! this adapter only reports the failure, it never retries.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{AppointmentNotification, AppointmentNotifier, NotifyError};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Email notifier backed by the Resend API.
pub struct ResendNotifier {
    client: Client,
    api_key: Secret<String>,
    /// Formatted "Name <address>" sender header.
    from: String,
    /// Business inbox that receives every confirmation.
    notify_inbox: String,
    base_url: String,
}

impl ResendNotifier {
    /// Creates a notifier with the given credentials and addresses.
    pub fn new(
        api_key: impl Into<String>,
        from: impl Into<String>,
        notify_inbox: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            notify_inbox: notify_inbox.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The business inbox plus the client's address when one was given.
    fn recipients(&self, notification: &AppointmentNotification) -> Vec<String> {
        let mut to = vec![self.notify_inbox.clone()];
        if !notification.email.is_empty() {
            to.push(notification.email.clone());
        }
        to
    }
}

#[async_trait]
impl AppointmentNotifier for ResendNotifier {
    async fn notify(&self, notification: &AppointmentNotification) -> Result<(), NotifyError> {
        let payload = SendEmailRequest {
            from: self.from.clone(),
            to: self.recipients(notification),
            subject: notification.subject(),
            text: notification.body(),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                recipients = payload.to.len(),
                day = %notification.preferred_day,
                "appointment confirmation sent"
            );
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use chrono::NaiveDate;

    fn notification(email: &str) -> AppointmentNotification {
        AppointmentNotification {
            session_id: SessionId::new(),
            service: Some("Brand".to_string()),
            full_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            phone: "+1 555 0100".to_string(),
            preferred_day: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            preferred_time: "10:30".to_string(),
        }
    }

    fn notifier() -> ResendNotifier {
        ResendNotifier::new("re_test", "Omni Suite AI <info@omnisuiteai.com>", "info@omnisuiteai.com")
    }

    #[test]
    fn recipients_include_client_when_present() {
        let to = notifier().recipients(&notification("ada@example.com"));
        assert_eq!(to, vec!["info@omnisuiteai.com", "ada@example.com"]);
    }

    #[test]
    fn recipients_fall_back_to_business_inbox() {
        let to = notifier().recipients(&notification(""));
        assert_eq!(to, vec!["info@omnisuiteai.com"]);
    }

    #[test]
    fn payload_serializes_for_the_email_api() {
        let n = notification("ada@example.com");
        let payload = SendEmailRequest {
            from: "Omni Suite AI <info@omnisuiteai.com>".to_string(),
            to: notifier().recipients(&n),
            subject: n.subject(),
            text: n.body(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from"], "Omni Suite AI <info@omnisuiteai.com>");
        assert_eq!(json["to"].as_array().unwrap().len(), 2);
        assert!(json["subject"]
            .as_str()
            .unwrap()
            .starts_with("Appointment Confirmation"));
    }
}
