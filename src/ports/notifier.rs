//! Appointment notification port: best-effort email delivery.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::SessionId;

/// The data contract handed to the notification collaborator: recipient
/// details plus a pre-formatted subject and body.
#[derive(Debug, Clone)]
pub struct AppointmentNotification {
    pub session_id: SessionId,
    /// Canonical label of the session's bound service, if any.
    pub service: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_day: NaiveDate,
    pub preferred_time: String,
}

impl AppointmentNotification {
    fn name_or_client(&self) -> &str {
        if self.full_name.is_empty() {
            "Client"
        } else {
            &self.full_name
        }
    }

    fn field_or_not_provided(value: &str) -> &str {
        if value.is_empty() {
            "Not provided"
        } else {
            value
        }
    }

    /// Subject line for the confirmation email.
    pub fn subject(&self) -> String {
        format!(
            "Appointment Confirmation for {} on {}",
            self.name_or_client(),
            self.preferred_day.format("%Y-%m-%d"),
        )
    }

    /// Pre-formatted plain-text body with appointment, client, and service
    /// details.
    pub fn body(&self) -> String {
        format!(
            "Dear {name},\n\n\
             Thank you for booking an appointment with Omni Suite AI. Below are the \
             details of your appointment:\n\n\
             **Appointment Details:**\n\
             - Date: {day}\n\
             - Time: {time}\n\
             - Session ID: {session}\n\n\
             **Client Information:**\n\
             - Name: {client_name}\n\
             - Email: {client_email}\n\
             - Phone: {client_phone}\n\n\
             **Service Information:**\n\
             - Selected Service: {service}\n\n\
             We will contact you to confirm this appointment. If you need to \
             reschedule or have any questions, please reach out to us at \
             info@omnisuiteai.com.\n\n\
             Best regards,\n\
             Omni Suite AI\n",
            name = self.name_or_client(),
            day = self.preferred_day.format("%Y-%m-%d"),
            time = self.preferred_time,
            session = self.session_id,
            client_name = Self::field_or_not_provided(&self.full_name),
            client_email = Self::field_or_not_provided(&self.email),
            client_phone = Self::field_or_not_provided(&self.phone),
            service = self.service.as_deref().unwrap_or("Not provided"),
        )
    }
}

/// Port for sending the appointment confirmation.
///
/// Delivery is best-effort: callers fire and forget, and failures are
/// logged, never surfaced, and never roll back the booking.
#[async_trait]
pub trait AppointmentNotifier: Send + Sync {
    async fn notify(&self, notification: &AppointmentNotification) -> Result<(), NotifyError>;
}

/// Notification delivery failures. Logged only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotifyError {
    /// Transport-level failure reaching the email service.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The email service rejected the message.
    #[error("email service rejected the message: status {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> AppointmentNotification {
        AppointmentNotification {
            session_id: SessionId::new(),
            service: Some("Brand".to_string()),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            preferred_day: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            preferred_time: "10:30".to_string(),
        }
    }

    #[test]
    fn subject_names_the_client_and_day() {
        assert_eq!(
            notification().subject(),
            "Appointment Confirmation for Ada Lovelace on 2025-09-01"
        );
    }

    #[test]
    fn subject_falls_back_to_client() {
        let mut n = notification();
        n.full_name.clear();
        assert_eq!(n.subject(), "Appointment Confirmation for Client on 2025-09-01");
    }

    #[test]
    fn body_carries_appointment_and_client_details() {
        let n = notification();
        let body = n.body();

        assert!(body.contains("Dear Ada Lovelace,"));
        assert!(body.contains("- Date: 2025-09-01"));
        assert!(body.contains("- Time: 10:30"));
        assert!(body.contains(&format!("- Session ID: {}", n.session_id)));
        assert!(body.contains("- Selected Service: Brand"));
    }

    #[test]
    fn body_marks_missing_fields_as_not_provided() {
        let mut n = notification();
        n.phone.clear();
        n.service = None;
        let body = n.body();

        assert!(body.contains("- Phone: Not provided"));
        assert!(body.contains("- Selected Service: Not provided"));
    }
}
