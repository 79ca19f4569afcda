//! Appointment booking: the explicit entry point that reaches `Booked`.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{AppointmentDetails, AppointmentError, Turn};
use crate::ports::{
    AppointmentNotification, AppointmentNotifier, SessionStore, SessionStoreError,
};

/// Booking rejections surfaced to the client.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Invalid(#[from] AppointmentError),

    #[error("Session not found. Please start a new conversation.")]
    SessionNotFound(SessionId),
}

/// Handles a booking request: validates it, updates the session, and fires
/// the best-effort confirmation email.
pub struct BookAppointmentHandler {
    store: Arc<dyn SessionStore>,
    notifier: Option<Arc<dyn AppointmentNotifier>>,
}

impl BookAppointmentHandler {
    /// `notifier` is `None` when email is not configured; bookings still
    /// succeed, only the confirmation email is skipped.
    pub fn new(
        store: Arc<dyn SessionStore>,
        notifier: Option<Arc<dyn AppointmentNotifier>>,
    ) -> Self {
        Self { store, notifier }
    }

    /// Books an appointment against an existing session.
    ///
    /// On success the session's contact is set, exactly one confirmation
    /// turn is appended, and the notification is spawned fire-and-forget —
    /// its outcome never affects the returned confirmation.
    pub async fn handle(
        &self,
        session_id: SessionId,
        preferred_day: &str,
        preferred_time: &str,
        full_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<String, BookingError> {
        let details =
            AppointmentDetails::parse(preferred_day, preferred_time, full_name, email, phone)?;

        let handle = self.store.get(session_id).await.map_err(
            |SessionStoreError::NotFound(id)| BookingError::SessionNotFound(id),
        )?;

        let confirmation = format!(
            "Appointment booked for {} at {}. We'll contact you to confirm!",
            details.preferred_day.format("%Y-%m-%d"),
            details.preferred_time,
        );

        let notification = {
            let mut session = handle.lock().await;
            session.touch();
            let service = session.service().map(|s| s.label().to_string());
            session.record_booking(details.contact());
            session.push_turn(Turn::assistant(confirmation.clone()));

            AppointmentNotification {
                session_id,
                service,
                full_name: details.full_name.clone(),
                email: details.email.clone(),
                phone: details.phone.clone(),
                preferred_day: details.preferred_day,
                preferred_time: details.preferred_time.clone(),
            }
        };

        match &self.notifier {
            Some(notifier) => {
                let notifier = Arc::clone(notifier);
                tokio::spawn(async move {
                    if let Err(error) = notifier.notify(&notification).await {
                        tracing::error!(error = %error, "appointment notification failed");
                    }
                });
            }
            None => {
                tracing::warn!("email not configured; skipping appointment notification");
            }
        }

        Ok(confirmation)
    }
}
