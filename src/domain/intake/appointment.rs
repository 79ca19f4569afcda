//! Validation of appointment booking requests.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::ContactDetails;

/// Structural email check: local part, domain, and a dotted TLD of 2-3 word
/// characters. Compiled once.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("email pattern is valid")
});

/// A booking request that passed validation.
///
/// Not persisted as its own entity: the contact fields update the session,
/// the rest flows into the confirmation and the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub preferred_day: NaiveDate,
    pub preferred_time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Rejection reasons for a booking request. Surfaced to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDateFormat,

    #[error("Invalid email format. Please provide a valid email address.")]
    InvalidEmail,
}

impl AppointmentDetails {
    /// Validates the raw booking fields.
    ///
    /// The day must parse as a real calendar date in `YYYY-MM-DD` form; the
    /// email must match the structural pattern. Everything else is accepted
    /// as-is.
    pub fn parse(
        preferred_day: &str,
        preferred_time: &str,
        full_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, AppointmentError> {
        let preferred_day = NaiveDate::parse_from_str(preferred_day, "%Y-%m-%d")
            .map_err(|_| AppointmentError::InvalidDateFormat)?;

        if !EMAIL_PATTERN.is_match(email) {
            return Err(AppointmentError::InvalidEmail);
        }

        Ok(Self {
            preferred_day,
            preferred_time: preferred_time.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }

    /// The contact record to attach to the session.
    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
