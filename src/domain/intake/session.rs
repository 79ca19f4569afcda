//! The session aggregate: per-user conversational context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

use super::{IntakeStage, ServiceCategory};

/// Maximum number of turns retained in a session's history.
///
/// The history is a sliding window: appending beyond this bound discards the
/// oldest entries first. The same window is what gets sent upstream on every
/// language-model call.
pub const HISTORY_WINDOW: usize = 15;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One role-tagged message in a session's history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// Contact details collected during booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// The unit of conversational continuity.
///
/// All mutation goes through methods so the invariants stay centralized:
/// the history window bound lives in [`Session::push_turn`], and the
/// `service`/`stage` coupling (a service is bound iff the stage is past
/// `Initial`) lives in [`Session::bind_service`] and
/// [`Session::record_booking`].
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    history: Vec<Turn>,
    stage: IntakeStage,
    service: Option<ServiceCategory>,
    contact: Option<ContactDetails>,
    last_error: Option<String>,
    last_active: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session in the `Initial` stage.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            history: Vec::new(),
            stage: IntakeStage::Initial,
            service: None,
            contact: None,
            last_error: None,
            last_active: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    pub fn service(&self) -> Option<ServiceCategory> {
        self.service
    }

    pub fn contact(&self) -> Option<&ContactDetails> {
        self.contact.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The retained history: the most recent [`HISTORY_WINDOW`] turns in
    /// chronological order.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Appends a turn, then truncates the history to the window bound,
    /// oldest entries first.
    pub fn push_turn(&mut self, turn: Turn) {
        self.history.push(turn);
        if self.history.len() > HISTORY_WINDOW {
            let excess = self.history.len() - HISTORY_WINDOW;
            self.history.drain(..excess);
        }
    }

    /// Records a validation message to surface on this turn's response.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Clears the validation message. Called at the start of every turn so
    /// the error is always re-derived from the current input.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Binds the chosen service and advances `Initial` → `Conversational`.
    ///
    /// The service is set exactly once; calls outside the `Initial` stage
    /// have no effect.
    pub fn bind_service(&mut self, service: ServiceCategory) {
        if self.stage == IntakeStage::Initial && self.service.is_none() {
            self.service = Some(service);
            self.stage = IntakeStage::Conversational;
        }
    }

    /// Records booking contact details.
    ///
    /// Advances to `Booked` only when a service is already bound; a booking
    /// that lands while the session is still selecting a service records the
    /// contact without inventing a service binding.
    pub fn record_booking(&mut self, contact: ContactDetails) {
        self.contact = Some(contact);
        if self.stage.is_service_bound() {
            self.stage = IntakeStage::Booked;
        }
    }

    /// Marks the session as active now. Drives idle eviction.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// When the session last saw activity.
    pub fn idle_since(&self) -> DateTime<Utc> {
        self.last_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> Session {
        Session::new(SessionId::new())
    }

    mod turns {
        use super::*;

        #[test]
        fn new_session_has_empty_history() {
            let session = fresh();
            assert!(session.history().is_empty());
            assert_eq!(session.stage(), IntakeStage::Initial);
            assert!(session.service().is_none());
            assert!(session.contact().is_none());
            assert!(session.last_error().is_none());
        }

        #[test]
        fn push_preserves_order() {
            let mut session = fresh();
            session.push_turn(Turn::user("hello"));
            session.push_turn(Turn::assistant("hi"));

            assert_eq!(session.history().len(), 2);
            assert_eq!(session.history()[0].role, TurnRole::User);
            assert_eq!(session.history()[1].role, TurnRole::Assistant);
        }

        #[test]
        fn window_keeps_most_recent_turns() {
            let mut session = fresh();
            for i in 0..20 {
                session.push_turn(Turn::user(format!("turn {i}")));
            }

            assert_eq!(session.history().len(), HISTORY_WINDOW);
            assert_eq!(session.history()[0].text, "turn 5");
            assert_eq!(session.history()[HISTORY_WINDOW - 1].text, "turn 19");
        }

        proptest! {
            #[test]
            fn history_never_exceeds_window(texts in proptest::collection::vec(".{0,40}", 0..60)) {
                let mut session = fresh();
                for (i, text) in texts.iter().enumerate() {
                    let turn = if i % 2 == 0 {
                        Turn::user(text.clone())
                    } else {
                        Turn::assistant(text.clone())
                    };
                    session.push_turn(turn);
                    prop_assert!(session.history().len() <= HISTORY_WINDOW);
                }
                // The retained entries are the most recent, in original order.
                let expected: Vec<&String> =
                    texts.iter().rev().take(HISTORY_WINDOW).rev().collect();
                let retained: Vec<&String> =
                    session.history().iter().map(|t| &t.text).collect();
                prop_assert_eq!(retained, expected);
            }
        }
    }

    mod stage_transitions {
        use super::*;

        #[test]
        fn bind_service_advances_to_conversational() {
            let mut session = fresh();
            session.bind_service(ServiceCategory::Brand);

            assert_eq!(session.stage(), IntakeStage::Conversational);
            assert_eq!(session.service(), Some(ServiceCategory::Brand));
        }

        #[test]
        fn bind_service_is_set_once() {
            let mut session = fresh();
            session.bind_service(ServiceCategory::Brand);
            session.bind_service(ServiceCategory::WebsiteDesign);

            assert_eq!(session.service(), Some(ServiceCategory::Brand));
        }

        #[test]
        fn booking_from_conversational_reaches_booked() {
            let mut session = fresh();
            session.bind_service(ServiceCategory::DigitalMarketing);
            session.record_booking(ContactDetails {
                full_name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: "123".into(),
            });

            assert_eq!(session.stage(), IntakeStage::Booked);
            assert_eq!(session.contact().unwrap().full_name, "Ada");
        }

        #[test]
        fn booking_without_service_records_contact_but_keeps_stage() {
            let mut session = fresh();
            session.record_booking(ContactDetails {
                full_name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: "123".into(),
            });

            // Stage stays Initial so the service/stage invariant holds.
            assert_eq!(session.stage(), IntakeStage::Initial);
            assert!(session.contact().is_some());
            assert!(session.service().is_none());
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn set_and_clear_error() {
            let mut session = fresh();
            session.set_error("pick a service");
            assert_eq!(session.last_error(), Some("pick a service"));

            session.clear_error();
            assert!(session.last_error().is_none());
        }
    }
}
