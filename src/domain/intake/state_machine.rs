//! Pure decision logic for advancing a session through the intake flow.

use super::{ServiceCategory, Session};

/// The instructive message returned when `Initial`-stage input does not
/// match any canonical service. Returned verbatim, with no generative call.
pub const INVALID_SELECTION_MESSAGE: &str = "Please select one of the following: \
    Digital Marketing, Brand, Custom Software Development/Mobile Application \
    Development, or Website Design.";

/// What the controller should do after a turn's input was evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Input accepted (or not subject to validation); proceed to the
    /// language-model call.
    Proceed,
    /// Input rejected in the `Initial` stage. The message is returned to the
    /// user as-is; no language-model call is made.
    Rejected { message: String },
}

/// Validates user input against the session's current stage and applies the
/// resulting transition.
///
/// This is the only place stage transitions driven by conversational input
/// happen; the `Booked` stage is reached exclusively through the booking
/// operation.
pub struct IntakeStateMachine;

impl IntakeStateMachine {
    /// Evaluates one turn of non-empty user input.
    ///
    /// In `Initial`, the input must normalize to one of the canonical
    /// service labels; anything else sets the session's validation error and
    /// leaves the stage untouched, however many times the user retries. Past
    /// `Initial`, input flows through without stage-driven validation — a
    /// service label typed again in `Conversational` is just a message.
    pub fn advance(session: &mut Session, input: &str) -> Advance {
        if !session.stage().expects_service_selection() {
            return Advance::Proceed;
        }

        match ServiceCategory::match_input(input) {
            Some(service) => {
                session.bind_service(service);
                session.clear_error();
                Advance::Proceed
            }
            None => {
                session.set_error(INVALID_SELECTION_MESSAGE);
                Advance::Rejected {
                    message: INVALID_SELECTION_MESSAGE.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::intake::IntakeStage;

    fn fresh() -> Session {
        Session::new(SessionId::new())
    }

    #[test]
    fn valid_selection_transitions_and_binds_service() {
        let mut session = fresh();
        let advance = IntakeStateMachine::advance(&mut session, "Digital Marketing");

        assert_eq!(advance, Advance::Proceed);
        assert_eq!(session.stage(), IntakeStage::Conversational);
        assert_eq!(session.service(), Some(ServiceCategory::DigitalMarketing));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn selection_is_normalized_before_matching() {
        let mut session = fresh();
        let advance = IntakeStateMachine::advance(&mut session, "  brand  ");

        assert_eq!(advance, Advance::Proceed);
        assert_eq!(session.service(), Some(ServiceCategory::Brand));
    }

    #[test]
    fn unrecognized_input_rejects_without_transition() {
        let mut session = fresh();
        let advance = IntakeStateMachine::advance(&mut session, "I want a logo");

        assert!(matches!(advance, Advance::Rejected { .. }));
        assert_eq!(session.stage(), IntakeStage::Initial);
        assert_eq!(session.last_error(), Some(INVALID_SELECTION_MESSAGE));
    }

    #[test]
    fn repeated_bad_input_never_advances() {
        let mut session = fresh();
        for _ in 0..5 {
            let advance = IntakeStateMachine::advance(&mut session, "nope");
            assert!(matches!(advance, Advance::Rejected { .. }));
        }
        assert_eq!(session.stage(), IntakeStage::Initial);
    }

    #[test]
    fn second_valid_label_is_a_normal_message() {
        let mut session = fresh();
        IntakeStateMachine::advance(&mut session, "Brand");
        let advance = IntakeStateMachine::advance(&mut session, "Website Design");

        // Already conversational: no re-evaluation, no rebinding.
        assert_eq!(advance, Advance::Proceed);
        assert_eq!(session.service(), Some(ServiceCategory::Brand));
        assert_eq!(session.stage(), IntakeStage::Conversational);
    }

    #[test]
    fn conversational_input_always_proceeds() {
        let mut session = fresh();
        IntakeStateMachine::advance(&mut session, "Brand");
        let advance = IntakeStateMachine::advance(&mut session, "how do I name a product?");

        assert_eq!(advance, Advance::Proceed);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn rejection_message_lists_all_options() {
        for service in ServiceCategory::ALL {
            // The long label is split across the message; check a stable prefix.
            let head: String = service.label().chars().take(5).collect();
            assert!(INVALID_SELECTION_MESSAGE.contains(&head));
        }
    }
}
