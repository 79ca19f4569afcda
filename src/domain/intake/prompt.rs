//! Builds the instruction context handed to the language-model provider.

use super::{IntakeStage, ServiceCategory, Session, Turn};

/// The assistant's first utterance: the welcome menu the model is asked to
/// deliver while the session is still selecting a service.
pub const WELCOME_MESSAGE: &str = "Hello, and welcome to Omni Suite AI!\n\n\
    My name is Charles. How can I help you today?\n\n\
    Do you need support with any of the following?\n\
    - Digital Marketing\n\
    - Brand\n\
    - Custom Software Development/Mobile Application Development\n\
    - Website Design";

/// The exact booking-offer sentence embedded in the conversational
/// directive. The model is instructed to reproduce it verbatim when it
/// judges the user's need unresolved; nothing parses the reply to confirm it
/// appeared.
pub const BOOKING_OFFER: &str = "Please provide your full name, email address, \
    phone number, and preferred day and time for a session with our Strategy \
    Director, Ryan Jenkins.";

/// Composes the persona/system directive, the bounded history window, and
/// the quick-reply suggestions for one language-model call.
pub struct PromptComposer;

impl PromptComposer {
    /// The system directive for the session's current state.
    ///
    /// While no service is bound (only possible in `Initial`) the model is
    /// told to literally ask the welcome question. Once a service is bound
    /// the persona is scoped to that domain and carries the booking offer.
    pub fn directive(session: &Session) -> String {
        match session.service() {
            None => format!(
                "You're a friendly marketing assistant for Omni Suite AI named Charles.\n\
                 Ask this question or provide this information: \"{WELCOME_MESSAGE}\"\n\
                 Keep responses short (2-3 sentences), professional, and engaging."
            ),
            Some(service) => format!(
                "You're a friendly marketing assistant for Omni Suite AI named Charles, \
                 specialized as a master in {service}.\n\
                 Help the user with their queries and problems related to {service}, \
                 providing knowledgeable answers based on best practices in the domain.\n\
                 Keep responses short (2-3 sentences), professional, and engaging.\n\
                 If you cannot fully resolve the user's issue based on the conversation, \
                 or if they need more in-depth, personalized assistance, or if the \
                 problem persists, offer to book a session by exactly saying: \
                 \"{BOOKING_OFFER}\"",
                service = service.label(),
            ),
        }
    }

    /// The history sent upstream: the most recent turns in chronological
    /// order, already bounded by the session's sliding window.
    pub fn context_window(session: &Session) -> &[Turn] {
        session.history()
    }

    /// Quick-reply suggestions returned alongside the reply: the four
    /// canonical service names in `Initial`, empty in every other stage.
    pub fn suggestions(stage: IntakeStage) -> Vec<String> {
        match stage {
            IntakeStage::Initial => ServiceCategory::labels(),
            IntakeStage::Conversational | IntakeStage::Booked => Vec::new(),
        }
    }
}
