//! Intake stages within a conversation session.
//!
//! Stages track where a session sits in the intake flow. Unlike agent
//! behavior (which the prompt composer derives per turn), the stage is the
//! session's position in the flow and gates which inputs are validated.

use serde::{Deserialize, Serialize};

/// The session's position in the intake flow.
///
/// Stages advance in one direction:
/// - `Initial` → `Conversational` via a recognized service selection
/// - `Conversational` → `Booked` via the explicit booking operation
///
/// A session never moves backwards, and conversational text alone never
/// reaches `Booked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    /// Entry state for every new session. Input is matched against the
    /// canonical service list; nothing else advances the stage.
    Initial,

    /// Free-form assistance scoped to the chosen service. Input passes to
    /// the language model without stage-driven validation.
    Conversational,

    /// An appointment has been recorded. The session still accepts further
    /// conversational turns.
    Booked,
}

impl IntakeStage {
    /// Returns a short label suitable for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Conversational => "conversational",
            Self::Booked => "booked",
        }
    }

    /// Returns true if the session has a bound service in this stage.
    pub fn is_service_bound(&self) -> bool {
        matches!(self, Self::Conversational | Self::Booked)
    }

    /// Returns true if user input is validated against the service list.
    pub fn expects_service_selection(&self) -> bool {
        matches!(self, Self::Initial)
    }
}

impl Default for IntakeStage {
    fn default() -> Self {
        Self::Initial
    }
}
