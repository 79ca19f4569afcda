//! The intake core: session state, staged flow, and prompt composition.

mod appointment;
mod prompt;
mod service;
mod session;
mod stage;
mod state_machine;

pub use appointment::{AppointmentDetails, AppointmentError};
pub use prompt::{PromptComposer, BOOKING_OFFER, WELCOME_MESSAGE};
pub use service::ServiceCategory;
pub use session::{ContactDetails, Session, Turn, TurnRole, HISTORY_WINDOW};
pub use stage::IntakeStage;
pub use state_machine::{Advance, IntakeStateMachine, INVALID_SELECTION_MESSAGE};
