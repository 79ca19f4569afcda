//! Turn orchestration: one inbound message end to end.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{Advance, IntakeStateMachine, PromptComposer, Turn};
use crate::ports::{AiProvider, CompletionRequest, SessionStore, SessionStoreError};

/// Fixed reply substituted when the language model fails. Still appended to
/// history so the transcript stays consistent.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong while processing \
    your request. Please try again or contact support.";

/// Soft reply for an unknown session identifier.
pub const SESSION_NOT_FOUND_REPLY: &str = "Session not found. Please start a \
    new conversation.";

/// The result of one handled turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub session_id: String,
    pub suggestions: Vec<String>,
}

/// Orchestrates a single conversational turn: session resolution, intake
/// validation, prompt composition, the upstream call, and history updates.
///
/// Collaborators are injected so the core stays testable with fakes.
pub struct ConversationController {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn AiProvider>,
}

impl ConversationController {
    pub fn new(store: Arc<dyn SessionStore>, provider: Arc<dyn AiProvider>) -> Self {
        Self { store, provider }
    }

    /// Handles one turn.
    ///
    /// Never fails from the caller's perspective: unknown sessions, rejected
    /// intake input, and upstream failures all degrade to fixed replies in
    /// the same envelope.
    pub async fn handle(&self, query: &str, session_id: Option<SessionId>) -> TurnOutcome {
        let handle = match session_id {
            None => self.store.create().await,
            Some(id) => match self.store.get(id).await {
                Ok(handle) => handle,
                Err(SessionStoreError::NotFound(id)) => {
                    tracing::warn!(session_id = %id, "turn for unknown session");
                    return TurnOutcome {
                        reply: SESSION_NOT_FOUND_REPLY.to_string(),
                        session_id: id.to_string(),
                        suggestions: Vec::new(),
                    };
                }
            },
        };

        // The session lock is held for the whole turn, including the
        // upstream call: turns for one session serialize, other sessions
        // proceed untouched.
        let mut session = handle.lock().await;
        session.touch();
        session.clear_error();
        tracing::debug!(
            session_id = %session.id(),
            stage = session.stage().label(),
            "handling turn"
        );

        if !query.is_empty() {
            session.push_turn(Turn::user(query));
            if let Advance::Rejected { message } =
                IntakeStateMachine::advance(&mut session, query)
            {
                // Rejected intake input gets the instructive message
                // verbatim; no generative call, no suggestions.
                return TurnOutcome {
                    reply: message,
                    session_id: session.id().to_string(),
                    suggestions: Vec::new(),
                };
            }
        }

        let suggestions = PromptComposer::suggestions(session.stage());
        let mut request =
            CompletionRequest::new().with_system_prompt(PromptComposer::directive(&session));
        for turn in PromptComposer::context_window(&session) {
            request = request.with_message(turn.role.into(), turn.text.clone());
        }

        let reply = match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(model = %response.model, "generation complete");
                response.content
            }
            Err(error) => {
                tracing::error!(error = %error, "language model call failed");
                FALLBACK_REPLY.to_string()
            }
        };

        session.push_turn(Turn::assistant(reply.clone()));

        TurnOutcome {
            reply,
            session_id: session.id().to_string(),
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::store::InMemorySessionStore;
    use crate::domain::intake::{
        IntakeStage, ServiceCategory, TurnRole, BOOKING_OFFER, INVALID_SELECTION_MESSAGE,
    };
    use crate::ports::AiError;

    fn controller(
        provider: MockAiProvider,
    ) -> (ConversationController, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let controller =
            ConversationController::new(store.clone(), Arc::new(provider));
        (controller, store)
    }

    #[tokio::test]
    async fn first_contact_returns_welcome_suggestions() {
        let provider = MockAiProvider::new().with_response("Hello! How can I help?");
        let (controller, _store) = controller(provider);

        let outcome = controller.handle("", None).await;

        assert_eq!(outcome.reply, "Hello! How can I help?");
        assert_eq!(outcome.suggestions, ServiceCategory::labels());
        assert!(outcome.session_id.parse::<SessionId>().is_ok());
    }

    #[tokio::test]
    async fn empty_first_turn_asks_the_model_for_the_welcome() {
        let provider = MockAiProvider::new();
        let (controller, _store) = controller(provider.clone());

        controller.handle("", None).await;

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let directive = calls[0].system_prompt.as_deref().unwrap();
        assert!(directive.contains("Ask this question"));
        assert!(calls[0].messages.is_empty());
    }

    #[tokio::test]
    async fn invalid_selection_skips_the_model() {
        let provider = MockAiProvider::new();
        let (controller, store) = controller(provider.clone());

        let first = controller.handle("", None).await;
        let session_id: SessionId = first.session_id.parse().unwrap();
        let outcome = controller.handle("make me a sandwich", Some(session_id)).await;

        assert_eq!(outcome.reply, INVALID_SELECTION_MESSAGE);
        assert!(outcome.suggestions.is_empty());
        // Only the welcome turn called the model.
        assert_eq!(provider.call_count(), 1);

        let handle = store.get(session_id).await.unwrap();
        let session = handle.lock().await;
        assert_eq!(session.stage(), IntakeStage::Initial);
        // The rejected input is recorded; no assistant turn is.
        assert_eq!(session.history().last().unwrap().role, TurnRole::User);
    }

    #[tokio::test]
    async fn valid_selection_transitions_and_scopes_the_persona() {
        let provider = MockAiProvider::new().with_response("Great choice!");
        let (controller, store) = controller(provider.clone());

        let outcome = controller.handle("brand", None).await;

        assert_eq!(outcome.reply, "Great choice!");
        assert!(outcome.suggestions.is_empty());

        let directive = provider.calls()[0].system_prompt.clone().unwrap();
        assert!(directive.contains("a master in Brand"));
        assert!(directive.contains(BOOKING_OFFER));

        let session_id: SessionId = outcome.session_id.parse().unwrap();
        let handle = store.get(session_id).await.unwrap();
        let session = handle.lock().await;
        assert_eq!(session.stage(), IntakeStage::Conversational);
        assert_eq!(session.service(), Some(ServiceCategory::Brand));
    }

    #[tokio::test]
    async fn repeated_service_label_is_just_conversation() {
        let provider = MockAiProvider::new();
        let (controller, store) = controller(provider.clone());

        let first = controller.handle("Brand", None).await;
        let session_id: SessionId = first.session_id.parse().unwrap();
        let second = controller.handle("Website Design", Some(session_id)).await;

        assert_eq!(second.reply, "Mock response");
        assert_eq!(provider.call_count(), 2);

        let handle = store.get(session_id).await.unwrap();
        let session = handle.lock().await;
        // The first selection sticks.
        assert_eq!(session.service(), Some(ServiceCategory::Brand));
    }

    #[tokio::test]
    async fn upstream_failure_substitutes_the_fallback_reply() {
        let provider = MockAiProvider::new()
            .with_response("welcome")
            .with_error(AiError::Timeout { timeout_secs: 60 });
        let (controller, store) = controller(provider);

        let first = controller.handle("Digital Marketing", None).await;
        let session_id: SessionId = first.session_id.parse().unwrap();
        let outcome = controller.handle("help me with ads", Some(session_id)).await;

        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert!(outcome.suggestions.is_empty());

        // The fallback is part of the transcript: user turn then assistant
        // fallback, no partial state.
        let handle = store.get(session_id).await.unwrap();
        let session = handle.lock().await;
        let turns = session.history();
        assert_eq!(turns[turns.len() - 2].text, "help me with ads");
        assert_eq!(turns[turns.len() - 1].text, FALLBACK_REPLY);
        assert_eq!(turns[turns.len() - 1].role, TurnRole::Assistant);
    }

    #[tokio::test]
    async fn unknown_session_degrades_to_soft_reply() {
        let provider = MockAiProvider::new();
        let (controller, _store) = controller(provider.clone());

        let ghost = SessionId::new();
        let outcome = controller.handle("hello", Some(ghost)).await;

        assert_eq!(outcome.reply, SESSION_NOT_FOUND_REPLY);
        assert_eq!(outcome.session_id, ghost.to_string());
        assert!(outcome.suggestions.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn context_window_is_sent_in_order() {
        let provider = MockAiProvider::new();
        let (controller, _store) = controller(provider.clone());

        let first = controller.handle("Brand", None).await;
        let session_id: SessionId = first.session_id.parse().unwrap();
        controller.handle("what makes a logo work?", Some(session_id)).await;

        let calls = provider.calls();
        let messages = &calls[1].messages;
        // user "Brand", assistant "Mock response", user question.
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "Brand");
        assert_eq!(messages[2].content, "what makes a logo work?");
    }
}
