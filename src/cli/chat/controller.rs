use tracing::{debug, error, warn};

use super::conversation_state::{ConversationState, Message};
use crate::completion_client::{Completion, CompletionError};

pub const FETCH_ERROR_REPLY: &str = "Error fetching response. Please try again later.";
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I couldn't process your request. Please try again later.";

/// A user message that has been added to the transcript and is waiting for
/// its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    user_text: String,
}

impl PendingRequest {
    pub fn user_text(&self) -> &str {
        &self.user_text
    }
}

/// Drives one chat session: owns the transcript and allows a single
/// outstanding completion request at a time.
pub struct ConversationController<C> {
    client: C,
    state: ConversationState,
}

impl<C: Completion> ConversationController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: ConversationState::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Replaces the input buffer. Editing stays possible while a request is
    /// in flight.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
    }

    /// Accepts the current draft, if any.
    ///
    /// Returns `None` without touching the state when the draft is blank or a
    /// request is already pending. Otherwise the user message is appended
    /// before anything goes over the network.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if self.state.is_pending() {
            debug!("Ignoring submit while a reply is pending");
            return None;
        }
        if self.state.draft().trim().is_empty() {
            return None;
        }

        let user_text = self.state.take_draft();
        self.state.push(Message::user(user_text.clone()));
        self.state.set_pending(true);
        Some(PendingRequest { user_text })
    }

    pub async fn complete(&self, request: &PendingRequest) -> Result<String, CompletionError> {
        self.client.complete(request.user_text()).await
    }

    /// Records the reply for the pending request and returns to idle.
    /// Failures become a fallback bot message.
    pub fn resolve(&mut self, outcome: Result<String, CompletionError>) -> Option<&Message> {
        if !self.state.is_pending() {
            warn!("Received a reply with no pending request; dropping it");
            return None;
        }

        self.state.push(Message::bot(reply_text(outcome)));
        self.state.set_pending(false);
        self.state.messages().last()
    }

    /// Runs a whole cycle: accept the draft, await the service, record the reply.
    pub async fn submit(&mut self) -> Option<&Message> {
        let request = self.begin_submit()?;
        let outcome = self.complete(&request).await;
        self.resolve(outcome)
    }
}

fn reply_text(outcome: Result<String, CompletionError>) -> String {
    match outcome {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                warn!("Completion service returned an empty reply");
                FALLBACK_REPLY.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Err(err @ CompletionError::Transport(_)) => {
            error!("Error fetching response: {}", err);
            FETCH_ERROR_REPLY.to_string()
        }
        Err(err @ CompletionError::Rejection { .. }) => {
            error!("API error: {}", err);
            FALLBACK_REPLY.to_string()
        }
        Err(err @ CompletionError::Malformed(_)) => {
            warn!("Unusable completion response: {}", err);
            FALLBACK_REPLY.to_string()
        }
    }
}
