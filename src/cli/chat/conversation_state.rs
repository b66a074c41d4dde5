#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingResponse,
}

/// Transcript, input buffer and in-flight flag of one chat session.
///
/// The transcript is append-only; the typing indicator shown while a request
/// is pending is never stored in it.
#[derive(Debug, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    draft: String,
    pending: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::AwaitingResponse
        } else {
            Phase::Idle
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub(super) fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    pub(super) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub(super) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
