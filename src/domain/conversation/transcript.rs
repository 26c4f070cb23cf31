//! Transcript - the append-only chat history of a drafting session.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Opening message every session starts with.
pub const WELCOME_MESSAGE: &str = "Welcome! Just tell me what you want to work on.";

/// Ordered chat history. Messages are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates a transcript seeded with the welcome message.
    pub fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }

    /// Appends a message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ChatRole;

    #[test]
    fn seeded_transcript_starts_with_welcome() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Assistant);
        assert_eq!(transcript.messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn push_appends_in_order() {
        let mut transcript = Transcript::seeded();
        transcript.push(ChatMessage::user("Vision please"));
        transcript.push(ChatMessage::assistant("Sure"));

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().content, "Sure");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&Transcript::seeded()).unwrap();
        assert!(json.starts_with("[{\"role\":\"assistant\""));
    }
}
