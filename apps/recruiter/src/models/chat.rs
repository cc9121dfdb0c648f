//! Display-only chat log for the interview and reverse-recruitment steps.
//! Never authoritative: answers and candidate questions live in their own records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    System,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// `HH:MM`, as shown under each bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn system(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(Sender::System, text));
    }

    pub fn candidate(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(Sender::Candidate, text));
    }

    /// Swaps the last message (a pending placeholder) for a system reply.
    pub fn replace_last(&mut self, text: impl Into<String>) {
        self.messages.pop();
        self.system(text);
    }

    pub fn pop(&mut self) -> Option<ChatMessage> {
        self.messages.pop()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_last_swaps_placeholder() {
        let mut transcript = Transcript::default();
        transcript.candidate("What tools do you use?");
        transcript.system("...");
        transcript.replace_last("React and TypeScript.");

        assert_eq!(transcript.len(), 2);
        let last = transcript.last().unwrap();
        assert_eq!(last.sender, Sender::System);
        assert_eq!(last.text, "React and TypeScript.");
    }

    #[test]
    fn test_time_label_format() {
        let message = ChatMessage::new(Sender::System, "hi");
        let label = message.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
