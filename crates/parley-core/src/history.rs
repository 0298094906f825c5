//! Append-only conversation history.
//!
//! [`ChatHistory`] is the shared conversational timeline: an ordered log of
//! messages where insertion order is significant. It supports appends and
//! in-order reads only; no mutation or removal API exists. Single-writer
//! discipline is enforced by the `&mut` receiver on [`ChatHistory::append`],
//! while any number of readers can hold `&ChatHistory`.

use crate::error::ChatError;
use crate::message::Message;

/// Append-only ordered log of chat messages.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<Message>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, assigning its sequence index.
    ///
    /// Rejects messages with blank content or a blank author with
    /// [`ChatError::InvalidMessage`]; the history is untouched on
    /// rejection. On success the stored message is returned with its
    /// monotonic sequence index set.
    pub fn append(&mut self, mut message: Message) -> Result<&Message, ChatError> {
        if message.content.trim().is_empty() {
            return Err(ChatError::InvalidMessage {
                reason: "content must not be blank".to_string(),
            });
        }
        if message.author.as_str().is_empty() {
            return Err(ChatError::InvalidMessage {
                reason: "author must not be blank".to_string(),
            });
        }
        message.sequence = self.messages.len() as u64;
        self.messages.push(message);
        let index = self.messages.len() - 1;
        Ok(&self.messages[index])
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Lazy, finite, restartable in-order iterator over all messages.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.messages.iter()
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages appended so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check whether the history holds no messages yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AgentName;
    use crate::message::Role;

    #[test]
    fn test_append_assigns_monotonic_sequence() {
        let mut history = ChatHistory::new();
        let first = history.append(Message::user("seed")).unwrap().sequence;
        let second = history
            .append(Message::agent(AgentName::new_unchecked("A"), "reply"))
            .unwrap()
            .sequence;
        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_append_rejects_blank_content() {
        let mut history = ChatHistory::new();
        let err = history.append(Message::user("   ")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MESSAGE");
        assert!(history.is_empty());
    }

    #[test]
    fn test_append_rejects_blank_author() {
        let mut history = ChatHistory::new();
        let msg = Message::agent(AgentName::new_unchecked(""), "text");
        assert!(history.append(msg).is_err());
        assert!(history.is_empty());
    }

    #[test]
    fn test_rejected_append_leaves_history_untouched() {
        let mut history = ChatHistory::new();
        history.append(Message::user("seed")).unwrap();
        let before: Vec<String> = history.iter().map(|m| m.content.clone()).collect();

        let _ = history.append(Message::user(""));

        let after: Vec<String> = history.iter().map(|m| m.content.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_append_only_prefix_property() {
        let mut history = ChatHistory::new();
        history.append(Message::user("one")).unwrap();
        let before: Vec<u64> = history.iter().map(|m| m.sequence).collect();

        history
            .append(Message::agent(AgentName::new_unchecked("A"), "two"))
            .unwrap();
        let after: Vec<u64> = history.iter().map(|m| m.sequence).collect();

        assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn test_last_and_iteration_order() {
        let mut history = ChatHistory::new();
        assert!(history.last().is_none());

        history.append(Message::user("seed")).unwrap();
        history
            .append(Message::agent(AgentName::new_unchecked("A"), "reply"))
            .unwrap();

        let last = history.last().unwrap();
        assert_eq!(last.content, "reply");
        assert_eq!(last.role, Role::Agent);

        // Iterator is restartable
        assert_eq!(history.iter().count(), 2);
        assert_eq!(history.iter().count(), 2);
    }
}
