use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Body returned by a successful `POST /buddy/talk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TalkResponse {
    /// The query as the backend understood it.
    pub query: String,

    /// The assistant's answer.
    pub answer: String,
}

impl TalkResponse {
    /// Creates a response.
    pub fn new(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
        }
    }

    /// Converts the response into a user message and an assistant message.
    ///
    /// Both are stamped with the current time; the assistant message always
    /// carries the larger id.
    pub fn into_messages(self) -> [ChatMessage; 2] {
        let question = ChatMessage::user(self.query);
        let answer = ChatMessage::ai(self.answer);
        [question, answer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;

    #[test]
    fn into_messages_tags_senders() {
        let response = TalkResponse::new("Hello", "Hi there!");
        let [question, answer] = response.into_messages();
        assert_eq!(question.text, "Hello");
        assert_eq!(question.sender, Sender::User);
        assert_eq!(answer.text, "Hi there!");
        assert_eq!(answer.sender, Sender::Ai);
        assert_ne!(question.id, answer.id);
    }

    #[test]
    fn missing_answer_fails_to_parse() {
        let result = serde_json::from_str::<TalkResponse>(r#"{"query": "Hello"}"#);
        assert!(result.is_err());
    }
}
