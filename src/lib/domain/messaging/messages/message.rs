//! Message model

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::messaging::messages::MessageContent;

/// An anonymous message owned by a single user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Message UUID, assigned at acceptance
    pub id: Uuid,

    /// The message text
    pub content: MessageContent,

    /// Server-clock timestamp of acceptance, immutable thereafter
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message accepted now.
    pub fn accept_now(content: MessageContent) -> Self {
        Self {
            id: Uuid::now_v7(),
            content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_accept_now_assigns_id_and_timestamp() -> TestResult {
        let before = Utc::now();
        let message = Message::accept_now(MessageContent::new("hi")?);

        assert_eq!(message.content.as_str(), "hi");
        assert!(message.created_at >= before);
        assert!(message.created_at <= Utc::now());

        Ok(())
    }
}
