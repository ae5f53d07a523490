//! # Bot Error Types Module
//!
//! Error taxonomy shared by the recipe store, the conversation state machine
//! and the dispatcher.

/// Custom error types for bot operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Schema creation failed; fatal at startup
    Schema(String),
    /// Any read or write failure against the recipe store
    Persistence(String),
    /// Sending or receiving a message failed; the transport is unusable
    Transport(String),
    /// Telegram refused one message (blocked bot, message too long, flood
    /// control); other chats are unaffected
    Delivery(String),
    /// The per-chat draft storage rejected an operation
    Dialogue(String),
}

impl BotError {
    /// Whether the event loop can keep running after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Schema(_) | BotError::Transport(_))
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::Schema(msg) => write!(f, "Schema error: {msg}"),
            BotError::Persistence(msg) => write!(f, "Persistence error: {msg}"),
            BotError::Transport(msg) => write!(f, "Transport error: {msg}"),
            BotError::Delivery(msg) => write!(f, "Delivery error: {msg}"),
            BotError::Dialogue(msg) => write!(f, "Dialogue error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::Persistence(err.to_string())
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        use teloxide::RequestError;

        match err {
            RequestError::Api { .. }
            | RequestError::RetryAfter { .. }
            | RequestError::MigrateToChatId { .. } => BotError::Delivery(err.to_string()),
            _ => BotError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = BotError::Persistence("disk I/O error".to_string());
        assert_eq!(err.to_string(), "Persistence error: disk I/O error");

        let err = BotError::Schema("attempt to write a readonly database".to_string());
        assert_eq!(
            err.to_string(),
            "Schema error: attempt to write a readonly database"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(BotError::Transport("closed".to_string()).is_fatal());
        assert!(BotError::Schema("readonly".to_string()).is_fatal());
        assert!(!BotError::Persistence("locked".to_string()).is_fatal());
        assert!(!BotError::Dialogue("missing".to_string()).is_fatal());
        assert!(!BotError::Delivery("message is too long".to_string()).is_fatal());
    }

    #[test]
    fn test_rejected_messages_are_not_fatal() {
        use teloxide::{ApiError, RequestError};

        for api_error in [ApiError::MessageIsTooLong, ApiError::BotBlocked] {
            let err = BotError::from(RequestError::Api(api_error));
            assert!(matches!(err, BotError::Delivery(_)), "{err}");
            assert!(!err.is_fatal());
        }
    }

    #[test]
    fn test_sqlx_error_maps_to_persistence() {
        let err: BotError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, BotError::Persistence(_)));
    }
}
