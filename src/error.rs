//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// The human-readable message carried by this error, without the kind
    /// prefix. `None` when the error carries no description at all.
    pub fn message(&self) -> Option<String> {
        let message = match self {
            Error::Io(e) => e.to_string(),
            Error::Serialization(e) => e.to_string(),
            Error::Http(e) => e.to_string(),
            Error::AiProvider(msg)
            | Error::Configuration(msg)
            | Error::Validation(msg)
            | Error::Generation(msg)
            | Error::Unknown(msg)
            | Error::Invariant(msg) => msg.clone(),
        };

        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_kind_prefix() {
        let err = Error::AiProvider("quota exceeded".to_string());
        assert_eq!(err.message().as_deref(), Some("quota exceeded"));
        assert_eq!(err.to_string(), "AI provider error: quota exceeded");
    }

    #[test]
    fn test_blank_message_is_none() {
        assert!(Error::AiProvider("   ".to_string()).message().is_none());
        assert!(Error::Unknown(String::new()).message().is_none());
    }

    #[test]
    fn test_serde_error_keeps_description() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.message().is_some());
    }
}
