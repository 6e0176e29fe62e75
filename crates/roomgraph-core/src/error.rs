//! Error types for the room data model.

/// Errors from parsing or validating core values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("not an ordinal direction: {0:?}")]
    InvalidDirection(String),

    #[error("empty exit name")]
    EmptyExitName,

    #[error("malformed room identity {0:?}: expected <slug>_<16 hex digits>")]
    MalformedRoomId(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CoreError::MalformedRoomId("plaza".into());
        assert!(err.to_string().contains("plaza"));
        assert_eq!(CoreError::EmptyExitName.to_string(), "empty exit name");
    }
}
