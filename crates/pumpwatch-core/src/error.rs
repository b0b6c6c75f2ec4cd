use thiserror::Error;

/// Top-level error type for the `pumpwatch-core` crate.
///
/// Every failure in the alert pipeline maps onto one of four categories.
/// All of them except [`CoreError::DependencyMissing`] are recoverable:
/// the operation is dropped, the previous state stays visible, and the
/// message is surfaced as a toast.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad user-supplied filter, sort, or date values.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Lookup for an id no record carries.
    #[error("no alert with id {id}")]
    NotFound { id: u32 },

    /// Malformed tab name, alert id, or similar caller input.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A required collaborator was absent at construction time.
    /// Fatal for the page load — reported once, never retried.
    #[error("required dependency missing: {dependency}")]
    DependencyMissing { dependency: &'static str },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns `true` if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DependencyMissing { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn only_dependency_missing_is_fatal() {
        assert!(
            CoreError::DependencyMissing {
                dependency: "renderer"
            }
            .is_fatal()
        );
        assert!(!CoreError::NotFound { id: 42 }.is_fatal());
        assert!(!CoreError::validation("start after end").is_fatal());
        assert!(!CoreError::invalid_argument("bogus tab").is_fatal());
    }

    #[test]
    fn display_includes_context() {
        let err = CoreError::NotFound { id: 7 };
        assert_eq!(err.to_string(), "no alert with id 7");
    }
}
