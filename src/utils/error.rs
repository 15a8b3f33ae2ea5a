use crate::domain::model::SourceKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No node exists at parent path '{parent}'")]
    Structure { parent: String },

    #[error("No node registered under key '{key}'")]
    NotFound { key: String },

    #[error("Failed to parse {kind} definition '{origin}': {message}")]
    DefinitionParse {
        kind: SourceKind,
        origin: String,
        message: String,
    },

    #[error("Invalid definition field '{field}' = '{value}': {reason}")]
    InvalidDefinition {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Contribution factory '{tag}' rejected node '{key}': {reason}")]
    Factory {
        tag: String,
        key: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Recoverable at the boundary; the caller picks fallback or exit.
    Medium,
    /// Contract violation inside the subsystem.
    High,
    /// Broken built-in configuration; the product cannot safely continue.
    Critical,
}

impl ComposeError {
    /// True only for a broken built-in definition: the shipped product is
    /// defective and the top-level caller is expected to terminate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ComposeError::DefinitionParse {
                kind: SourceKind::BuiltIn,
                ..
            }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ComposeError::DefinitionParse {
                kind: SourceKind::BuiltIn,
                ..
            } => ErrorSeverity::Critical,
            ComposeError::DefinitionParse {
                kind: SourceKind::UserSupplied,
                ..
            }
            | ComposeError::InvalidDefinition { .. }
            | ComposeError::Io(_) => ErrorSeverity::Medium,
            ComposeError::Structure { .. }
            | ComposeError::NotFound { .. }
            | ComposeError::Factory { .. } => ErrorSeverity::High,
        }
    }

    /// Dialog-level text for user-supplied definition failures: source
    /// location plus the underlying parser message. Other errors fall back
    /// to their Display form.
    pub fn user_message(&self) -> String {
        match self {
            ComposeError::DefinitionParse {
                kind: SourceKind::UserSupplied,
                origin,
                message,
            } => format!(
                "Your composition definition '{}' could not be loaded: {}",
                origin, message
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parse_error_is_fatal() {
        let err = ComposeError::DefinitionParse {
            kind: SourceKind::BuiltIn,
            origin: "builtin/ribbon.toml".to_string(),
            message: "unexpected eof".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_parse_error_is_recoverable() {
        let err = ComposeError::DefinitionParse {
            kind: SourceKind::UserSupplied,
            origin: "/home/user/ribbon.toml".to_string(),
            message: "expected table".to_string(),
        };
        assert!(!err.is_fatal());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        let msg = err.user_message();
        assert!(msg.contains("/home/user/ribbon.toml"));
        assert!(msg.contains("expected table"));
    }

    #[test]
    fn test_structure_error_is_contract_violation() {
        let err = ComposeError::Structure {
            parent: "/ribbon/Home/Unknown".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_fatal());
    }
}
