//! Activation errors

use activate_dom::{NodeId, SelectorParseError};

/// Result alias for activation operations
pub type Result<T> = std::result::Result<T, ActivateError>;

/// Which entry point was running when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Bind,
    Unbind,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bind => "bind",
            Self::Unbind => "unbind",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation error
#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
    #[error("cannot {operation}: invalid selector {selector:?}: {source}")]
    Selector {
        operation: Operation,
        selector: String,
        source: SelectorParseError,
    },

    #[error("cannot {operation}: {node:?} is not an element")]
    InvalidTarget { operation: Operation, node: NodeId },

    #[error("invalid activation config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ActivateError {
    /// Operation that failed, if the error came from bind or unbind
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Selector { operation, .. } | Self::InvalidTarget { operation, .. } => Some(*operation),
            Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activate_dom::SelectorList;

    #[test]
    fn test_selector_error_names_operation() {
        let source = SelectorList::parse("div[").unwrap_err();
        let err = ActivateError::Selector {
            operation: Operation::Unbind,
            selector: "div[".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot unbind: invalid selector \"div[\""), "{msg}");
        assert_eq!(err.operation(), Some(Operation::Unbind));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_target_message() {
        let err = ActivateError::InvalidTarget { operation: Operation::Bind, node: NodeId::NONE };
        assert!(err.to_string().starts_with("cannot bind: "));
        assert!(err.to_string().ends_with("is not an element"));
    }
}
