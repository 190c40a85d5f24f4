use crate::error::{ErrorSeverity, GameplayError};

use super::TagId;

/// Defects found in a tag parent graph.
///
/// Returned after the offending parent link has already been cleared, so the
/// registry is always left as a valid forest.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("tag `{tag}` cannot be its own parent")]
    SelfParent { tag: String },

    #[error("parenting `{tag}` under `{parent}` would form a cycle")]
    Cycle { tag: String, parent: String },

    #[error("tag `{tag}` exceeds max depth {max_depth}")]
    DepthExceeded { tag: String, max_depth: usize },

    #[error("unknown tag id {0:?}")]
    UnknownTag(TagId),
}

impl GameplayError for TagError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTag(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SelfParent { .. } => "TAG_SELF_PARENT",
            Self::Cycle { .. } => "TAG_CYCLE",
            Self::DepthExceeded { .. } => "TAG_DEPTH_EXCEEDED",
            Self::UnknownTag(_) => "TAG_UNKNOWN",
        }
    }
}
