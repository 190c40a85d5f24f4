use crate::entity::EntityId;
use crate::error::{ErrorContext, ErrorSeverity, GameplayError};

/// Reasons an effect application is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("effect `{effect}` rejected by condition `{condition}`")]
    ConditionFailed {
        effect: String,
        condition: &'static str,
        context: ErrorContext,
    },

    #[error("effect `{effect}` modifier #{index} targets `{attribute}`, missing on the target")]
    MissingAttribute {
        effect: String,
        index: usize,
        attribute: String,
        context: ErrorContext,
    },
}

impl GameplayError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConditionFailed { .. } => ErrorSeverity::Recoverable,
            Self::UnknownEntity(_) | Self::MissingAttribute { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::ConditionFailed { context, .. } | Self::MissingAttribute { context, .. } => {
                Some(context)
            }
            Self::UnknownEntity(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "EFFECT_UNKNOWN_ENTITY",
            Self::ConditionFailed { .. } => "EFFECT_CONDITION_FAILED",
            Self::MissingAttribute { .. } => "EFFECT_MISSING_ATTRIBUTE",
        }
    }
}
