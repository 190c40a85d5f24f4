//! Ability activation errors.

use crate::entity::EntityId;
use crate::error::{ErrorContext, ErrorSeverity, GameplayError};

use super::AbilitySpecId;

// ============================================================================
// Activation Errors
// ============================================================================

/// Reasons an ability cannot be activated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    /// Owner not found in the world.
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    /// No ability with this id is granted to the owner.
    #[error("ability {id:?} is not granted to {owner}")]
    NotGranted { owner: EntityId, id: AbilitySpecId },

    #[error("ability `{ability}` is already active")]
    AlreadyActive { ability: String },

    #[error("owner {0} is disabled")]
    OwnerDisabled(EntityId),

    /// Owner tags do not satisfy the ability's owner requirements.
    #[error("ability `{ability}` owner tag requirements not met")]
    OwnerTagsUnmet {
        ability: String,
        context: ErrorContext,
    },

    /// Source tags do not satisfy the ability's source requirements.
    #[error("ability `{ability}` source tag requirements not met")]
    SourceTagsUnmet {
        ability: String,
        context: ErrorContext,
    },

    #[error("ability `{ability}` rejected by condition `{condition}`")]
    ConditionFailed {
        ability: String,
        condition: &'static str,
        context: ErrorContext,
    },

    /// Another active ability on the owner blocks this one.
    #[error("ability `{ability}` blocked by `{blocked_by}`")]
    Blocked {
        ability: String,
        blocked_by: String,
        context: ErrorContext,
    },
}

impl GameplayError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) | Self::NotGranted { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::OwnerTagsUnmet { context, .. }
            | Self::SourceTagsUnmet { context, .. }
            | Self::ConditionFailed { context, .. }
            | Self::Blocked { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "ABILITY_UNKNOWN_ENTITY",
            Self::NotGranted { .. } => "ABILITY_NOT_GRANTED",
            Self::AlreadyActive { .. } => "ABILITY_ALREADY_ACTIVE",
            Self::OwnerDisabled(_) => "ABILITY_OWNER_DISABLED",
            Self::OwnerTagsUnmet { .. } => "ABILITY_OWNER_TAGS_UNMET",
            Self::SourceTagsUnmet { .. } => "ABILITY_SOURCE_TAGS_UNMET",
            Self::ConditionFailed { .. } => "ABILITY_CONDITION_FAILED",
            Self::Blocked { .. } => "ABILITY_BLOCKED",
        }
    }
}
