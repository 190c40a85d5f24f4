//! Common error infrastructure for gameplay-core.
//!
//! Subsystem errors (`TagError`, `EffectError`, `AbilityError`) live next to
//! the code that produces them. This module holds what they share.
//!
//! # Design Principles
//!
//! - **Nothing is fatal**: configuration defects are repaired or refused,
//!   precondition failures are reported and the caller moves on
//! - **Severity Classification**: errors are categorized for logging levels
//! - **Boolean surface**: public `try_*`/`can_*` entry points collapse these
//!   errors to `bool` after logging them

use crate::entity::EntityId;

/// Severity level of an error, used for categorization and log levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected runtime outcome: blocked activation, failed chance roll.
    Recoverable,

    /// Invalid input: unknown entity, malformed definition.
    Validation,

    /// Authoring data that had to be repaired (severed tag edge).
    Internal,

    /// Reserved. Nothing in this crate is fatal.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error points at bad authoring data or a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Entity the failing operation targeted.
    pub entity: Option<EntityId>,

    /// Name of the effect or ability definition involved.
    pub definition: Option<String>,

    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    #[must_use]
    pub fn with_definition(mut self, name: impl Into<String>) -> Self {
        self.definition = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all gameplay-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameplayError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Not all errors carry context.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
