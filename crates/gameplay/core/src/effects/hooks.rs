//! Observers and hooks around effect application on a target.

use crate::attributes::Attribute;
use crate::entity::EntityId;

use super::{EffectSpec, ModifierOperation};

/// One base-value write about to be made (or just made) by an instant effect.
#[derive(Debug)]
pub struct ModifierExecution<'a> {
    pub spec: &'a EffectSpec,
    pub target: EntityId,
    pub attribute: &'a Attribute,
    pub operation: ModifierOperation,
    pub magnitude: f32,
}

/// Hook around instant base-value writes on the owning entity.
///
/// Hooks are executed in priority order (lower priority values execute first).
pub trait ExecutionHook: Send + Sync {
    fn priority(&self) -> i32 {
        0
    }

    /// Returning false skips this single write.
    fn pre_execute(&self, _execution: &ModifierExecution<'_>) -> bool {
        true
    }

    fn post_execute(&self, _execution: &ModifierExecution<'_>) {}
}

/// Lifecycle notifications for effects on one entity.
pub trait EffectObserver: Send + Sync {
    /// A resident effect was added to this entity.
    fn on_applied_to_self(&self, _target: EntityId, _spec: &EffectSpec) {}

    /// This entity instigated an effect that became resident on `target`.
    fn on_applied_to_target(&self, _instigator: EntityId, _target: EntityId, _spec: &EffectSpec) {}

    fn on_stack_changed(&self, _target: EntityId, _spec: &EffectSpec, _old: u32, _new: u32) {}

    fn on_removed(&self, _target: EntityId, _spec: &EffectSpec) {}
}
