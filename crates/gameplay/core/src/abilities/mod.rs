//! Granted abilities and the activation gate.
//!
//! # Design
//!
//! An [`AbilityDef`] is shared authoring data; granting it to an entity
//! creates an [`AbilitySpec`] owned by that entity's [`GrantedAbilities`].
//! Activation passes through [`World::check_activation`] (tags, custom
//! conditions, blocking) before [`World::activate_ability`] cancels abilities
//! on the targets, grants activation tags and hands control to the
//! [`AbilityBehavior`].
//!
//! [`World::check_activation`]: crate::World::check_activation
//! [`World::activate_ability`]: crate::World::activate_ability

mod behavior;
mod condition;
mod def;
mod error;
mod gate;
mod spec;

pub use behavior::{AbilityBehavior, ApplyEffectsBehavior, NoopBehavior};
pub use condition::{AbilityCondition, common};
pub use def::{AbilityDef, AbilityDefBuilder, AbilityTags};
pub use error::AbilityError;
pub use spec::{AbilityInvocation, AbilityObserver, AbilitySpec, AbilitySpecId, GrantedAbilities};
