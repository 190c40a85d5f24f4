//! Data-driven gameplay ability system.
//!
//! `gameplay-core` holds hierarchical tags, per-entity attribute ledgers, an
//! effect engine that re-derives attribute modifiers every tick, and an
//! ability gate. Everything is owned by a [`World`] and addressed by
//! [`EntityId`]; the host drives it by calling [`World::tick`] once per
//! simulation step.
pub mod abilities;
pub mod attributes;
pub mod config;
pub mod effects;
pub mod entity;
pub mod error;
pub mod rng;
pub mod tags;
pub mod world;

pub use abilities::{
    AbilityBehavior, AbilityCondition, AbilityDef, AbilityError, AbilityInvocation,
    AbilityObserver, AbilitySpec, AbilitySpecId, ApplyEffectsBehavior,
};
pub use attributes::{
    Attribute, AttributeCalculator, AttributeLedger, AttributeObserver, AttributeValue, Modifier,
    ModifierKind, StatsInitializer,
};
pub use config::GameplayConfig;
pub use effects::{
    ActiveEffect, ActiveEffectHandle, EffectApplication, EffectContext, EffectDef, EffectError,
    EffectPolicy, EffectSpec, Magnitude, ModifierOperation, SideEffect, StackingDetails,
    StackingType,
};
pub use entity::EntityId;
pub use error::{ErrorContext, ErrorSeverity, GameplayError};
pub use rng::{PcgRng, RngOracle};
pub use tags::{TagContainer, TagError, TagId, TagRegistry, TagRequirements};
pub use world::{Actor, World};
