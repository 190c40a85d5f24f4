//! Effect definitions, their runtime instances and the engine driving them.
//!
//! # Design
//!
//! An [`EffectDef`] is immutable authoring data shared behind an `Arc`. Each
//! application produces an [`EffectSpec`] (source, target, context, evaluated
//! magnitudes, stack count) which the world wraps into an [`ActiveEffect`]
//! when the policy makes it resident.
//!
//! Effects never reference entities directly; everything flows through
//! [`World`](crate::World) by [`EntityId`](crate::EntityId). The engine lives
//! in `engine.rs` as inherent methods on the world:
//!
//! - `apply_*` run the application pipeline
//! - `tick` steps clocks and reaps
//! - `remove_*`, `expire_*`, `signal_counter` end effects early
//!
//! Extension points are traits: [`MagnitudeCalculator`], [`EffectCondition`],
//! [`EffectExecution`], [`ExecutionHook`] and [`EffectObserver`].

mod active;
mod condition;
mod def;
mod engine;
mod error;
mod execution;
mod hooks;
mod magnitude;
mod policy;
mod side_effect;
mod spec;

pub use active::{ActiveEffect, ActiveEffectHandle, ActiveEffects};
pub use condition::{EffectCondition, common};
pub use def::{
    EffectDef, EffectDefBuilder, EffectModifier, ModifierOperation, StackingDetails, StackingType,
};
pub use engine::EffectApplication;
pub use error::EffectError;
pub use execution::{EffectExecution, EvaluatedModifier, ExecutionParams};
pub use hooks::{EffectObserver, ExecutionHook, ModifierExecution};
pub use magnitude::{CaptureSource, Magnitude, MagnitudeCalculator};
pub use policy::{
    CounterPolicy, DurationPolicy, EffectPolicy, PeriodicPolicy, PolicyClock,
    ReduceStackStrategy, StackPolicy,
};
pub use side_effect::SideEffect;
pub use spec::{EffectContext, EffectSpec};
