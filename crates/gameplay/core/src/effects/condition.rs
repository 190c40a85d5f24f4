//! Application conditions - predicates an effect must pass before it lands.
//!
//! Every condition on a definition must pass; the first failure rejects the
//! application with [`EffectError::ConditionFailed`](super::EffectError).

use crate::world::World;

use super::EffectSpec;

/// Predicate over an effect spec that is about to be applied.
///
/// # Design Pattern: Strategy
/// The spec already has its target bound when conditions run.
pub trait EffectCondition: Send + Sync {
    /// Condition name (for logs and errors).
    fn name(&self) -> &'static str;

    fn is_pass(&self, spec: &EffectSpec, world: &World) -> bool;
}

/// Common condition implementations
pub mod common {
    use super::*;
    use crate::attributes::Attribute;
    use crate::tags::TagRequirements;

    #[derive(Clone, Copy, Debug, Default)]
    pub struct AlwaysApply;

    impl EffectCondition for AlwaysApply {
        fn name(&self) -> &'static str {
            "AlwaysApply"
        }

        fn is_pass(&self, _spec: &EffectSpec, _world: &World) -> bool {
            true
        }
    }

    /// Passes with the given probability, rolled deterministically by the world.
    #[derive(Clone, Copy, Debug)]
    pub struct ChanceToApply {
        pub chance: f32,
    }

    impl ChanceToApply {
        pub fn new(chance: f32) -> Self {
            Self { chance }
        }
    }

    impl EffectCondition for ChanceToApply {
        fn name(&self) -> &'static str {
            "ChanceToApply"
        }

        fn is_pass(&self, spec: &EffectSpec, world: &World) -> bool {
            let target = spec.target().unwrap_or(spec.source());
            world.roll_chance(spec.source(), target, self.chance)
        }
    }

    /// Target must satisfy the require/ignore tag sets.
    #[derive(Clone, Debug, Default)]
    pub struct TargetTagRequirements {
        pub requirements: TagRequirements,
    }

    impl TargetTagRequirements {
        pub fn new(requirements: TagRequirements) -> Self {
            Self { requirements }
        }
    }

    impl EffectCondition for TargetTagRequirements {
        fn name(&self) -> &'static str {
            "TargetTagRequirements"
        }

        fn is_pass(&self, spec: &EffectSpec, world: &World) -> bool {
            spec.target()
                .and_then(|target| world.actor(target))
                .is_some_and(|actor| self.requirements.is_satisfied_by(actor.tags()))
        }
    }

    /// Source must have at least `minimum` of an attribute (current value).
    #[derive(Clone, Debug)]
    pub struct SourceAttributeAtLeast {
        pub attribute: Attribute,
        pub minimum: f32,
    }

    impl SourceAttributeAtLeast {
        pub fn new(attribute: Attribute, minimum: f32) -> Self {
            Self { attribute, minimum }
        }
    }

    impl EffectCondition for SourceAttributeAtLeast {
        fn name(&self) -> &'static str {
            "SourceAttributeAtLeast"
        }

        fn is_pass(&self, spec: &EffectSpec, world: &World) -> bool {
            world
                .actor(spec.source())
                .and_then(|actor| actor.attributes().current_value(&self.attribute))
                .is_some_and(|value| value >= self.minimum)
        }
    }
}
