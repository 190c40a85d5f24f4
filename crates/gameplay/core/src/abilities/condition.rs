//! Custom activation predicates.

use crate::world::World;

use super::AbilitySpec;

/// Predicate checked on every activation attempt, after the tag gates.
pub trait AbilityCondition: Send + Sync {
    /// Condition name (for logs and errors).
    fn name(&self) -> &'static str;

    fn is_pass(&self, spec: &AbilitySpec, world: &World) -> bool;
}

/// Common condition implementations
pub mod common {
    use super::*;
    use crate::attributes::Attribute;

    /// Owner must have at least `cost` of an attribute (current value).
    ///
    /// Only checks; paying the cost is up to the behavior, usually through an
    /// instant self effect.
    #[derive(Clone, Debug)]
    pub struct CostCondition {
        pub attribute: Attribute,
        pub cost: f32,
    }

    impl CostCondition {
        pub fn new(attribute: Attribute, cost: f32) -> Self {
            Self { attribute, cost }
        }
    }

    impl AbilityCondition for CostCondition {
        fn name(&self) -> &'static str {
            "CostCondition"
        }

        fn is_pass(&self, spec: &AbilitySpec, world: &World) -> bool {
            world
                .actor(spec.owner())
                .and_then(|actor| actor.attributes().current_value(&self.attribute))
                .is_some_and(|value| value >= self.cost)
        }
    }
}
