use std::sync::Arc;

use tracing::debug;

use crate::effects::{EffectContext, EffectDef};
use crate::world::World;

use super::{AbilityInvocation, AbilitySpec};

/// Designer logic attached to an ability.
///
/// All hooks are optional. Only `on_activate` gets the world mutably; it may
/// apply effects, end the ability or activate others.
pub trait AbilityBehavior: Send + Sync {
    fn on_granted(&self, _spec: &AbilitySpec) {}

    fn on_activate(&self, _world: &mut World, _invocation: &AbilityInvocation) {}

    fn on_end(&self, _spec: &AbilitySpec) {}

    fn on_removed(&self, _spec: &AbilitySpec) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBehavior;

impl AbilityBehavior for NoopBehavior {}

/// Applies effects to the owner and to every target on activation.
#[derive(Clone, Debug, Default)]
pub struct ApplyEffectsBehavior {
    pub self_effects: Vec<Arc<EffectDef>>,
    pub target_effects: Vec<Arc<EffectDef>>,
    /// End the ability right after applying.
    pub end_immediately: bool,
}

impl ApplyEffectsBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_self(mut self, effect: Arc<EffectDef>) -> Self {
        self.self_effects.push(effect);
        self
    }

    #[must_use]
    pub fn on_targets(mut self, effect: Arc<EffectDef>) -> Self {
        self.target_effects.push(effect);
        self
    }

    #[must_use]
    pub fn end_immediately(mut self) -> Self {
        self.end_immediately = true;
        self
    }
}

impl AbilityBehavior for ApplyEffectsBehavior {
    fn on_activate(&self, world: &mut World, invocation: &AbilityInvocation) {
        let context = EffectContext::new().with_instigator(invocation.owner);

        for effect in &self.self_effects {
            let spec = world.make_outgoing_spec(invocation.source, effect, Some(context.clone()));
            if let Err(error) = world.apply_spec_to_self(invocation.owner, spec) {
                debug!(
                    target: "gameplay::abilities",
                    owner = %invocation.owner,
                    effect = effect.name(),
                    error = %error,
                    "Self effect rejected"
                );
            }
        }

        for &target in &invocation.targets {
            for effect in &self.target_effects {
                let spec = world.make_outgoing_spec(invocation.source, effect, Some(context.clone()));
                if let Err(error) = world.apply_spec_to_self(target, spec) {
                    debug!(
                        target: "gameplay::abilities",
                        owner = %invocation.owner,
                        target_entity = %target,
                        effect = effect.name(),
                        error = %error,
                        "Target effect rejected"
                    );
                }
            }
        }

        if self.end_immediately {
            world.end_ability(invocation.owner, invocation.id);
        }
    }
}
