use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::entity::EntityId;
use crate::world::World;

use super::{EffectDef, ModifierOperation, StackingType};

/// Caller-supplied data travelling with one application.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectContext {
    /// Entity responsible for the application, told when it lands.
    pub instigator: Option<EntityId>,
    pub level: f32,
    values: BTreeMap<String, f32>,
}

impl EffectContext {
    pub fn new() -> Self {
        Self {
            instigator: None,
            level: 1.0,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_instigator(mut self, instigator: EntityId) -> Self {
        self.instigator = Some(instigator);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: f32) -> Self {
        self.level = level;
        self
    }

    /// Stores a value read by [`Magnitude::SetByCaller`](super::Magnitude).
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f32) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One application of an [`EffectDef`] from a source to a target.
#[derive(Clone, Debug)]
pub struct EffectSpec {
    def: Arc<EffectDef>,
    source: EntityId,
    target: Option<EntityId>,
    context: EffectContext,
    magnitudes: Vec<f32>,
    stack_count: u32,
    expired: bool,
}

impl EffectSpec {
    pub fn new(def: Arc<EffectDef>, source: EntityId, context: EffectContext) -> Self {
        let stack_count = def
            .policy()
            .stack_policy()
            .map_or(1, |stack| stack.stack_per_active);
        let magnitudes = vec![0.0; def.modifiers().len()];
        Self {
            def,
            source,
            target: None,
            context,
            magnitudes,
            stack_count,
            expired: false,
        }
    }

    pub fn def(&self) -> &Arc<EffectDef> {
        &self.def
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn context(&self) -> &EffectContext {
        &self.context
    }

    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    pub(crate) fn set_stack_count(&mut self, stack_count: u32) {
        self.stack_count = stack_count;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub(crate) fn set_expired(&mut self, expired: bool) {
        self.expired = expired;
    }

    /// Evaluates every authored magnitude against the current world.
    ///
    /// A magnitude that cannot be evaluated counts as 0.
    pub fn calculate_magnitudes(&self, world: &World) -> Vec<f32> {
        self.def
            .modifiers()
            .iter()
            .map(|modifier| {
                modifier.magnitude.evaluate(self, world).unwrap_or_else(|| {
                    debug!(
                        target: "gameplay::effects",
                        effect = self.def.name(),
                        attribute = modifier.attribute.name(),
                        "Magnitude could not be evaluated, using 0"
                    );
                    0.0
                })
            })
            .collect()
    }

    pub(crate) fn set_magnitudes(&mut self, magnitudes: Vec<f32>) {
        self.magnitudes = magnitudes;
    }

    /// Last evaluated magnitude of modifier `index`, ignoring stacks.
    pub fn magnitude(&self, index: usize) -> f32 {
        self.magnitudes.get(index).copied().unwrap_or(0.0)
    }

    /// Magnitude of modifier `index` scaled by the stack count.
    ///
    /// Only stacking definitions scale, and `Override` never does.
    pub fn stacked_magnitude(&self, index: usize) -> f32 {
        let magnitude = self.magnitude(index);
        let Some(modifier) = self.def.modifiers().get(index) else {
            return magnitude;
        };

        if !self.def.stacking().is_stacking() || modifier.operation == ModifierOperation::Override
        {
            return magnitude;
        }
        magnitude * self.stack_count as f32
    }

    /// Whether `other` should merge into this spec's instance instead of
    /// becoming a new one.
    pub fn is_stackable_with(&self, other: &EffectSpec) -> bool {
        if !EffectDef::is_same(&self.def, &other.def) {
            return false;
        }
        match self.def.stacking().stacking_type {
            StackingType::None => false,
            StackingType::AggregateBySource => self.source == other.source,
            StackingType::AggregateByTarget => true,
        }
    }
}
