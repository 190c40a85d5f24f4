use std::fmt;
use std::sync::Arc;

use crate::attributes::{Attribute, ModifierKind};
use crate::tags::TagId;

use super::{EffectCondition, EffectExecution, EffectPolicy, Magnitude, SideEffect};

/// Arithmetic applied by one modifier.
///
/// Instant effects apply it to the base value. Resident effects translate it
/// into a ledger modifier (`Divide` becomes a negative multiplicative part).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierOperation {
    Add,
    Multiply,
    Divide,
    Override,
}

/// One attribute change authored on an effect.
#[derive(Clone, Debug)]
pub struct EffectModifier {
    pub attribute: Attribute,
    pub operation: ModifierOperation,
    pub magnitude: Magnitude,
}

impl EffectModifier {
    pub fn new(attribute: Attribute, operation: ModifierOperation, magnitude: Magnitude) -> Self {
        Self {
            attribute,
            operation,
            magnitude,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StackingType {
    /// Every application is a separate instance.
    #[default]
    None,
    /// Applications from the same source merge into one instance.
    AggregateBySource,
    /// All applications of the definition on a target merge.
    AggregateByTarget,
}

/// Stacking rules of an effect definition.
#[derive(Clone, Debug, Default)]
pub struct StackingDetails {
    pub stacking_type: StackingType,
    /// Maximum stack count; 0 means unlimited.
    pub stack_limit: u32,
    /// Applied to the target when an application arrives at the limit.
    pub overflow_effects: Vec<Arc<EffectDef>>,
    /// Lets an overflowing application continue as a normal stack add.
    pub allow_overflow_application: bool,
    /// Drops the capped instance on overflow, unless overflow application
    /// is allowed.
    pub clear_stack_on_overflow: bool,
}

impl StackingDetails {
    pub fn new(stacking_type: StackingType, stack_limit: u32) -> Self {
        Self {
            stacking_type,
            stack_limit,
            ..Self::default()
        }
    }

    pub fn is_stacking(&self) -> bool {
        self.stacking_type != StackingType::None
    }

    #[must_use]
    pub fn with_overflow_effect(mut self, effect: Arc<EffectDef>) -> Self {
        self.overflow_effects.push(effect);
        self
    }

    #[must_use]
    pub fn allow_overflow_application(mut self, allow: bool) -> Self {
        self.allow_overflow_application = allow;
        self
    }

    #[must_use]
    pub fn clear_stack_on_overflow(mut self, clear: bool) -> Self {
        self.clear_stack_on_overflow = clear;
        self
    }
}

/// Immutable authoring data for an effect.
///
/// Definitions are shared as `Arc<EffectDef>`; two definitions are the same
/// definition only if they are the same allocation.
pub struct EffectDef {
    name: String,
    effect_tag: Option<TagId>,
    policy: EffectPolicy,
    modifiers: Vec<EffectModifier>,
    modifier_kind: ModifierKind,
    stacking: StackingDetails,
    side_effects: Vec<SideEffect>,
    executions: Vec<Arc<dyn EffectExecution>>,
    conditions: Vec<Arc<dyn EffectCondition>>,
}

impl EffectDef {
    pub fn builder(name: impl Into<String>) -> EffectDefBuilder {
        EffectDefBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effect_tag(&self) -> Option<TagId> {
        self.effect_tag
    }

    pub fn policy(&self) -> &EffectPolicy {
        &self.policy
    }

    pub fn modifiers(&self) -> &[EffectModifier] {
        &self.modifiers
    }

    /// Ledger slot that resident modifiers of this effect accumulate into.
    pub fn modifier_kind(&self) -> ModifierKind {
        self.modifier_kind
    }

    pub fn stacking(&self) -> &StackingDetails {
        &self.stacking
    }

    pub fn side_effects(&self) -> &[SideEffect] {
        &self.side_effects
    }

    pub fn executions(&self) -> &[Arc<dyn EffectExecution>] {
        &self.executions
    }

    pub fn conditions(&self) -> &[Arc<dyn EffectCondition>] {
        &self.conditions
    }

    pub fn is_same(a: &Arc<EffectDef>, b: &Arc<EffectDef>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Debug for EffectDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDef")
            .field("name", &self.name)
            .field("effect_tag", &self.effect_tag)
            .field("policy", &self.policy)
            .field("modifiers", &self.modifiers)
            .field("stacking", &self.stacking.stacking_type)
            .field("side_effects", &self.side_effects.len())
            .field("executions", &self.executions.len())
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// Fluent builder for [`EffectDef`].
pub struct EffectDefBuilder {
    def: EffectDef,
}

impl EffectDefBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: EffectDef {
                name: name.into(),
                effect_tag: None,
                policy: EffectPolicy::Instant,
                modifiers: Vec::new(),
                modifier_kind: ModifierKind::Core,
                stacking: StackingDetails::default(),
                side_effects: Vec::new(),
                executions: Vec::new(),
                conditions: Vec::new(),
            },
        }
    }

    pub fn tag(mut self, tag: TagId) -> Self {
        self.def.effect_tag = Some(tag);
        self
    }

    pub fn policy(mut self, policy: EffectPolicy) -> Self {
        self.def.policy = policy;
        self
    }

    pub fn modifier(
        mut self,
        attribute: Attribute,
        operation: ModifierOperation,
        magnitude: impl Into<Magnitude>,
    ) -> Self {
        self.def
            .modifiers
            .push(EffectModifier::new(attribute, operation, magnitude.into()));
        self
    }

    pub fn modifier_kind(mut self, kind: ModifierKind) -> Self {
        self.def.modifier_kind = kind;
        self
    }

    pub fn stacking(mut self, stacking: StackingDetails) -> Self {
        self.def.stacking = stacking;
        self
    }

    pub fn side_effect(mut self, side_effect: SideEffect) -> Self {
        self.def.side_effects.push(side_effect);
        self
    }

    pub fn execution(mut self, execution: impl EffectExecution + 'static) -> Self {
        self.def.executions.push(Arc::new(execution));
        self
    }

    pub fn condition(mut self, condition: impl EffectCondition + 'static) -> Self {
        self.def.conditions.push(Arc::new(condition));
        self
    }

    pub fn build(self) -> Arc<EffectDef> {
        Arc::new(self.def)
    }
}
