use std::fmt;
use std::sync::Arc;

use super::{EffectObserver, EffectSpec, EvaluatedModifier, ExecutionHook, PolicyClock};

/// Identifies one resident effect instance for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffectHandle(pub u64);

/// Runtime wrapper around an applied spec.
#[derive(Clone, Debug)]
pub struct ActiveEffect {
    handle: ActiveEffectHandle,
    pub(crate) spec: EffectSpec,
    pub(crate) active: bool,
    pub(crate) clock: PolicyClock,
    pub(crate) computed_modifiers: Vec<EvaluatedModifier>,
}

impl ActiveEffect {
    pub(crate) fn new(
        handle: ActiveEffectHandle,
        spec: EffectSpec,
        computed_modifiers: Vec<EvaluatedModifier>,
    ) -> Self {
        let clock = PolicyClock::start(spec.def().policy());
        Self {
            handle,
            spec,
            active: true,
            clock,
            computed_modifiers,
        }
    }

    pub fn handle(&self) -> ActiveEffectHandle {
        self.handle
    }

    pub fn spec(&self) -> &EffectSpec {
        &self.spec
    }

    /// False once cancelled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_expired(&self) -> bool {
        self.spec.is_expired()
    }

    /// Active and not expired: still contributing modifiers.
    pub fn is_valid(&self) -> bool {
        self.active && !self.spec.is_expired()
    }

    pub fn stack_count(&self) -> u32 {
        self.spec.stack_count()
    }

    pub fn clock(&self) -> PolicyClock {
        self.clock
    }

    /// Seconds left for duration effects.
    pub fn remaining_duration(&self) -> Option<f32> {
        match self.clock {
            PolicyClock::Duration { remaining } => Some(remaining),
            _ => None,
        }
    }

    pub fn computed_modifiers(&self) -> &[EvaluatedModifier] {
        &self.computed_modifiers
    }

    pub(crate) fn restart_clock(&mut self) {
        self.clock = PolicyClock::start(self.spec.def().policy());
        self.spec.set_expired(false);
    }
}

/// Resident effects of one entity, with the hooks and observers that watch
/// them.
#[derive(Default)]
pub struct ActiveEffects {
    pub(crate) effects: Vec<ActiveEffect>,
    pub(crate) hooks: Vec<Arc<dyn ExecutionHook>>,
    pub(crate) observers: Vec<Arc<dyn EffectObserver>>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> + '_ {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn get(&self, handle: ActiveEffectHandle) -> Option<&ActiveEffect> {
        self.effects.iter().find(|effect| effect.handle == handle)
    }

    pub(crate) fn get_mut(&mut self, handle: ActiveEffectHandle) -> Option<&mut ActiveEffect> {
        self.effects.iter_mut().find(|effect| effect.handle == handle)
    }

    pub(crate) fn take(&mut self, handle: ActiveEffectHandle) -> Option<ActiveEffect> {
        let position = self.effects.iter().position(|effect| effect.handle == handle)?;
        Some(self.effects.remove(position))
    }

    /// Handles in list order, for iteration that tolerates mutation.
    pub(crate) fn snapshot(&self) -> Vec<ActiveEffectHandle> {
        self.effects.iter().map(|effect| effect.handle).collect()
    }

    /// Registers a hook, keeping the list sorted by priority.
    pub fn add_hook(&mut self, hook: Arc<dyn ExecutionHook>) {
        self.hooks.push(hook);
        self.hooks.sort_by_key(|hook| hook.priority());
    }

    pub fn subscribe(&mut self, observer: Arc<dyn EffectObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for ActiveEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveEffects")
            .field("effects", &self.effects)
            .field("hooks", &self.hooks.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
