//! Effect lifecycle on the world: apply, stack, tick, reap, remove.
//!
//! Every resident effect contributes to its target's ledger only through the
//! modifier slots, and those slots are rebuilt from scratch (reset, then
//! re-apply every valid effect) whenever the active list or a stack count
//! changes and once per tick. Instant effects write base values instead and
//! never become resident.
//!
//! Iteration over the active list always goes through a snapshot of handles:
//! side effects and periodic sub-effects may add or remove instances on the
//! same target mid-iteration.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::attributes::{Attribute, AttributeLedger, Modifier, nearly_equal};
use crate::entity::EntityId;
use crate::error::ErrorContext;
use crate::tags::TagId;
use crate::world::World;

use super::{
    ActiveEffect, ActiveEffectHandle, EffectContext, EffectDef, EffectError, EffectPolicy,
    EffectSpec, EvaluatedModifier, ExecutionParams, ModifierExecution, ModifierOperation,
    PolicyClock, SideEffect,
};

/// What an accepted application turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectApplication {
    /// Instant effect written into base values.
    Executed,
    /// New resident instance.
    Added(ActiveEffectHandle),
    /// Merged into an existing instance.
    Stacked {
        handle: ActiveEffectHandle,
        stack_count: u32,
    },
    /// Existing instance was at its limit and stays capped.
    Overflowed(ActiveEffectHandle),
    /// Existing instance was at its limit and got cleared.
    OverflowCleared,
}

impl EffectApplication {
    pub fn handle(&self) -> Option<ActiveEffectHandle> {
        match *self {
            Self::Added(handle) | Self::Overflowed(handle) => Some(handle),
            Self::Stacked { handle, .. } => Some(handle),
            Self::Executed | Self::OverflowCleared => None,
        }
    }
}

fn ledger_modifier(operation: ModifierOperation, magnitude: f32) -> Modifier {
    match operation {
        ModifierOperation::Add => Modifier::additive(magnitude),
        ModifierOperation::Multiply => Modifier::multiplicative(magnitude),
        ModifierOperation::Divide => Modifier::multiplicative(-magnitude),
        ModifierOperation::Override => Modifier::overriding(magnitude),
    }
}

/// Authored (stack-scaled) and computed modifiers of an instance.
fn modifier_writes(effect: &ActiveEffect) -> Vec<(Attribute, ModifierOperation, f32)> {
    let spec = &effect.spec;
    spec.def()
        .modifiers()
        .iter()
        .enumerate()
        .map(|(index, modifier)| {
            (
                modifier.attribute.clone(),
                modifier.operation,
                spec.stacked_magnitude(index),
            )
        })
        .chain(effect.computed_modifiers.iter().map(|modifier| {
            (
                modifier.attribute.clone(),
                modifier.operation,
                modifier.magnitude,
            )
        }))
        .collect()
}

fn apply_resident_modifiers(effect: &ActiveEffect, ledger: &mut AttributeLedger) {
    let kind = effect.spec.def().modifier_kind();
    for (attribute, operation, magnitude) in modifier_writes(effect) {
        if !ledger.try_add_modifier(ledger_modifier(operation, magnitude), &attribute, kind) {
            warn!(
                target: "gameplay::effects",
                entity = %ledger.owner(),
                effect = effect.spec.def().name(),
                attribute = attribute.name(),
                "Modifier targets a missing attribute"
            );
        }
    }
}

impl World {
    // ========================================================================
    // Application
    // ========================================================================

    /// Builds a spec of `def` originating from `source`.
    ///
    /// Without a context the source is recorded as instigator.
    pub fn make_outgoing_spec(
        &self,
        source: EntityId,
        def: &Arc<EffectDef>,
        context: Option<EffectContext>,
    ) -> EffectSpec {
        let context = context.unwrap_or_else(|| EffectContext::new().with_instigator(source));
        EffectSpec::new(Arc::clone(def), source, context)
    }

    pub fn apply_effect_to_self(
        &mut self,
        entity: EntityId,
        def: &Arc<EffectDef>,
    ) -> Result<EffectApplication, EffectError> {
        let spec = self.make_outgoing_spec(entity, def, None);
        self.apply_spec_to_self(entity, spec)
    }

    pub fn apply_effect_to_target(
        &mut self,
        source: EntityId,
        target: EntityId,
        def: &Arc<EffectDef>,
        context: Option<EffectContext>,
    ) -> Result<EffectApplication, EffectError> {
        let spec = self.make_outgoing_spec(source, def, context);
        self.apply_spec_to_self(target, spec)
    }

    /// Runs the apply pipeline for `spec` against `target`.
    ///
    /// Conditions, then magnitudes, then custom executions. Instant effects
    /// execute and stop; stackable ones may merge into an existing instance.
    /// Otherwise on-apply side effects run and the instance is registered.
    pub fn apply_spec_to_self(
        &mut self,
        target: EntityId,
        mut spec: EffectSpec,
    ) -> Result<EffectApplication, EffectError> {
        if !self.contains(target) {
            return Err(EffectError::UnknownEntity(target));
        }
        spec.set_target(target);

        if let Err(error) = self.check_application(&spec) {
            debug!(
                target: "gameplay::effects",
                entity = %target,
                effect = spec.def().name(),
                error = %error,
                "Effect application rejected"
            );
            return Err(error);
        }

        let magnitudes = spec.calculate_magnitudes(self);
        spec.set_magnitudes(magnitudes);
        let computed = self.run_executions(&spec);
        let handle = self.allocate_effect_handle();
        let effect = ActiveEffect::new(handle, spec, computed);

        if effect.spec.def().policy().is_instant() {
            self.execute_instant(target, &effect);
            return Ok(EffectApplication::Executed);
        }

        if let Some(outcome) = self.try_stack(target, &effect) {
            return Ok(outcome);
        }

        let def = Arc::clone(effect.spec.def());
        self.run_side_effects_on_applied(target, &def);

        let spec = effect.spec.clone();
        let Some(actor) = self.actors.get_mut(&target) else {
            return Err(EffectError::UnknownEntity(target));
        };
        actor.effects.effects.push(effect);
        self.refresh_modifiers(target);

        trace!(
            target: "gameplay::effects",
            entity = %target,
            effect = def.name(),
            handle = handle.0,
            "Effect added"
        );
        self.notify_applied(target, &spec);
        Ok(EffectApplication::Added(handle))
    }

    fn check_application(&self, spec: &EffectSpec) -> Result<(), EffectError> {
        let def = spec.def();
        if !self.contains(spec.source()) {
            return Err(EffectError::UnknownEntity(spec.source()));
        }
        let target = spec.target().unwrap_or(spec.source());
        let Some(actor) = self.actor(target) else {
            return Err(EffectError::UnknownEntity(target));
        };

        for (index, modifier) in def.modifiers().iter().enumerate() {
            if !actor.attributes().has_attribute(&modifier.attribute) {
                return Err(EffectError::MissingAttribute {
                    effect: def.name().to_owned(),
                    index,
                    attribute: modifier.attribute.name().to_owned(),
                    context: ErrorContext::new()
                        .with_entity(target)
                        .with_definition(def.name()),
                });
            }
        }

        if let Some(condition) = def
            .conditions()
            .iter()
            .find(|condition| !condition.is_pass(spec, self))
        {
            return Err(EffectError::ConditionFailed {
                effect: def.name().to_owned(),
                condition: condition.name(),
                context: ErrorContext::new()
                    .with_entity(target)
                    .with_definition(def.name()),
            });
        }

        Ok(())
    }

    fn run_executions(&self, spec: &EffectSpec) -> Vec<EvaluatedModifier> {
        let params = ExecutionParams { spec, world: self };
        let mut output = Vec::new();
        for execution in spec.def().executions() {
            execution.execute(&params, &mut output);
        }
        output
    }

    /// Writes every modifier of an instant effect into base values.
    fn execute_instant(&mut self, target: EntityId, effect: &ActiveEffect) {
        let Some(actor) = self.actors.get_mut(&target) else {
            return;
        };
        let hooks = actor.effects.hooks.clone();

        for (attribute, operation, magnitude) in modifier_writes(effect) {
            let execution = ModifierExecution {
                spec: &effect.spec,
                target,
                attribute: &attribute,
                operation,
                magnitude,
            };
            if !hooks.iter().all(|hook| hook.pre_execute(&execution)) {
                trace!(
                    target: "gameplay::effects",
                    entity = %target,
                    attribute = attribute.name(),
                    "Execution vetoed by hook"
                );
                continue;
            }

            let Some(base) = actor.attributes.base_value(&attribute) else {
                warn!(
                    target: "gameplay::effects",
                    entity = %target,
                    effect = effect.spec.def().name(),
                    attribute = attribute.name(),
                    "Instant modifier targets a missing attribute"
                );
                continue;
            };

            let base = match operation {
                ModifierOperation::Add => base + magnitude,
                ModifierOperation::Multiply => base * magnitude,
                ModifierOperation::Divide => {
                    if nearly_equal(magnitude, 0.0) {
                        continue;
                    }
                    base / magnitude
                }
                ModifierOperation::Override => magnitude,
            };
            actor.attributes.try_set_base_value(&attribute, base);

            for hook in &hooks {
                hook.post_execute(&execution);
            }
        }
    }

    // ========================================================================
    // Stacking
    // ========================================================================

    /// Merges `incoming` into a matching instance, if there is one.
    fn try_stack(
        &mut self,
        target: EntityId,
        incoming: &ActiveEffect,
    ) -> Option<EffectApplication> {
        let def = Arc::clone(incoming.spec.def());
        if !def.stacking().is_stacking() {
            return None;
        }

        let existing = self
            .actor(target)?
            .effects
            .iter()
            .find(|effect| effect.is_valid() && effect.spec.is_stackable_with(&incoming.spec))?;
        let handle = existing.handle();
        let stack_count = existing.stack_count();

        let limit = def.stacking().stack_limit;
        if limit > 0 && stack_count >= limit && !self.handle_overflow(target, handle, &def) {
            let still_present = self
                .actor(target)
                .is_some_and(|actor| actor.effects.get(handle).is_some());
            return Some(if still_present {
                EffectApplication::Overflowed(handle)
            } else {
                EffectApplication::OverflowCleared
            });
        }

        let stack_count =
            self.update_stack_count(target, handle, stack_count + incoming.stack_count());
        Some(EffectApplication::Stacked {
            handle,
            stack_count,
        })
    }

    /// Applies overflow effects, clearing the capped instance when configured.
    ///
    /// Returns whether the application may continue as a normal stack add.
    fn handle_overflow(
        &mut self,
        target: EntityId,
        handle: ActiveEffectHandle,
        def: &Arc<EffectDef>,
    ) -> bool {
        let stacking = def.stacking();
        debug!(
            target: "gameplay::effects",
            entity = %target,
            effect = def.name(),
            limit = stacking.stack_limit,
            "Stack overflow"
        );

        for overflow in &stacking.overflow_effects {
            if let Err(error) = self.apply_effect_to_self(target, overflow) {
                debug!(
                    target: "gameplay::effects",
                    entity = %target,
                    effect = overflow.name(),
                    error = %error,
                    "Overflow effect rejected"
                );
            }
        }

        if !stacking.allow_overflow_application && stacking.clear_stack_on_overflow {
            if let Some(effect) = self.effect_mut(target, handle) {
                effect.spec.set_stack_count(0);
            }
            self.evict(target, handle);
            self.refresh_modifiers(target);
        }

        stacking.allow_overflow_application
    }

    /// Sets the stack count (clamped to the limit) and returns the new count.
    ///
    /// A non-zero count restarts the clock when the policy asks for it.
    fn update_stack_count(
        &mut self,
        target: EntityId,
        handle: ActiveEffectHandle,
        stack_count: u32,
    ) -> u32 {
        let Some(effect) = self.effect_mut(target, handle) else {
            return 0;
        };

        let limit = effect.spec.def().stacking().stack_limit;
        let clamped = if limit > 0 {
            stack_count.min(limit)
        } else {
            stack_count
        };
        let old = effect.stack_count();
        effect.spec.set_stack_count(clamped);
        if clamped != 0 && effect.spec.def().policy().resets_on_stack_change() {
            effect.restart_clock();
        }

        if old != clamped {
            let spec = effect.spec.clone();
            self.refresh_modifiers(target);
            if let Some(actor) = self.actor(target) {
                for observer in &actor.effects.observers {
                    observer.on_stack_changed(target, &spec, old, clamped);
                }
            }
        }
        clamped
    }

    /// Applies the reduce strategy and returns the remaining stack count.
    /// Instant instances have no stacks and report 0.
    fn reduce_stack(&mut self, target: EntityId, handle: ActiveEffectHandle) -> u32 {
        let Some(effect) = self.effect(target, handle) else {
            return 0;
        };
        let Some(stack) = effect.spec.def().policy().stack_policy() else {
            return 0;
        };

        let count = effect.stack_count();
        let reduced = stack.reduce.reduce(count);
        if reduced == count {
            return count;
        }
        self.update_stack_count(target, handle, reduced)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Steps every world actor's effects by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        let entities: Vec<EntityId> = self.actors.keys().copied().collect();
        for entity in entities {
            self.update_attribute_modifiers_using_applied_effects(entity, delta);
        }
    }

    /// One simulation step for `target`.
    ///
    /// Rebuilds modifiers from valid effects, advances their clocks, reaps
    /// expired or cancelled ones and pushes derived values into the ledger.
    pub fn update_attribute_modifiers_using_applied_effects(
        &mut self,
        target: EntityId,
        delta: f32,
    ) {
        if !self.contains(target) {
            return;
        }

        self.reapply_modifiers(target);
        let expired = self.advance_clocks(target, delta);
        let evicted = self.reap(target);
        if expired || evicted {
            self.reapply_modifiers(target);
        }

        if let Some(actor) = self.actors.get_mut(&target) {
            actor.attributes.update_attribute_values();
        }
    }

    fn refresh_modifiers(&mut self, target: EntityId) {
        self.reapply_modifiers(target);
        if let Some(actor) = self.actors.get_mut(&target) {
            actor.attributes.update_attribute_values();
        }
    }

    /// Resets the ledger's modifier slots and re-applies every valid effect.
    fn reapply_modifiers(&mut self, target: EntityId) {
        let Some(actor) = self.actors.get_mut(&target) else {
            return;
        };
        actor.attributes.reset_attribute_modifiers();

        for handle in actor.effects.snapshot() {
            let Some(effect) = self.effect(target, handle) else {
                continue;
            };
            if !effect.is_valid() {
                continue;
            }

            let magnitudes = effect.spec.calculate_magnitudes(self);
            let Some(actor) = self.actors.get_mut(&target) else {
                return;
            };
            let Some(effect) = actor.effects.get_mut(handle) else {
                continue;
            };
            effect.spec.set_magnitudes(magnitudes);
            apply_resident_modifiers(effect, &mut actor.attributes);
        }
    }

    /// Advances clocks of valid effects. Returns true if any expired.
    fn advance_clocks(&mut self, target: EntityId, delta: f32) -> bool {
        let Some(actor) = self.actor(target) else {
            return false;
        };

        let mut expired_any = false;
        for handle in actor.effects.snapshot() {
            let Some(effect) = self.effect_mut(target, handle) else {
                continue;
            };
            if !effect.is_valid() {
                continue;
            }

            let mut period_elapsed = false;
            match &mut effect.clock {
                PolicyClock::Duration { remaining } => {
                    *remaining -= delta;
                    if *remaining <= 0.0 {
                        effect.spec.set_expired(true);
                        expired_any = true;
                    }
                }
                PolicyClock::Periodic { until_next, .. } => {
                    *until_next -= delta;
                    period_elapsed = *until_next <= 0.0;
                }
                PolicyClock::Counter { .. } | PolicyClock::None => {}
            }

            if period_elapsed {
                expired_any |= self.fire_period(target, handle);
            }
        }
        expired_any
    }

    /// Applies the sub-effects of a periodic instance once. Returns true if
    /// that was its last period.
    fn fire_period(&mut self, target: EntityId, handle: ActiveEffectHandle) -> bool {
        let Some(effect) = self.effect_mut(target, handle) else {
            return false;
        };
        let EffectPolicy::Periodic(policy) = effect.spec.def().policy() else {
            return false;
        };
        let interval = policy.interval;
        let effects = policy.effects.clone();
        if let PolicyClock::Periodic { until_next, .. } = &mut effect.clock {
            *until_next = interval;
        }

        let source = effect.spec.source();
        let context = effect.spec.context().clone();
        let source = if self.contains(source) { source } else { target };

        trace!(
            target: "gameplay::effects",
            entity = %target,
            handle = handle.0,
            "Periodic effect fired"
        );
        for sub_effect in &effects {
            let spec = self.make_outgoing_spec(source, sub_effect, Some(context.clone()));
            if let Err(error) = self.apply_spec_to_self(target, spec) {
                debug!(
                    target: "gameplay::effects",
                    entity = %target,
                    effect = sub_effect.name(),
                    error = %error,
                    "Periodic sub-effect rejected"
                );
            }
        }

        let Some(effect) = self.effect_mut(target, handle) else {
            return false;
        };
        let PolicyClock::Periodic {
            remaining_times, ..
        } = &mut effect.clock
        else {
            return false;
        };
        *remaining_times = remaining_times.saturating_sub(1);
        if *remaining_times == 0 {
            effect.spec.set_expired(true);
            return true;
        }
        false
    }

    /// Evicts cancelled instances and drains stacks of expired ones.
    /// Returns true if anything left the active list.
    fn reap(&mut self, target: EntityId) -> bool {
        let Some(actor) = self.actor(target) else {
            return false;
        };

        let mut evicted = false;
        for handle in actor.effects.snapshot().into_iter().rev() {
            let Some(effect) = self.effect(target, handle) else {
                continue;
            };
            if effect.is_valid() {
                continue;
            }

            if !effect.is_active() || self.reduce_stack(target, handle) == 0 {
                evicted |= self.evict(target, handle).is_some();
            }
        }
        evicted
    }

    /// Drops an instance from the active list and runs its removal side effects.
    fn evict(&mut self, target: EntityId, handle: ActiveEffectHandle) -> Option<ActiveEffect> {
        let effect = self.actors.get_mut(&target)?.effects.take(handle)?;
        let def = Arc::clone(effect.spec.def());
        self.run_side_effects_on_removed(target, &def);

        trace!(
            target: "gameplay::effects",
            entity = %target,
            effect = def.name(),
            handle = handle.0,
            "Effect removed"
        );
        if let Some(actor) = self.actor(target) {
            for observer in &actor.effects.observers {
                observer.on_removed(target, &effect.spec);
            }
        }
        Some(effect)
    }

    // ========================================================================
    // Removal and queries
    // ========================================================================

    /// Removes one round of stacks from every instance of `def` on `target`,
    /// evicting those that reach zero.
    ///
    /// Returns false if no instance of `def` was found.
    pub fn remove_effect(&mut self, target: EntityId, def: &Arc<EffectDef>) -> bool {
        let Some(actor) = self.actor(target) else {
            return false;
        };
        let handles: Vec<ActiveEffectHandle> = actor
            .effects
            .iter()
            .filter(|effect| EffectDef::is_same(effect.spec.def(), def))
            .map(ActiveEffect::handle)
            .collect();
        if handles.is_empty() {
            return false;
        }

        for handle in handles.into_iter().rev() {
            if self.reduce_stack(target, handle) == 0 {
                self.evict(target, handle);
            }
        }
        self.refresh_modifiers(target);
        true
    }

    pub fn remove_effect_spec(&mut self, target: EntityId, spec: &EffectSpec) -> bool {
        let def = Arc::clone(spec.def());
        self.remove_effect(target, &def)
    }

    /// Like [`remove_effect`](Self::remove_effect) for a single instance.
    pub fn remove_effect_by_handle(&mut self, target: EntityId, handle: ActiveEffectHandle) -> bool {
        if self.effect(target, handle).is_none() {
            return false;
        }
        if self.reduce_stack(target, handle) == 0 {
            self.evict(target, handle);
        }
        self.refresh_modifiers(target);
        true
    }

    /// Marks an instance cancelled; it stops contributing and is evicted on
    /// the next tick.
    pub fn cancel_effect(&mut self, target: EntityId, handle: ActiveEffectHandle) -> bool {
        match self.effect_mut(target, handle) {
            Some(effect) => {
                effect.active = false;
                true
            }
            None => false,
        }
    }

    /// Cancels every instance whose effect tag matches `tag` hierarchically.
    /// Eviction happens on the next tick. Returns how many were cancelled.
    pub fn expire_effects_with_tag(&mut self, target: EntityId, tag: TagId) -> usize {
        let registry = Arc::clone(&self.tags);
        let depth = self.config.default_query_depth;
        let Some(actor) = self.actors.get_mut(&target) else {
            return 0;
        };

        let mut cancelled = 0;
        for effect in actor.effects.effects.iter_mut().filter(|effect| effect.active) {
            if effect
                .spec
                .def()
                .effect_tag()
                .is_some_and(|effect_tag| registry.matches(effect_tag, tag, depth))
            {
                effect.active = false;
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Cancels matching instances and evicts them right away.
    pub fn expire_effects_with_tag_immediately(&mut self, target: EntityId, tag: TagId) -> usize {
        let cancelled = self.expire_effects_with_tag(target, tag);
        if cancelled > 0 {
            self.reap(target);
            self.refresh_modifiers(target);
        }
        cancelled
    }

    /// Evicts every instance on `target`, running removal side effects.
    pub fn clear_effects(&mut self, target: EntityId) {
        let Some(actor) = self.actor(target) else {
            return;
        };
        for handle in actor.effects.snapshot().into_iter().rev() {
            self.evict(target, handle);
        }
        self.refresh_modifiers(target);
    }

    /// Advances counter effects listening on `channel`. Returns how many
    /// counters moved.
    pub fn signal_counter(&mut self, target: EntityId, channel: &str) -> usize {
        let Some(actor) = self.actors.get_mut(&target) else {
            return 0;
        };

        let mut advanced = 0;
        let mut expired = false;
        for effect in actor.effects.effects.iter_mut() {
            let listening = matches!(
                effect.spec.def().policy(),
                EffectPolicy::Counter(policy) if policy.channel == channel
            );
            if !listening || !effect.is_valid() {
                continue;
            }
            if let PolicyClock::Counter { remaining } = &mut effect.clock {
                *remaining = remaining.saturating_sub(1);
                advanced += 1;
                if *remaining == 0 {
                    effect.spec.set_expired(true);
                    expired = true;
                }
            }
        }

        if expired {
            self.reap(target);
            self.refresh_modifiers(target);
        }
        advanced
    }

    pub fn active_effects(&self, target: EntityId) -> &[ActiveEffect] {
        match self.actor(target) {
            Some(actor) => actor.effects.as_slice(),
            None => &[],
        }
    }

    /// First instance of `def` on `target`, in any state.
    pub fn find_effect_by_def(
        &self,
        target: EntityId,
        def: &Arc<EffectDef>,
    ) -> Option<&ActiveEffect> {
        self.actor(target)?
            .effects
            .iter()
            .find(|effect| EffectDef::is_same(effect.spec.def(), def))
    }

    pub fn effect(&self, target: EntityId, handle: ActiveEffectHandle) -> Option<&ActiveEffect> {
        self.actor(target)?.effects.get(handle)
    }

    fn effect_mut(
        &mut self,
        target: EntityId,
        handle: ActiveEffectHandle,
    ) -> Option<&mut ActiveEffect> {
        self.actors.get_mut(&target)?.effects.get_mut(handle)
    }

    // ========================================================================
    // Side effects and notifications
    // ========================================================================

    fn run_side_effects_on_applied(&mut self, target: EntityId, def: &Arc<EffectDef>) {
        for side_effect in def.side_effects() {
            match side_effect {
                SideEffect::GrantTags(tags) => {
                    if let Some(actor) = self.actors.get_mut(&target) {
                        actor.tags.add_tags(tags);
                    }
                }
                SideEffect::GrantAbilities(abilities) => {
                    for ability in abilities {
                        self.give_ability(target, ability);
                    }
                }
                SideEffect::RemoveEffectsWithTags(tags) => {
                    for &tag in tags {
                        self.expire_effects_with_tag_immediately(target, tag);
                    }
                }
                SideEffect::RemoveEffectsByDef(defs) => {
                    for removed in defs {
                        self.remove_effect(target, removed);
                    }
                }
            }
        }
    }

    fn run_side_effects_on_removed(&mut self, target: EntityId, def: &Arc<EffectDef>) {
        for side_effect in def.side_effects() {
            match side_effect {
                SideEffect::GrantTags(tags) => {
                    if let Some(actor) = self.actors.get_mut(&target) {
                        actor.tags.remove_tags(tags);
                    }
                }
                SideEffect::GrantAbilities(abilities) => {
                    for ability in abilities {
                        self.remove_ability_by_def(target, ability);
                    }
                }
                SideEffect::RemoveEffectsWithTags(_) | SideEffect::RemoveEffectsByDef(_) => {}
            }
        }
    }

    fn notify_applied(&self, target: EntityId, spec: &EffectSpec) {
        if let Some(actor) = self.actor(target) {
            for observer in &actor.effects.observers {
                observer.on_applied_to_self(target, spec);
            }
        }

        let Some(instigator) = spec.context().instigator else {
            return;
        };
        if let Some(actor) = self.actor(instigator) {
            for observer in &actor.effects.observers {
                observer.on_applied_to_target(instigator, target, spec);
            }
        }
    }
}
