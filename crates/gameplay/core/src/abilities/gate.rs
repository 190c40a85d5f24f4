//! Granting, gating and running abilities.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::entity::EntityId;
use crate::error::ErrorContext;
use crate::world::World;

use super::{AbilityDef, AbilityError, AbilityInvocation, AbilitySpec, AbilitySpecId};

impl World {
    // ========================================================================
    // Grant / remove
    // ========================================================================

    /// Grants `def` to `owner`. Granting the same definition twice returns
    /// the existing id without side effects.
    pub fn give_ability(&mut self, owner: EntityId, def: &Arc<AbilityDef>) -> Option<AbilitySpecId> {
        if let Some(existing) = self.actor(owner)?.abilities.find_by_def(def) {
            return Some(existing.id());
        }

        let id = self.allocate_ability_id();
        let spec = AbilitySpec::new(id, Arc::clone(def), owner);
        let actor = self.actors.get_mut(&owner)?;
        actor.abilities.specs.push(spec.clone());

        def.behavior().on_granted(&spec);
        for observer in &actor.abilities.observers {
            observer.on_granted(&spec);
        }
        debug!(
            target: "gameplay::abilities",
            owner = %owner,
            ability = def.name(),
            id = id.0,
            "Ability granted"
        );
        Some(id)
    }

    /// Ends the ability if active, then removes it from its owner.
    pub fn remove_ability(&mut self, owner: EntityId, id: AbilitySpecId) -> bool {
        if self.ability(owner, id).is_none() {
            return false;
        }
        self.end_ability(owner, id);

        let Some(actor) = self.actors.get_mut(&owner) else {
            return false;
        };
        let Some(position) = actor.abilities.specs.iter().position(|spec| spec.id() == id) else {
            return false;
        };
        let spec = actor.abilities.specs.remove(position);

        spec.def().behavior().on_removed(&spec);
        for observer in &actor.abilities.observers {
            observer.on_removed(&spec);
        }
        debug!(
            target: "gameplay::abilities",
            owner = %owner,
            ability = spec.def().name(),
            "Ability removed"
        );
        true
    }

    pub fn remove_ability_by_def(&mut self, owner: EntityId, def: &Arc<AbilityDef>) -> bool {
        let Some(id) = self.find_ability_by_def(owner, def).map(AbilitySpec::id) else {
            return false;
        };
        self.remove_ability(owner, id)
    }

    pub fn remove_all_abilities(&mut self, owner: EntityId) {
        let Some(actor) = self.actor(owner) else {
            return;
        };
        let ids: Vec<AbilitySpecId> = actor.abilities.iter().map(AbilitySpec::id).collect();
        for id in ids {
            self.remove_ability(owner, id);
        }
    }

    pub fn ability(&self, owner: EntityId, id: AbilitySpecId) -> Option<&AbilitySpec> {
        self.actor(owner)?.abilities.get(id)
    }

    pub fn find_ability_by_def(
        &self,
        owner: EntityId,
        def: &Arc<AbilityDef>,
    ) -> Option<&AbilitySpec> {
        self.actor(owner)?.abilities.find_by_def(def)
    }

    /// Sets the entity the ability acts through.
    pub fn set_ability_source(
        &mut self,
        owner: EntityId,
        id: AbilitySpecId,
        source: EntityId,
    ) -> bool {
        match self.ability_mut(owner, id) {
            Some(spec) => {
                spec.source = source;
                true
            }
            None => false,
        }
    }

    fn ability_mut(&mut self, owner: EntityId, id: AbilitySpecId) -> Option<&mut AbilitySpec> {
        self.actors.get_mut(&owner)?.abilities.get_mut(id)
    }

    // ========================================================================
    // Gate
    // ========================================================================

    /// Checks every activation precondition in order, reporting the first
    /// that fails.
    pub fn check_activation(&self, owner: EntityId, id: AbilitySpecId) -> Result<(), AbilityError> {
        let actor = self.actor(owner).ok_or(AbilityError::UnknownEntity(owner))?;
        let spec = actor
            .abilities
            .get(id)
            .ok_or(AbilityError::NotGranted { owner, id })?;
        let def = spec.def();
        let tags = def.tags();
        let context = || {
            ErrorContext::new()
                .with_entity(owner)
                .with_definition(def.name())
        };

        if spec.is_active() {
            return Err(AbilityError::AlreadyActive {
                ability: def.name().to_owned(),
            });
        }
        if !actor.is_enabled() {
            return Err(AbilityError::OwnerDisabled(owner));
        }

        if !actor.tags().satisfies(&tags.owner) {
            return Err(AbilityError::OwnerTagsUnmet {
                ability: def.name().to_owned(),
                context: context(),
            });
        }

        let source_ok = tags.source.is_empty()
            || self
                .actor(spec.source())
                .is_some_and(|source| source.tags().satisfies(&tags.source));
        if !source_ok {
            return Err(AbilityError::SourceTagsUnmet {
                ability: def.name().to_owned(),
                context: context(),
            });
        }

        if let Some(condition) = def
            .conditions()
            .iter()
            .find(|condition| !condition.is_pass(spec, self))
        {
            return Err(AbilityError::ConditionFailed {
                ability: def.name().to_owned(),
                condition: condition.name(),
                context: context(),
            });
        }

        if let Some(ability_tag) = tags.ability_tag
            && let Some(blocker) = actor.abilities.iter().find(|other| {
                other.is_active() && other.def().tags().block_abilities_with.contains(&ability_tag)
            })
        {
            return Err(AbilityError::Blocked {
                ability: def.name().to_owned(),
                blocked_by: blocker.def().name().to_owned(),
                context: context(),
            });
        }

        Ok(())
    }

    pub fn can_activate(&self, owner: EntityId, id: AbilitySpecId) -> bool {
        match self.check_activation(owner, id) {
            Ok(()) => true,
            Err(error) => {
                debug!(
                    target: "gameplay::abilities",
                    owner = %owner,
                    id = id.0,
                    error = %error,
                    "Activation refused"
                );
                false
            }
        }
    }

    /// Sets the targets, checks the gate and activates.
    pub fn try_activate(&mut self, owner: EntityId, id: AbilitySpecId, targets: &[EntityId]) -> bool {
        if !self.can_activate(owner, id) {
            return false;
        }
        if let Some(spec) = self.ability_mut(owner, id) {
            spec.targets = targets.iter().copied().collect();
        }
        self.activate_ability(owner, id);
        true
    }

    /// Activates without checking the gate.
    ///
    /// Targets failing the target requirements are dropped. Matching active
    /// abilities on the remaining targets are ended, activation tags go to the
    /// owner and the behavior runs last.
    pub fn activate_ability(&mut self, owner: EntityId, id: AbilitySpecId) {
        let Some(spec) = self.ability_mut(owner, id) else {
            return;
        };
        spec.active = true;
        let def = Arc::clone(spec.def());
        let source = spec.source;
        let candidates: Vec<EntityId> = spec.targets.iter().copied().collect();

        let requirements = &def.tags().target;
        let targets: Vec<EntityId> = candidates
            .into_iter()
            .filter(|&target| {
                let kept = self
                    .actor(target)
                    .is_some_and(|actor| actor.tags().satisfies(requirements));
                if !kept {
                    trace!(
                        target: "gameplay::abilities",
                        owner = %owner,
                        dropped = %target,
                        "Target fails requirements"
                    );
                }
                kept
            })
            .collect();
        if let Some(spec) = self.ability_mut(owner, id) {
            spec.targets = targets.iter().copied().collect();
        }

        let cancel = &def.tags().cancel_abilities_with;
        if !cancel.is_empty() {
            for &target in &targets {
                let Some(actor) = self.actor(target) else {
                    continue;
                };
                let cancelled: Vec<AbilitySpecId> = actor
                    .abilities
                    .iter()
                    .filter(|other| other.is_active() && !(target == owner && other.id() == id))
                    .filter(|other| {
                        other
                            .def()
                            .tags()
                            .ability_tag
                            .is_some_and(|tag| cancel.contains(&tag))
                    })
                    .map(AbilitySpec::id)
                    .collect();
                for other in cancelled {
                    self.end_ability(target, other);
                }
            }
        }

        if let Some(actor) = self.actors.get_mut(&owner) {
            actor.tags.add_tags(&def.tags().activation_tags);
        }

        debug!(
            target: "gameplay::abilities",
            owner = %owner,
            ability = def.name(),
            targets = targets.len(),
            "Ability activated"
        );
        let invocation = AbilityInvocation {
            id,
            owner,
            source,
            targets,
        };
        Arc::clone(def.behavior()).on_activate(self, &invocation);
    }

    /// Ends an active ability: activation tags are revoked and targets
    /// cleared. Returns false if it was not active.
    pub fn end_ability(&mut self, owner: EntityId, id: AbilitySpecId) -> bool {
        let Some(actor) = self.actors.get_mut(&owner) else {
            return false;
        };
        let Some(spec) = actor.abilities.get_mut(id) else {
            return false;
        };
        if !spec.active {
            return false;
        }

        spec.active = false;
        spec.targets.clear();
        let spec = spec.clone();
        actor.tags.remove_tags(&spec.def().tags().activation_tags);
        spec.def().behavior().on_end(&spec);

        debug!(
            target: "gameplay::abilities",
            owner = %owner,
            ability = spec.def().name(),
            "Ability ended"
        );
        true
    }
}
