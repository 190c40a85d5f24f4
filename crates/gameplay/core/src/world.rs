//! Composition root owning every entity's gameplay state.
//!
//! Cross-entity operations (a source applying an effect to a target, an
//! ability cancelling abilities on its targets) are inherent methods on
//! [`World`] implemented next to their subsystem. Actors only ever hold ids
//! of each other.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::abilities::{AbilitySpecId, GrantedAbilities};
use crate::attributes::{AttributeLedger, StatsInitializer};
use crate::config::GameplayConfig;
use crate::effects::{ActiveEffectHandle, ActiveEffects};
use crate::entity::EntityId;
use crate::rng::{PcgRng, RngOracle, compute_seed};
use crate::tags::{TagContainer, TagRegistry};

/// Gameplay state of one entity.
#[derive(Debug)]
pub struct Actor {
    id: EntityId,
    name: String,
    enabled: bool,
    pub(crate) tags: TagContainer,
    pub(crate) attributes: AttributeLedger,
    pub(crate) effects: ActiveEffects,
    pub(crate) abilities: GrantedAbilities,
}

impl Actor {
    fn new(id: EntityId, name: String, registry: Arc<TagRegistry>, query_depth: usize) -> Self {
        Self {
            id,
            name,
            enabled: true,
            tags: TagContainer::new(id, registry, query_depth),
            attributes: AttributeLedger::new(id),
            effects: ActiveEffects::new(),
            abilities: GrantedAbilities::default(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Disabled actors cannot activate abilities.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tags(&self) -> &TagContainer {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagContainer {
        &mut self.tags
    }

    pub fn attributes(&self) -> &AttributeLedger {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeLedger {
        &mut self.attributes
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// For registering hooks and observers. The active list itself is only
    /// changed through the world.
    pub fn effects_mut(&mut self) -> &mut ActiveEffects {
        &mut self.effects
    }

    pub fn abilities(&self) -> &GrantedAbilities {
        &self.abilities
    }

    /// For registering observers.
    pub fn abilities_mut(&mut self) -> &mut GrantedAbilities {
        &mut self.abilities
    }
}

/// All actors plus the shared tag registry, config and RNG oracle.
pub struct World {
    pub(crate) config: GameplayConfig,
    pub(crate) tags: Arc<TagRegistry>,
    pub(crate) actors: BTreeMap<EntityId, Actor>,
    rng: Box<dyn RngOracle>,
    /// Incremented per chance roll, combined with the seed.
    roll_nonce: Cell<u64>,
    next_entity_id: u32,
    next_effect_handle: u64,
    next_ability_id: u32,
}

impl World {
    /// Freezes `tags` and creates an empty world.
    pub fn new(config: GameplayConfig, tags: TagRegistry) -> Self {
        Self {
            config,
            tags: Arc::new(tags),
            actors: BTreeMap::new(),
            rng: Box::new(PcgRng),
            roll_nonce: Cell::new(0),
            next_entity_id: 0,
            next_effect_handle: 0,
            next_ability_id: 0,
        }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    pub fn tag_registry(&self) -> &TagRegistry {
        &self.tags
    }

    // ========================================================================
    // Actors
    // ========================================================================

    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let name = name.into();
        debug!(target: "gameplay::world", entity = %id, name = %name, "Actor spawned");
        let actor = Actor::new(
            id,
            name,
            Arc::clone(&self.tags),
            self.config.default_query_depth,
        );
        self.actors.insert(id, actor);
        id
    }

    /// Spawns an actor and seeds its ledger from `stats`.
    pub fn spawn_with(&mut self, name: impl Into<String>, stats: &StatsInitializer) -> EntityId {
        let id = self.spawn(name);
        if let Some(actor) = self.actors.get_mut(&id) {
            stats.apply(&mut actor.attributes);
        }
        id
    }

    /// Ends and removes every ability, evicts every effect, then drops the
    /// actor. Returns false for unknown ids.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.remove_all_abilities(entity);
        self.clear_effects(entity);
        self.actors.remove(&entity);
        debug!(target: "gameplay::world", entity = %entity, "Actor despawned");
        true
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.actors.contains_key(&entity)
    }

    pub fn actor(&self, entity: EntityId) -> Option<&Actor> {
        self.actors.get(&entity)
    }

    pub fn actor_mut(&mut self, entity: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&entity)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn set_enabled(&mut self, entity: EntityId, enabled: bool) -> bool {
        match self.actors.get_mut(&entity) {
            Some(actor) => {
                actor.enabled = enabled;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Randomness and id allocation
    // ========================================================================

    /// Rolls `probability` for an interaction between two entities.
    ///
    /// Each call consumes one nonce, so repeated rolls differ while a replay
    /// of the same call sequence from the same seed repeats exactly.
    pub fn roll_chance(&self, source: EntityId, target: EntityId, probability: f32) -> bool {
        let nonce = self.roll_nonce.get();
        self.roll_nonce.set(nonce.wrapping_add(1));

        let seed = compute_seed(self.config.rng_seed, nonce, source.0, target.0);
        let hit = self.rng.chance(seed, probability);
        trace!(
            target: "gameplay::world",
            source = %source,
            target_entity = %target,
            probability,
            hit,
            "Chance roll"
        );
        hit
    }

    pub(crate) fn allocate_effect_handle(&mut self) -> ActiveEffectHandle {
        let handle = ActiveEffectHandle(self.next_effect_handle);
        self.next_effect_handle += 1;
        handle
    }

    pub(crate) fn allocate_ability_id(&mut self) -> AbilitySpecId {
        let id = AbilitySpecId(self.next_ability_id);
        self.next_ability_id += 1;
        id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameplayConfig::default(), TagRegistry::default())
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("tags", &self.tags.len())
            .field("actors", &self.actors)
            .finish_non_exhaustive()
    }
}
