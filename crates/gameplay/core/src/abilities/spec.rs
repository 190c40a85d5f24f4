use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::entity::EntityId;

use super::AbilityDef;

/// Identifies a granted ability across the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpecId(pub u32);

/// An ability granted to one owner.
#[derive(Clone, Debug)]
pub struct AbilitySpec {
    id: AbilitySpecId,
    def: Arc<AbilityDef>,
    owner: EntityId,
    pub(crate) source: EntityId,
    pub(crate) targets: BTreeSet<EntityId>,
    pub(crate) active: bool,
}

impl AbilitySpec {
    pub(crate) fn new(id: AbilitySpecId, def: Arc<AbilityDef>, owner: EntityId) -> Self {
        Self {
            id,
            def,
            owner,
            source: owner,
            targets: BTreeSet::new(),
            active: false,
        }
    }

    pub fn id(&self) -> AbilitySpecId {
        self.id
    }

    pub fn def(&self) -> &Arc<AbilityDef> {
        &self.def
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Entity the ability acts through. Defaults to the owner.
    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn targets(&self) -> &BTreeSet<EntityId> {
        &self.targets
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Snapshot handed to [`AbilityBehavior::on_activate`](super::AbilityBehavior).
#[derive(Clone, Debug)]
pub struct AbilityInvocation {
    pub id: AbilitySpecId,
    pub owner: EntityId,
    pub source: EntityId,
    /// Targets that passed the target tag requirements.
    pub targets: Vec<EntityId>,
}

/// Grant/removal notifications for one owner.
pub trait AbilityObserver: Send + Sync {
    fn on_granted(&self, _spec: &AbilitySpec) {}

    fn on_removed(&self, _spec: &AbilitySpec) {}
}

/// Abilities granted to one entity, at most one per definition.
#[derive(Default)]
pub struct GrantedAbilities {
    pub(crate) specs: Vec<AbilitySpec>,
    pub(crate) observers: Vec<Arc<dyn AbilityObserver>>,
}

impl GrantedAbilities {
    pub fn iter(&self) -> impl Iterator<Item = &AbilitySpec> + '_ {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, id: AbilitySpecId) -> Option<&AbilitySpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: AbilitySpecId) -> Option<&mut AbilitySpec> {
        self.specs.iter_mut().find(|spec| spec.id == id)
    }

    pub fn find_by_def(&self, def: &Arc<AbilityDef>) -> Option<&AbilitySpec> {
        self.specs
            .iter()
            .find(|spec| AbilityDef::is_same(&spec.def, def))
    }

    pub fn subscribe(&mut self, observer: Arc<dyn AbilityObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for GrantedAbilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantedAbilities")
            .field("specs", &self.specs)
            .field("observers", &self.observers.len())
            .finish()
    }
}
