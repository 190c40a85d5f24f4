use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::tags::{TagId, TagRequirements};

use super::{AbilityBehavior, AbilityCondition, NoopBehavior};

/// Tag rules of an ability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityTags {
    /// Identifies the ability for cancel and block lists.
    pub ability_tag: Option<TagId>,
    /// Active abilities on each target carrying one of these tags are ended.
    pub cancel_abilities_with: Vec<TagId>,
    /// While active, the owner cannot activate abilities carrying these tags.
    pub block_abilities_with: Vec<TagId>,
    /// Granted to the owner for as long as the ability is active.
    pub activation_tags: Vec<TagId>,
    pub owner: TagRequirements,
    pub source: TagRequirements,
    pub target: TagRequirements,
}

/// Immutable authoring data for an ability.
pub struct AbilityDef {
    name: String,
    tags: AbilityTags,
    conditions: Vec<Arc<dyn AbilityCondition>>,
    behavior: Arc<dyn AbilityBehavior>,
    contexts: Vec<Arc<dyn Any + Send + Sync>>,
}

impl AbilityDef {
    pub fn builder(name: impl Into<String>) -> AbilityDefBuilder {
        AbilityDefBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &AbilityTags {
        &self.tags
    }

    pub fn conditions(&self) -> &[Arc<dyn AbilityCondition>] {
        &self.conditions
    }

    pub fn behavior(&self) -> &Arc<dyn AbilityBehavior> {
        &self.behavior
    }

    /// First attached context of type `T`.
    pub fn context<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.contexts
            .iter()
            .find_map(|context| context.downcast_ref::<T>())
    }

    pub fn is_same(a: &Arc<AbilityDef>, b: &Arc<AbilityDef>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Debug for AbilityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityDef")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("conditions", &self.conditions.len())
            .field("contexts", &self.contexts.len())
            .finish_non_exhaustive()
    }
}

pub struct AbilityDefBuilder {
    def: AbilityDef,
}

impl AbilityDefBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            def: AbilityDef {
                name: name.into(),
                tags: AbilityTags::default(),
                conditions: Vec::new(),
                behavior: Arc::new(NoopBehavior),
                contexts: Vec::new(),
            },
        }
    }

    pub fn ability_tag(mut self, tag: TagId) -> Self {
        self.def.tags.ability_tag = Some(tag);
        self
    }

    pub fn cancels(mut self, tag: TagId) -> Self {
        self.def.tags.cancel_abilities_with.push(tag);
        self
    }

    pub fn blocks(mut self, tag: TagId) -> Self {
        self.def.tags.block_abilities_with.push(tag);
        self
    }

    pub fn activation_tag(mut self, tag: TagId) -> Self {
        self.def.tags.activation_tags.push(tag);
        self
    }

    pub fn owner_requirements(mut self, requirements: TagRequirements) -> Self {
        self.def.tags.owner = requirements;
        self
    }

    pub fn source_requirements(mut self, requirements: TagRequirements) -> Self {
        self.def.tags.source = requirements;
        self
    }

    pub fn target_requirements(mut self, requirements: TagRequirements) -> Self {
        self.def.tags.target = requirements;
        self
    }

    pub fn condition(mut self, condition: impl AbilityCondition + 'static) -> Self {
        self.def.conditions.push(Arc::new(condition));
        self
    }

    pub fn behavior(mut self, behavior: impl AbilityBehavior + 'static) -> Self {
        self.def.behavior = Arc::new(behavior);
        self
    }

    /// Attaches designer data retrievable with [`AbilityDef::context`].
    pub fn context<T: Any + Send + Sync>(mut self, context: T) -> Self {
        self.def.contexts.push(Arc::new(context));
        self
    }

    pub fn build(self) -> Arc<AbilityDef> {
        Arc::new(self.def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Range(f32);

    #[derive(Debug, PartialEq)]
    struct Cooldown(f32);

    #[test]
    fn contexts_are_found_by_type() {
        let def = AbilityDef::builder("Fireball")
            .context(Range(12.0))
            .context(Cooldown(3.0))
            .build();

        assert_eq!(def.context::<Range>(), Some(&Range(12.0)));
        assert_eq!(def.context::<Cooldown>(), Some(&Cooldown(3.0)));
        assert_eq!(def.context::<String>(), None);
    }

    #[test]
    fn identity_is_by_allocation() {
        let a = AbilityDef::builder("Dash").build();
        let b = AbilityDef::builder("Dash").build();
        assert!(AbilityDef::is_same(&a, &a.clone()));
        assert!(!AbilityDef::is_same(&a, &b));
    }
}
