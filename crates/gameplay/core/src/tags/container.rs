use std::fmt;
use std::sync::Arc;

use crate::entity::EntityId;

use super::{TagId, TagRegistry, TagRequirements};

/// Receives tag changes on a container, in registration order.
pub trait TagListener: Send + Sync {
    /// Called once per `add_tags` call with every tag that was appended.
    fn on_tags_added(&self, _owner: EntityId, _tags: &[TagId]) {}

    /// Called once per removed tag.
    fn on_tag_removed(&self, _owner: EntityId, _tag: TagId) {}
}

/// Tags currently granted to one entity.
///
/// The same tag may be held more than once (e.g. granted by two effects);
/// each removal takes away a single occurrence.
pub struct TagContainer {
    owner: EntityId,
    registry: Arc<TagRegistry>,
    query_depth: usize,
    tags: Vec<TagId>,
    listeners: Vec<Arc<dyn TagListener>>,
}

impl TagContainer {
    pub fn new(owner: EntityId, registry: Arc<TagRegistry>, query_depth: usize) -> Self {
        Self {
            owner,
            registry,
            query_depth,
            tags: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn TagListener>) {
        self.listeners.push(listener);
    }

    /// Exact membership, ignoring the hierarchy.
    pub fn contains(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }

    /// Hierarchical membership at the configured query depth.
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.has_tag_within(tag, self.query_depth)
    }

    /// True if a held tag equals `tag` or descends from it within `depth`.
    pub fn has_tag_within(&self, tag: TagId, depth: usize) -> bool {
        self.tags
            .iter()
            .any(|&held| self.registry.matches(held, tag, depth))
    }

    /// True if any of `tags` is held. An empty set never matches.
    pub fn has_any(&self, tags: &[TagId]) -> bool {
        tags.iter().any(|&tag| self.has_tag(tag))
    }

    /// True if every one of `tags` is held. An empty set always matches.
    pub fn has_all(&self, tags: &[TagId]) -> bool {
        tags.iter().all(|&tag| self.has_tag(tag))
    }

    pub fn has_none(&self, tags: &[TagId]) -> bool {
        !self.has_any(tags)
    }

    pub fn satisfies(&self, requirements: &TagRequirements) -> bool {
        requirements.is_satisfied_by(self)
    }

    pub fn add_tag(&mut self, tag: TagId) {
        self.add_tags(&[tag]);
    }

    /// Appends `tags` and notifies listeners once.
    pub fn add_tags(&mut self, tags: &[TagId]) {
        if tags.is_empty() {
            return;
        }
        self.tags.extend_from_slice(tags);
        for listener in &self.listeners {
            listener.on_tags_added(self.owner, tags);
        }
    }

    pub fn remove_tag(&mut self, tag: TagId) {
        self.remove_tags(&[tag]);
    }

    /// Removes one occurrence of each tag, notifying per removed tag.
    pub fn remove_tags(&mut self, tags: &[TagId]) {
        for &tag in tags {
            let Some(position) = self.tags.iter().position(|&held| held == tag) else {
                continue;
            };
            self.tags.remove(position);
            for listener in &self.listeners {
                listener.on_tag_removed(self.owner, tag);
            }
        }
    }

    /// Drops every tag without notifying.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl fmt::Debug for TagContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagContainer")
            .field("owner", &self.owner)
            .field("tags", &self.tags)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
