use std::collections::HashMap;

use tracing::error;

use crate::config::GameplayConfig;

use super::TagError;

/// Stable index of a tag inside its [`TagRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagId(pub u32);

impl TagId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct TagNode {
    name: String,
    parent: Option<TagId>,
}

/// Arena of named tags with single-parent links.
///
/// Every parent edit is validated against self-parenting, cycles and the
/// depth bound. A failing edit is repaired by clearing the parent link; the
/// defect is logged and handed back to the caller.
#[derive(Clone, Debug)]
pub struct TagRegistry {
    nodes: Vec<TagNode>,
    by_name: HashMap<String, TagId>,
    max_depth: usize,
}

impl TagRegistry {
    pub fn new(max_depth: usize) -> Self {
        Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
            max_depth,
        }
    }

    pub fn from_config(config: &GameplayConfig) -> Self {
        Self::new(config.max_tag_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registers a root tag, or returns the id already bound to `name`.
    pub fn define(&mut self, name: impl Into<String>) -> TagId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }

        let id = TagId(self.nodes.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.nodes.push(TagNode { name, parent: None });
        id
    }

    /// Registers `name` under `parent`.
    ///
    /// On a rejected edge the tag still exists as a root; the error names the
    /// defect that was repaired.
    pub fn define_child(
        &mut self,
        name: impl Into<String>,
        parent: TagId,
    ) -> Result<TagId, TagError> {
        let id = self.define(name);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Changes the parent of `tag` and validates the new edge, including the
    /// depth of every tag already below it.
    pub fn set_parent(&mut self, tag: TagId, parent: Option<TagId>) -> Result<(), TagError> {
        if tag.index() >= self.nodes.len() {
            return Err(TagError::UnknownTag(tag));
        }
        if let Some(parent) = parent
            && parent.index() >= self.nodes.len()
        {
            return Err(TagError::UnknownTag(parent));
        }

        self.nodes[tag.index()].parent = parent;
        self.repair(tag)
    }

    /// Validates every edge in the arena, repairing each defect found.
    ///
    /// Use after bulk-loading a tree whose edges bypassed [`set_parent`].
    ///
    /// [`set_parent`]: Self::set_parent
    pub fn validate_all(&mut self) -> Vec<TagError> {
        (0..self.nodes.len() as u32)
            .filter_map(|index| self.repair(TagId(index)).err())
            .collect()
    }

    /// Checks the parent edge of `tag` without touching the arena.
    pub fn validate_edge(&self, tag: TagId) -> Result<(), TagError> {
        let Some(parent) = self.parent(tag) else {
            return Ok(());
        };

        if parent == tag {
            return Err(TagError::SelfParent {
                tag: self.display_name(tag),
            });
        }

        if self.is_descendant_of(parent, tag, self.max_depth) {
            return Err(TagError::Cycle {
                tag: self.display_name(tag),
                parent: self.display_name(parent),
            });
        }

        // Walk is bounded so a cycle further up the chain cannot spin forever.
        let mut depth = 0;
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            depth += 1;
            if depth > self.max_depth {
                return Err(TagError::DepthExceeded {
                    tag: self.display_name(tag),
                    max_depth: self.max_depth,
                });
            }
            cursor = self.parent(current);
        }

        // The edge also carries everything already hanging below `tag`.
        if depth + self.subtree_height(tag) > self.max_depth {
            return Err(TagError::DepthExceeded {
                tag: self.display_name(tag),
                max_depth: self.max_depth,
            });
        }

        Ok(())
    }

    /// Longest run of parent links from any descendant up to `tag`.
    fn subtree_height(&self, tag: TagId) -> usize {
        (0..self.nodes.len() as u32)
            .filter_map(|index| self.links_to(TagId(index), tag))
            .max()
            .unwrap_or(0)
    }

    /// Parent links from `from` up to `ancestor`, if reached within one past
    /// the max depth.
    fn links_to(&self, from: TagId, ancestor: TagId) -> Option<usize> {
        let mut links = 1;
        let mut cursor = self.parent(from);
        while let Some(current) = cursor {
            if current == ancestor {
                return Some(links);
            }
            if links > self.max_depth {
                return None;
            }
            links += 1;
            cursor = self.parent(current);
        }
        None
    }

    fn repair(&mut self, tag: TagId) -> Result<(), TagError> {
        let result = self.validate_edge(tag);
        if let Err(defect) = &result {
            error!(
                target: "gameplay::tags",
                tag = %self.display_name(tag),
                error = %defect,
                "Invalid tag parent, clearing link"
            );
            self.nodes[tag.index()].parent = None;
        }
        result
    }

    pub fn find(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, tag: TagId) -> Option<&str> {
        self.nodes.get(tag.index()).map(|node| node.name.as_str())
    }

    pub fn parent(&self, tag: TagId) -> Option<TagId> {
        self.nodes.get(tag.index()).and_then(|node| node.parent)
    }

    /// Number of parent links above `tag`, capped one past the max depth.
    pub fn depth(&self, tag: TagId) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(tag);
        while let Some(current) = cursor {
            depth += 1;
            if depth > self.max_depth {
                break;
            }
            cursor = self.parent(current);
        }
        depth
    }

    /// Iterates `(id, name)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &str)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (TagId(index as u32), node.name.as_str()))
    }

    /// Walks at most `max_depth` parent links from `tag` looking for `ancestor`.
    ///
    /// A tag is not its own descendant, and depth 0 never matches.
    pub fn is_descendant_of(&self, tag: TagId, ancestor: TagId, max_depth: usize) -> bool {
        let mut cursor = self.parent(tag);
        let mut remaining = max_depth;
        while remaining > 0 {
            match cursor {
                None => return false,
                Some(current) if current == ancestor => return true,
                Some(current) => cursor = self.parent(current),
            }
            remaining -= 1;
        }
        false
    }

    /// True when `held` equals `queried` or descends from it within `depth`.
    pub fn matches(&self, held: TagId, queried: TagId, depth: usize) -> bool {
        held == queried || self.is_descendant_of(held, queried, depth)
    }

    fn display_name(&self, tag: TagId) -> String {
        self.name(tag)
            .map_or_else(|| format!("{tag:?}"), str::to_owned)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::from_config(&GameplayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(registry: &mut TagRegistry, length: usize) -> Vec<TagId> {
        let mut ids = vec![registry.define("t0")];
        for index in 1..length {
            let parent = ids[index - 1];
            ids.push(registry.define_child(format!("t{index}"), parent).unwrap());
        }
        ids
    }

    #[test]
    fn define_is_idempotent_by_name() {
        let mut registry = TagRegistry::default();
        let a = registry.define("Status");
        let b = registry.define("Status");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("Status"), Some(a));
        assert_eq!(registry.name(a), Some("Status"));
    }

    #[test]
    fn descendant_walk_respects_depth() {
        let mut registry = TagRegistry::default();
        let ids = chain(&mut registry, 3);
        let (root, child, grandchild) = (ids[0], ids[1], ids[2]);

        assert!(registry.is_descendant_of(child, root, 1));
        assert!(!registry.is_descendant_of(child, root, 0));
        assert!(!registry.is_descendant_of(grandchild, root, 1));
        assert!(registry.is_descendant_of(grandchild, root, 2));
        assert!(!registry.is_descendant_of(root, root, 5));
        assert!(!registry.is_descendant_of(root, child, 5));
    }

    #[test]
    fn self_parent_is_severed() {
        let mut registry = TagRegistry::default();
        let tag = registry.define("Loop");

        let result = registry.set_parent(tag, Some(tag));
        assert!(matches!(result, Err(TagError::SelfParent { .. })));
        assert_eq!(registry.parent(tag), None);
    }

    #[test]
    fn cycle_is_severed_at_the_edited_edge() {
        let mut registry = TagRegistry::default();
        let ids = chain(&mut registry, 3);

        let result = registry.set_parent(ids[0], Some(ids[2]));
        assert!(matches!(result, Err(TagError::Cycle { .. })));
        assert_eq!(registry.parent(ids[0]), None);
        // untouched edges survive
        assert_eq!(registry.parent(ids[2]), Some(ids[1]));
    }

    #[test]
    fn depth_overflow_is_severed() {
        let mut registry = TagRegistry::new(3);
        let ids = chain(&mut registry, 4);
        assert_eq!(registry.depth(ids[3]), 3);

        let leaf = registry.define("too_deep");
        let result = registry.set_parent(leaf, Some(ids[3]));
        assert!(matches!(
            result,
            Err(TagError::DepthExceeded { max_depth: 3, .. })
        ));
        assert_eq!(registry.parent(leaf), None);
    }

    #[test]
    fn subtree_height_counts_links_to_the_deepest_descendant() {
        let mut registry = TagRegistry::default();
        let ids = chain(&mut registry, 4);
        let side = registry.define_child("side", ids[1]).unwrap();

        assert_eq!(registry.subtree_height(ids[0]), 3);
        assert_eq!(registry.subtree_height(ids[1]), 2);
        assert_eq!(registry.subtree_height(ids[3]), 0);
        assert_eq!(registry.subtree_height(side), 0);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut registry = TagRegistry::default();
        let tag = registry.define("Only");
        assert_eq!(
            registry.set_parent(tag, Some(TagId(9))),
            Err(TagError::UnknownTag(TagId(9)))
        );
        assert_eq!(
            registry.set_parent(TagId(4), None),
            Err(TagError::UnknownTag(TagId(4)))
        );
    }

    #[test]
    fn validate_all_reports_nothing_on_a_clean_tree() {
        let mut registry = TagRegistry::default();
        chain(&mut registry, 5);
        assert!(registry.validate_all().is_empty());
    }
}
