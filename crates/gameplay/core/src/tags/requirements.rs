use super::{TagContainer, TagId};

/// Pair of tag sets gating an ability or effect.
///
/// Satisfied when the container holds every `require` tag and none of the
/// `ignore` tags, both checked hierarchically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagRequirements {
    pub require: Vec<TagId>,
    pub ignore: Vec<TagId>,
}

impl TagRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn require(mut self, tag: TagId) -> Self {
        self.require.push(tag);
        self
    }

    #[must_use]
    pub fn ignore(mut self, tag: TagId) -> Self {
        self.ignore.push(tag);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.require.is_empty() && self.ignore.is_empty()
    }

    pub fn is_satisfied_by(&self, container: &TagContainer) -> bool {
        container.has_all(&self.require) && !container.has_any(&self.ignore)
    }
}
