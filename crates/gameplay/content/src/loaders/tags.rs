//! Tag tree loader.

use std::path::Path;

use gameplay_core::{GameplayConfig, TagError, TagRegistry};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    #[serde(default)]
    parent: Option<String>,
}

/// A registry built from a file, with the edges that had to be severed.
#[derive(Debug)]
pub struct LoadedTags {
    pub registry: TagRegistry,
    pub diagnostics: Vec<TagError>,
}

/// Loader for tag trees from RON files.
pub struct TagLoader;

impl TagLoader {
    /// Load a tag tree from a RON file.
    ///
    /// RON format: `[(name: "Status"), (name: "Burning", parent: Some("Status"))]`
    ///
    /// Every name is defined first, so a child may be listed before its
    /// parent. Invalid edges (self-parent, cycles, too deep) are severed and
    /// reported in [`LoadedTags::diagnostics`]; a parent name that is never
    /// defined fails the whole load.
    pub fn load(path: &Path, config: &GameplayConfig) -> LoadResult<LoadedTags> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &GameplayConfig) -> LoadResult<LoadedTags> {
        let entries: Vec<TagEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tag tree RON: {}", e))?;

        let mut registry = TagRegistry::from_config(config);
        for entry in &entries {
            registry.define(entry.name.as_str());
        }

        let mut diagnostics = Vec::new();
        for entry in &entries {
            let Some(parent_name) = &entry.parent else {
                continue;
            };
            let parent = registry.find(parent_name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Tag '{}' names unknown parent '{}'",
                    entry.name,
                    parent_name
                )
            })?;
            let tag = registry
                .find(&entry.name)
                .ok_or_else(|| anyhow::anyhow!("Tag '{}' vanished while loading", entry.name))?;

            if let Err(defect) = registry.set_parent(tag, Some(parent)) {
                diagnostics.push(defect);
            }
        }
        diagnostics.extend(registry.validate_all());

        Ok(LoadedTags {
            registry,
            diagnostics,
        })
    }
}
