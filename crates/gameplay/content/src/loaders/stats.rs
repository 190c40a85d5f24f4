//! Archetype stats loader.

use std::collections::BTreeMap;
use std::path::Path;

use gameplay_core::{Attribute, StatsInitializer};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-archetype starting stats from RON files.
pub struct StatsLoader;

impl StatsLoader {
    /// Load archetype stats from a RON file.
    ///
    /// RON format: `{ "warrior": [("Health", 120.0), ("Mana", 10.0)] }`
    ///
    /// Attribute names resolve against `catalog` so custom calculators
    /// (clamps and the like) survive loading. A name missing from the
    /// catalog becomes a plain attribute with the standard formula.
    pub fn load(
        path: &Path,
        catalog: &[Attribute],
    ) -> LoadResult<BTreeMap<String, StatsInitializer>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(
        content: &str,
        catalog: &[Attribute],
    ) -> LoadResult<BTreeMap<String, StatsInitializer>> {
        let raw: BTreeMap<String, Vec<(String, f32)>> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats RON: {}", e))?;

        raw.into_iter()
            .map(|(archetype, entries)| {
                let mut stats = StatsInitializer::new();
                for (name, base_value) in entries {
                    if !base_value.is_finite() {
                        anyhow::bail!(
                            "Archetype '{}' has non-finite base value for '{}'",
                            archetype,
                            name
                        );
                    }
                    let attribute = catalog
                        .iter()
                        .find(|attribute| attribute.name() == name)
                        .cloned()
                        .unwrap_or_else(|| Attribute::new(name));
                    stats.push(attribute, base_value);
                }
                Ok((archetype, stats))
            })
            .collect()
    }
}
