//! Content factory for loading a data directory.

use std::collections::BTreeMap;
use std::path::PathBuf;

use gameplay_core::{Attribute, GameplayConfig, StatsInitializer};

use crate::loaders::{ConfigLoader, LoadResult, LoadedTags, StatsLoader, TagLoader};

/// Loads gameplay content from a data directory.
///
/// Expected layout:
/// - `config.toml`
/// - `tags.ron`
/// - `stats.ron`
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    /// Falls back to defaults when `config.toml` is absent.
    pub fn load_config(&self) -> LoadResult<GameplayConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameplayConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_tags(&self, config: &GameplayConfig) -> LoadResult<LoadedTags> {
        TagLoader::load(&self.data_dir.join("tags.ron"), config)
    }

    pub fn load_stats(
        &self,
        catalog: &[Attribute],
    ) -> LoadResult<BTreeMap<String, StatsInitializer>> {
        StatsLoader::load(&self.data_dir.join("stats.ron"), catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn loads_a_full_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "max_tag_depth = 4\n").unwrap();
        fs::write(
            dir.path().join("tags.ron"),
            r#"[(name: "Status"), (name: "Status.Stun", parent: Some("Status"))]"#,
        )
        .unwrap();
        fs::write(dir.path().join("stats.ron"), r#"{ "hero": [("Health", 50.0)] }"#).unwrap();

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config().unwrap();
        assert_eq!(config.max_tag_depth, 4);

        let tags = factory.load_tags(&config).unwrap();
        assert_eq!(tags.registry.max_depth(), 4);
        assert!(tags.diagnostics.is_empty());

        let stats = factory.load_stats(&[]).unwrap();
        assert!(stats.contains_key("hero"));
    }

    #[test]
    fn missing_config_uses_defaults_but_missing_tags_fails() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameplayConfig::default());
        assert!(factory.load_tags(&GameplayConfig::default()).is_err());
    }
}
