//! Gameplay configuration loader.

use std::path::Path;

use gameplay_core::GameplayConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for gameplay configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameplayConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameplayConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rng_seed = 99").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.rng_seed, 99);
        assert_eq!(config.max_tag_depth, GameplayConfig::DEFAULT_MAX_TAG_DEPTH);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(ConfigLoader::parse("max_tag_depth = \"deep\"").is_err());
        assert!(ConfigLoader::load(Path::new("/definitely/not/here.toml")).is_err());
    }
}
