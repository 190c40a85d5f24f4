//! Content selection: a data directory or the bundled sample files.
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use gameplay_content::{ConfigLoader, ContentFactory, LoadedTags, StatsLoader, TagLoader};
use gameplay_core::{Attribute, GameplayConfig, StatsInitializer, TagRegistry};
use tracing::{info, warn};

const BUILTIN_CONFIG: &str = include_str!("../data/config.toml");
const BUILTIN_TAGS: &str = include_str!("../data/tags.ron");
const BUILTIN_STATS: &str = include_str!("../data/stats.ron");

pub struct Content {
    pub config: GameplayConfig,
    pub tags: TagRegistry,
    pub stats: BTreeMap<String, StatsInitializer>,
}

impl Content {
    pub fn load(data_dir: Option<&Path>, catalog: &[Attribute]) -> Result<Self> {
        let (config, loaded, stats) = match data_dir {
            Some(dir) => {
                info!(target: "sandbox", data_dir = %dir.display(), "Loading content");
                let factory = ContentFactory::new(dir);
                let config = factory.load_config()?;
                let loaded = factory.load_tags(&config)?;
                let stats = factory.load_stats(catalog)?;
                (config, loaded, stats)
            }
            None => {
                info!(target: "sandbox", "Using built-in content");
                let config = ConfigLoader::parse(BUILTIN_CONFIG)?;
                let loaded = TagLoader::parse(BUILTIN_TAGS, &config)?;
                let stats = StatsLoader::parse(BUILTIN_STATS, catalog)?;
                (config, loaded, stats)
            }
        };

        let LoadedTags {
            registry,
            diagnostics,
        } = loaded;
        for defect in &diagnostics {
            warn!(target: "sandbox", error = %defect, "Repaired tag tree");
        }

        Ok(Self {
            config,
            tags: registry,
            stats,
        })
    }
}
