/// Gameplay configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameplayConfig {
    /// Maximum number of parent links a tag may have. Bounds authoring-time
    /// validation and every hierarchy walk.
    pub max_tag_depth: usize,

    /// Depth used by container queries that do not pass one explicitly
    /// (ability gating, effect tag requirements).
    pub default_query_depth: usize,

    /// Seed for deterministic chance rolls.
    pub rng_seed: u64,
}

impl GameplayConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TAG_DEPTH: usize = 10;
    pub const DEFAULT_RNG_SEED: u64 = 0;

    pub fn new() -> Self {
        Self {
            max_tag_depth: Self::DEFAULT_MAX_TAG_DEPTH,
            default_query_depth: Self::DEFAULT_MAX_TAG_DEPTH,
            rng_seed: Self::DEFAULT_RNG_SEED,
        }
    }

    /// Uses the same bound for authoring validation and container queries.
    pub fn with_max_tag_depth(max_tag_depth: usize) -> Self {
        Self {
            max_tag_depth,
            default_query_depth: max_tag_depth,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_query_depth(mut self, depth: usize) -> Self {
        self.default_query_depth = depth;
        self
    }

    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self::new()
    }
}
