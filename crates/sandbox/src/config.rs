//! Sandbox run configuration.
use std::env;
use std::path::PathBuf;

/// Settings read from the environment (or a `.env` file).
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Directory holding `config.toml`, `tags.ron` and `stats.ron`.
    /// Built-in content is used when unset.
    pub data_dir: Option<PathBuf>,
    pub max_rounds: u32,
    /// Seconds advanced per round.
    pub tick: f32,
}

impl SandboxConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 20;
    pub const DEFAULT_TICK: f32 = 1.0;

    /// Construct sandbox configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GAMEPLAY_DATA_DIR` - content directory (default: built-in content)
    /// - `SANDBOX_MAX_ROUNDS` - round limit (default: 20)
    /// - `SANDBOX_TICK` - seconds per round (default: 1.0)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var_os("GAMEPLAY_DATA_DIR").map(PathBuf::from);
        if let Some(rounds) = read_env::<u32>("SANDBOX_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Some(tick) = read_env::<f32>("SANDBOX_TICK")
            && tick.is_finite()
            && tick > 0.0
        {
            config.tick = tick;
        }

        config
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            tick: Self::DEFAULT_TICK,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
