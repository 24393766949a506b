//! Display configuration and loaders.

use std::env;

/// Longest path a beam overlay remembers for reverting on close.
pub const MAX_TRANSIENT_CELLS: usize = 80;

/// Squared distance inside which generic danger warnings are shown.
pub const WARNING_DISTANCE_SQUARED: i32 = 100;

/// Display-wide settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Corridors in view are drawn lit even when not remembered lit.
    pub lit_corridor: bool,
    /// Number of recent diagnostics retained for inspection.
    pub diagnostic_capacity: usize,
    /// Seed for the scrambled-perception stream.
    pub illusion_seed: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            lit_corridor: false,
            diagnostic_capacity: 32,
            illusion_seed: 0x5eed,
        }
    }
}

impl DisplayConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DISPLAY_LIT_CORRIDOR` - Draw visible corridors lit (default: false)
    /// - `DISPLAY_DIAGNOSTIC_CAPACITY` - Diagnostics kept (default: 32)
    /// - `DISPLAY_ILLUSION_SEED` - Hallucination seed (default: 0x5eed)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(lit) = read_env_bool("DISPLAY_LIT_CORRIDOR") {
            config.lit_corridor = lit;
        }
        if let Some(capacity) = read_env::<usize>("DISPLAY_DIAGNOSTIC_CAPACITY") {
            config.diagnostic_capacity = capacity;
        }
        if let Some(seed) = read_env::<u64>("DISPLAY_ILLUSION_SEED") {
            config.illusion_seed = seed;
        }

        config
    }

    pub const fn with_lit_corridor(mut self, lit: bool) -> Self {
        self.lit_corridor = lit;
        self
    }

    pub const fn with_illusion_seed(mut self, seed: u64) -> Self {
        self.illusion_seed = seed;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
