//! Runner configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Parameters of one headless run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub ticks: u32,
    pub dt: f32,
    pub seed: u64,
    /// Archetype catalog to load instead of the embedded one.
    pub catalog: Option<PathBuf>,
    /// Tick at which time slows down for the whole arena, if any.
    pub slow_at: Option<u32>,
    pub slow_factor: f32,
}

impl SimConfig {
    pub const DEFAULT_TICKS: u32 = 300;
    pub const DEFAULT_DT: f32 = 0.1;
    pub const DEFAULT_SLOW_FACTOR: f32 = 0.5;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TICKS` - Number of ticks to run (default: 300)
    /// - `SIM_DT` - Seconds per tick (default: 0.1)
    /// - `SIM_SEED` - Random seed for fallback rolls (default: 0)
    /// - `SIM_CATALOG` - Path to an archetype RON catalog (default: embedded)
    /// - `SIM_SLOW_AT` - Tick at which time slows down (default: never)
    /// - `SIM_SLOW_FACTOR` - Speed multiplier while slowed (default: 0.5)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u32>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(dt) = read_env::<f32>("SIM_DT") {
            config.dt = dt.max(f32::EPSILON);
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        config.catalog = env::var("SIM_CATALOG").ok().map(PathBuf::from);
        config.slow_at = read_env::<u32>("SIM_SLOW_AT");
        if let Some(factor) = read_env::<f32>("SIM_SLOW_FACTOR") {
            config.slow_factor = factor.clamp(0.0, 1.0);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: Self::DEFAULT_TICKS,
            dt: Self::DEFAULT_DT,
            seed: 0,
            catalog: None,
            slow_at: None,
            slow_factor: Self::DEFAULT_SLOW_FACTOR,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
