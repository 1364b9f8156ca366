use serde::{Deserialize, Serialize};

mod storage;

pub use storage::{LoadError, SaveError, default_path, load, load_or_default, save};

/// Everything read from `config.toml`. Missing keys fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub desktop: DesktopConfig,
    pub server: ServerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Simulated days per tick, before scaling.
    pub step_size: f64,
    pub time_scale: f64,
    pub tick_rate_hz: f64,
    /// Ticks dropped beyond this many per frame.
    pub max_ticks_per_frame: u32,
    pub show_orbits: bool,
    pub show_labels: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            time_scale: 100.0,
            tick_rate_hz: 60.0,
            max_ticks_per_frame: 8,
            show_orbits: true,
            show_labels: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub step_size: f64,
    pub time_scale: f64,
    pub tick_interval_ms: u64,
    /// Position updates buffered per client before it starts lagging.
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            step_size: 0.016,
            time_scale: 1.0,
            tick_interval_ms: 16,
            broadcast_capacity: 64,
        }
    }
}
