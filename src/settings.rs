//! Driver settings
//!
//! Loaded from a JSON file when one is given; anything missing or unreadable
//! falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default LCG seed for the game clock
pub const DEFAULT_SEED: u32 = 21;

/// Scripted input source used by the headless binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    /// Seed for the input script
    pub seed: u64,
    /// Per-tick probability of repositioning the ship
    pub move_chance: f64,
    /// Per-tick probability of firing
    pub shoot_chance: f64,
    /// Per-tick probability of trying to activate a power-up
    pub power_chance: f64,
    /// Restart automatically after a win or loss
    pub auto_restart: bool,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            move_chance: 0.05,
            shoot_chance: 0.03,
            power_chance: 0.002,
            auto_restart: true,
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game clock seed (0 = pick one at random)
    pub seed: u32,
    /// Real-time spacing of ticks, for hosts that pace the clock
    pub tick_interval_ms: u64,
    /// Number of ticks a headless run simulates
    pub max_ticks: u64,
    pub autopilot: AutopilotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_interval_ms: 10,
            max_ticks: 20_000,
            autopilot: AutopilotSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Invalid settings JSON: {}", e);
                None
            }
        }
    }

    /// Load settings from a file, or defaults if it can't be read
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// The seed to start the game clock with
    pub fn resolved_seed(&self) -> u32 {
        if self.seed != 0 {
            return self.seed;
        }
        let seed = rand::random_range(1..0x8000_0000u32);
        log::info!("Picked random seed {}", seed);
        seed
    }
}
