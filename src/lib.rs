//! Invaders Sim - A deterministic Space Invaders engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, physics, collisions, reducer)
//! - `driver`: Event queue, game clock and scripted input for hosts
//! - `settings`: Driver configuration

pub mod driver;
pub mod settings;
pub mod sim;

pub use settings::{AutopilotSettings, Settings};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Square play area (pixels)
    pub const CANVAS_SIZE: f64 = 600.0;

    /// Ship defaults
    pub const SHIP_START_Y: f64 = 550.0;
    pub const SHIP_RADIUS: f64 = 20.0;

    /// Bullets
    pub const BULLET_RADIUS: f64 = 2.5;
    pub const SHIP_BULLET_SPEED: f64 = -1.75;
    pub const ALIEN_BULLET_SPEED: f64 = 2.0;
    /// Ticks a bullet lives before it is retired
    pub const BULLET_LIFETIME: u64 = 550;

    /// Alien formation
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLUMNS: usize = 10;
    pub const ALIEN_RADIUS: f64 = 20.0;
    pub const ALIEN_START_SPEED: f64 = 0.55;
    /// Visual width, used for the right-hand bounce edge
    pub const ALIEN_WIDTH: f64 = 15.0;
    /// Drop applied to the whole formation on each bounce
    pub const ALIEN_DESCENT: f64 = 10.0;
    /// Speed ratchet applied to survivors when an alien dies
    pub const ALIEN_SPEEDUP: f64 = 1.05;
    pub const ALIEN_POINTS: u64 = 20;

    /// Shield formation
    pub const SHIELD_GROUPS: usize = 3;
    pub const SHIELD_ROWS: usize = 5;
    pub const SHIELD_COLUMNS: usize = 10;
    pub const SHIELD_RADIUS: f64 = 20.0;

    /// Level progression
    pub const FINAL_LEVEL: u32 = 30;
    /// Base alien fire period in ticks (shrinks with level)
    pub const FIRE_PERIOD: f64 = 30.0;

    /// Ticks an activated power-up stays active
    pub const POWER_UP_DURATION: u64 = 500;
}

/// Rotate a vector counter-clockwise by `deg` degrees
#[inline]
pub fn rotate_degrees(v: DVec2, deg: f64) -> DVec2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Age of something created at `create_time`, as seen at `now`
#[inline]
pub fn age(now: u64, create_time: u64) -> u64 {
    now.saturating_sub(create_time)
}
