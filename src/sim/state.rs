//! Game state and core simulation types
//!
//! The whole game is one `GameState` value. Every transition consumes a state
//! and returns its successor; nothing outside the reducer edits it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::spawn::{create_ship, make_aliens, make_shields};
use crate::age;

/// Outcome of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay (the only non-terminal status)
    #[default]
    Ingame,
    /// Final level cleared
    Won,
    /// Ship was hit
    Lost,
}

/// Kinematic part of a body
///
/// `torque` is zero for every body kind in the game, so `rotation` stays
/// constant once set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub vel: DVec2,
    pub angle: f64,
    pub rotation: f64,
    pub torque: f64,
}

impl Motion {
    pub fn with_velocity(vel: DVec2) -> Self {
        Self {
            vel,
            ..Default::default()
        }
    }
}

/// Any positioned, radius-bearing object: ship, bullet, alien or shield
///
/// Shields are static bodies: their motion is always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique within its population; renderers key visuals on it
    pub id: String,
    /// Simulation time at which the body was spawned
    pub create_time: u64,
    pub pos: DVec2,
    /// Collision circle radius
    pub radius: f64,
    pub motion: Motion,
}

impl Body {
    /// Advance one tick: position by velocity, angle by rotation
    #[must_use]
    pub fn integrated(self) -> Self {
        let Motion {
            vel,
            angle,
            rotation,
            torque,
        } = self.motion;
        Self {
            pos: self.pos + vel,
            motion: Motion {
                vel,
                angle: angle + rotation,
                rotation: rotation + torque,
                torque,
            },
            ..self
        }
    }

    /// Ticks since this body was spawned
    pub fn age(&self, now: u64) -> u64 {
        age(now, self.create_time)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    #[default]
    None,
    /// Halts aliens, alien bullets and alien fire
    Freeze,
    /// Ship hits no longer lose the game
    Immortality,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::None => "none",
            PowerUpKind::Freeze => "freeze",
            PowerUpKind::Immortality => "immortality",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(PowerUpKind::None),
            "freeze" => Some(PowerUpKind::Freeze),
            "immortality" => Some(PowerUpKind::Immortality),
            _ => None,
        }
    }
}

/// A power-up slot; `create_time` marks activation (or grant) time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub create_time: u64,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, create_time: u64) -> Self {
        Self { kind, create_time }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.kind == PowerUpKind::None
    }

    pub fn id(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Complete game state (immutable value, replaced wholesale each step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Simulation clock, taken from the last tick's elapsed value
    pub time: u64,
    pub ship: Body,
    pub ship_bullets: Vec<Body>,
    pub alien_bullets: Vec<Body>,
    pub aliens: Vec<Body>,
    pub shields: Vec<Body>,
    /// Bodies retired during the last step, for the renderer to remove
    pub exit: Vec<Body>,
    /// Running counter for ship bullet ids
    pub bullet_count: u64,
    pub score: u64,
    pub status: GameStatus,
    pub level: u32,
    /// Currently active power-up
    pub power_up: PowerUp,
    /// Granted but not yet activated power-up
    pub available_power_up: PowerUp,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// Fresh game at level 1 with a freeze power-up ready to use
    pub fn initial() -> Self {
        Self {
            time: 0,
            ship: create_ship(),
            ship_bullets: Vec::new(),
            alien_bullets: Vec::new(),
            aliens: make_aliens(),
            shields: make_shields(),
            exit: Vec::new(),
            bullet_count: 0,
            score: 0,
            status: GameStatus::Ingame,
            level: 1,
            power_up: PowerUp::none(),
            available_power_up: PowerUp::new(PowerUpKind::Freeze, 0),
        }
    }

    pub fn is_ingame(&self) -> bool {
        self.status == GameStatus::Ingame
    }

    pub fn is_frozen(&self) -> bool {
        self.power_up.kind == PowerUpKind::Freeze
    }

    pub fn is_immortal(&self) -> bool {
        self.power_up.kind == PowerUpKind::Immortality
    }

    /// Remaining active power-up time in display seconds (100 ticks each)
    pub fn power_up_seconds_left(&self) -> Option<i64> {
        if self.power_up.is_none() {
            return None;
        }
        let elapsed = age(self.time, self.power_up.create_time) as f64;
        Some((5.0 - elapsed / 100.0).round() as i64)
    }

    /// Every live body except the ship, in a stable order
    pub fn live_bodies(&self) -> impl Iterator<Item = &Body> {
        self.ship_bullets
            .iter()
            .chain(&self.alien_bullets)
            .chain(&self.aliens)
            .chain(&self.shields)
    }
}
