//! Entity factories
//!
//! Plain constructors for every body kind and for the two formations.

use glam::DVec2;

use super::state::{Body, GameState, Motion, PowerUp, PowerUpKind};
use crate::consts::*;

/// The player's ship, centered near the bottom of the canvas
pub fn create_ship() -> Body {
    Body {
        id: "ship".to_string(),
        create_time: 0,
        pos: DVec2::new(CANVAS_SIZE / 2.0, SHIP_START_Y),
        radius: SHIP_RADIUS,
        motion: Motion::default(),
    }
}

/// A bullet leaving the top of the ship, numbered by the running bullet count
pub fn create_ship_bullet(state: &GameState) -> Body {
    let ship = &state.ship;
    Body {
        id: format!("ShipBullet{}", state.bullet_count),
        create_time: state.time,
        pos: ship.pos + DVec2::NEG_Y * ship.radius,
        radius: BULLET_RADIUS,
        motion: Motion::with_velocity(DVec2::new(0.0, SHIP_BULLET_SPEED)),
    }
}

/// A bullet dropping from the bottom of `source`
///
/// The id only encodes the spawn time, so two alien bullets fired in the same
/// tick would share it. At most one is fired per tick.
pub fn create_alien_bullet(time: u64, source: &Body) -> Body {
    Body {
        id: format!("AlienBullet{time}"),
        create_time: time,
        pos: source.pos + DVec2::Y * source.radius,
        radius: BULLET_RADIUS,
        motion: Motion::with_velocity(DVec2::new(0.0, ALIEN_BULLET_SPEED)),
    }
}

/// Alien at grid cell (`row`, `col`)
pub fn create_alien(row: usize, col: usize) -> Body {
    let x = (col as f64 + 10.0) + col as f64 * 40.0;
    let y = row as f64 * 35.0 + 20.0;
    Body {
        id: format!("alien{}", row * ALIEN_COLUMNS + col),
        create_time: 0,
        pos: DVec2::new(x, y),
        radius: ALIEN_RADIUS,
        motion: Motion::with_velocity(DVec2::new(ALIEN_START_SPEED, 0.0)),
    }
}

/// Shield block at (`row`, `col`) inside shield group `group`
pub fn create_shield(group: usize, row: usize, col: usize) -> Body {
    let x = col as f64 * 9.0 + 225.0 * group as f64;
    let y = row as f64 * 8.0 + 440.0;
    let per_group = SHIELD_ROWS * SHIELD_COLUMNS;
    Body {
        id: format!("shield{}", col + row * SHIELD_COLUMNS + per_group * group),
        create_time: 0,
        pos: DVec2::new(x, y),
        radius: SHIELD_RADIUS,
        motion: Motion::default(),
    }
}

pub fn create_power_up(kind: PowerUpKind, create_time: u64) -> PowerUp {
    PowerUp::new(kind, create_time)
}

/// Full alien formation, row-major
pub fn make_aliens() -> Vec<Body> {
    (0..ALIEN_ROWS)
        .flat_map(|row| (0..ALIEN_COLUMNS).map(move |col| create_alien(row, col)))
        .collect()
}

/// All shield groups, group-major then row-major
pub fn make_shields() -> Vec<Body> {
    (0..SHIELD_GROUPS)
        .flat_map(|group| {
            (0..SHIELD_ROWS).flat_map(move |row| {
                (0..SHIELD_COLUMNS).map(move |col| create_shield(group, row, col))
            })
        })
        .collect()
}
