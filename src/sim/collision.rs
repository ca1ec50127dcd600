//! Collision detection and resolution
//!
//! Every body is a circle, so one overlap test covers all five pairings.
//! All sets are computed from the same pre-collision snapshot and then
//! applied together.

use super::state::{Body, GameState, GameStatus};
use crate::consts::{ALIEN_POINTS, ALIEN_SPEEDUP};

/// Two bodies collide when their centers are closer than the sum of radii
#[inline]
pub fn bodies_collided(a: &Body, b: &Body) -> bool {
    (a.pos - b.pos).length() < a.radius + b.radius
}

/// Whether `body` overlaps any member of `population`
pub fn hits_any(body: &Body, population: &[Body]) -> bool {
    population.iter().any(|other| bodies_collided(body, other))
}

/// Members of `targets` that overlap at least one member of `sources`
///
/// Plain pairwise scan; the populations are a few hundred bodies at most.
pub fn filter_collisions<'a>(
    sources: &'a [Body],
    targets: &'a [Body],
) -> impl Iterator<Item = &'a Body> + 'a {
    targets.iter().filter(move |t| hits_any(t, sources))
}

/// Per-population destruction masks for one tick, index-aligned with state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collisions {
    pub ship_bullets: Vec<bool>,
    pub alien_bullets: Vec<bool>,
    pub shields: Vec<bool>,
    pub aliens: Vec<bool>,
    /// An alien or alien bullet touched the ship
    pub ship_hit: bool,
}

impl Collisions {
    /// Work out everything that collides in `state`
    pub fn detect(state: &GameState) -> Self {
        let ship = &state.ship;

        let ship_bullets = state
            .ship_bullets
            .iter()
            .map(|b| hits_any(b, &state.shields) || hits_any(b, &state.aliens))
            .collect();
        let alien_bullets = state
            .alien_bullets
            .iter()
            .map(|b| hits_any(b, &state.shields) || bodies_collided(ship, b))
            .collect();
        let shields = state
            .shields
            .iter()
            .map(|s| hits_any(s, &state.ship_bullets) || hits_any(s, &state.alien_bullets))
            .collect();
        let aliens = state
            .aliens
            .iter()
            .map(|a| hits_any(a, &state.ship_bullets))
            .collect();
        let ship_hit = hits_any(ship, &state.aliens) || hits_any(ship, &state.alien_bullets);

        Self {
            ship_bullets,
            alien_bullets,
            shields,
            aliens,
            ship_hit,
        }
    }

    pub fn aliens_destroyed(&self) -> usize {
        self.aliens.iter().filter(|&&hit| hit).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.ship_hit
            && !self
                .ship_bullets
                .iter()
                .chain(&self.alien_bullets)
                .chain(&self.shields)
                .chain(&self.aliens)
                .any(|&hit| hit)
    }
}

/// Split `bodies` into (survivors, destroyed) according to `mask`
fn split_by_mask(bodies: Vec<Body>, mask: &[bool]) -> (Vec<Body>, Vec<Body>) {
    let mut survivors = Vec::with_capacity(bodies.len());
    let mut destroyed = Vec::new();
    for (body, &hit) in bodies.into_iter().zip(mask) {
        if hit {
            destroyed.push(body);
        } else {
            survivors.push(body);
        }
    }
    (survivors, destroyed)
}

/// Resolve every collision in `state`
///
/// Destroyed bodies move to `exit`, each dead alien scores, survivors speed
/// up if anything died, and a hit ship loses the game unless immortal.
pub fn handle_collisions(state: GameState) -> GameState {
    let hits = Collisions::detect(&state);
    if hits.is_empty() {
        return state;
    }

    let killed = hits.aliens_destroyed();
    let status = if hits.ship_hit && !state.is_immortal() {
        log::info!("Ship hit at t={}, game lost", state.time);
        GameStatus::Lost
    } else {
        state.status
    };
    log::debug!(
        "t={}: {} aliens destroyed, ship_hit={}",
        state.time,
        killed,
        hits.ship_hit
    );

    let mut state = state;
    let (ship_bullets, dead_ship_bullets) =
        split_by_mask(std::mem::take(&mut state.ship_bullets), &hits.ship_bullets);
    let (alien_bullets, dead_alien_bullets) =
        split_by_mask(std::mem::take(&mut state.alien_bullets), &hits.alien_bullets);
    let (shields, dead_shields) = split_by_mask(std::mem::take(&mut state.shields), &hits.shields);
    let (aliens, dead_aliens) = split_by_mask(std::mem::take(&mut state.aliens), &hits.aliens);

    let speedup = if killed > 0 { ALIEN_SPEEDUP } else { 1.0 };
    let aliens = aliens
        .into_iter()
        .map(|mut a| {
            a.motion.vel *= speedup;
            a
        })
        .collect();

    let mut exit = std::mem::take(&mut state.exit);
    exit.extend(dead_shields);
    exit.extend(dead_aliens);
    exit.extend(dead_alien_bullets);
    exit.extend(dead_ship_bullets);

    GameState {
        ship_bullets,
        alien_bullets,
        aliens,
        shields,
        exit,
        score: state.score + killed as u64 * ALIEN_POINTS,
        status,
        ..state
    }
}
