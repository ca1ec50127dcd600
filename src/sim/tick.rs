//! Fixed timestep simulation tick
//!
//! One `AdvanceTime` event runs the stages below in order, each consuming
//! the previous stage's state. A tick that arrives after the game ended
//! clears the board instead.

use glam::DVec2;

use super::collision::handle_collisions;
use super::spawn::{create_alien_bullet, create_power_up, make_aliens, make_shields};
use super::state::{Body, GameState, GameStatus, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::{age, rotate_degrees};

/// Advance the game state by one tick
///
/// `elapsed` becomes the new simulation clock; `random` is the single sample
/// in [0, 1] that drives alien fire and power-up rolls this tick.
pub fn tick(state: GameState, elapsed: u64, random: f64) -> GameState {
    if !state.is_ingame() {
        return clear(state);
    }

    let state = integrate(state, elapsed);
    let state = handle_collisions(state);
    let state = check_won(state);
    let state = bounce_wrap(state);
    let state = next_level(state, random);
    let state = random_fire(state, random);
    remove_expired_power(state)
}

/// Empty the board after a win or loss, keeping the terminal status
pub fn clear(state: GameState) -> GameState {
    let GameState {
        ship,
        ship_bullets,
        alien_bullets,
        aliens,
        shields,
        score,
        status,
        level,
        ..
    } = state;

    let mut exit = Vec::with_capacity(
        aliens.len() + shields.len() + ship_bullets.len() + alien_bullets.len(),
    );
    exit.extend(aliens);
    exit.extend(shields);
    exit.extend(ship_bullets);
    exit.extend(alien_bullets);

    GameState {
        time: 0,
        ship,
        ship_bullets: Vec::new(),
        alien_bullets: Vec::new(),
        aliens: Vec::new(),
        shields: Vec::new(),
        exit,
        bullet_count: 0,
        score,
        status,
        level,
        power_up: PowerUp::none(),
        available_power_up: PowerUp::none(),
    }
}

/// Split off bullets older than the bullet lifetime
fn split_expired(bullets: Vec<Body>, now: u64) -> (Vec<Body>, Vec<Body>) {
    bullets
        .into_iter()
        .partition(|b| b.age(now) <= BULLET_LIFETIME)
}

/// Move every live body one step and retire expired bullets
///
/// Under freeze, aliens and alien bullets hold position. The exit set is
/// reset here, so it only ever describes the current tick.
pub fn integrate(state: GameState, elapsed: u64) -> GameState {
    let frozen = state.is_frozen();
    let step = |b: Body| if frozen { b } else { b.integrated() };

    let (ship_bullets, expired_ship) = split_expired(state.ship_bullets, elapsed);
    let (alien_bullets, expired_alien) = split_expired(state.alien_bullets, elapsed);

    let mut exit = expired_ship;
    exit.extend(expired_alien);

    GameState {
        time: elapsed,
        ship_bullets: ship_bullets.into_iter().map(Body::integrated).collect(),
        alien_bullets: alien_bullets.into_iter().map(step).collect(),
        aliens: state.aliens.into_iter().map(step).collect(),
        exit,
        ..state
    }
}

/// Clearing the final level wins the game
pub fn check_won(state: GameState) -> GameState {
    if state.level == FINAL_LEVEL && state.aliens.is_empty() && state.is_ingame() {
        log::info!("Level {} cleared, game won with score {}", state.level, state.score);
        GameState {
            status: GameStatus::Won,
            ..state
        }
    } else {
        state
    }
}

fn outside_canvas(alien: &Body) -> bool {
    alien.pos.x < 0.0 || alien.pos.x + ALIEN_WIDTH > CANVAS_SIZE
}

/// Reverse and drop the whole formation when any alien leaves the canvas
pub fn bounce_wrap(state: GameState) -> GameState {
    if !state.aliens.iter().any(outside_canvas) {
        return state;
    }

    let aliens = state
        .aliens
        .into_iter()
        .map(|mut a| {
            a.pos += DVec2::new(0.0, ALIEN_DESCENT);
            a.motion.vel = rotate_degrees(a.motion.vel, 180.0);
            a
        })
        .collect();

    GameState { aliens, ..state }
}

/// 50/50 roll between the two grantable power-ups
pub fn roll_power_up(random: f64, time: u64) -> PowerUp {
    let kind = if random.round() == 1.0 {
        PowerUpKind::Freeze
    } else {
        PowerUpKind::Immortality
    };
    create_power_up(kind, time)
}

/// Start the next level once aliens and their bullets are gone
pub fn next_level(state: GameState, random: f64) -> GameState {
    if !(state.aliens.is_empty() && state.alien_bullets.is_empty() && state.is_ingame()) {
        return state;
    }

    let level = state.level + 1;
    let available_power_up = roll_power_up(random, state.time);
    log::info!(
        "Level {} reached at t={}, granted {}",
        level,
        state.time,
        available_power_up.id()
    );

    GameState {
        level,
        aliens: make_aliens(),
        shields: make_shields(),
        available_power_up,
        ..state
    }
}

/// Ticks between alien shots at `level`
pub fn fire_period(level: u32) -> f64 {
    FIRE_PERIOD - (f64::from(level) - 1.5)
}

/// Whether the aliens fire on this tick
pub fn should_fire(state: &GameState) -> bool {
    !state.is_frozen() && (state.time as f64) % fire_period(state.level) == 0.0
}

/// Index of the alien picked by `random` among `count` aliens
fn pick_index(random: f64, count: usize) -> usize {
    let last = count - 1;
    ((random * last as f64).round() as usize).min(last)
}

/// Fire one bullet from a randomly chosen alien on firing ticks
pub fn random_fire(state: GameState, random: f64) -> GameState {
    if state.aliens.is_empty() || !should_fire(&state) {
        return state;
    }

    let shooter = &state.aliens[pick_index(random, state.aliens.len())];
    log::debug!("t={}: {} fires", state.time, shooter.id);
    let bullet = create_alien_bullet(state.time, shooter);

    let mut alien_bullets = state.alien_bullets;
    alien_bullets.push(bullet);
    GameState {
        alien_bullets,
        ..state
    }
}

/// Deactivate the active power-up once its duration has run out
pub fn remove_expired_power(state: GameState) -> GameState {
    if age(state.time, state.power_up.create_time) > POWER_UP_DURATION {
        if !state.power_up.is_none() {
            log::info!("Power-up {} expired at t={}", state.power_up.id(), state.time);
        }
        GameState {
            power_up: PowerUp::none(),
            ..state
        }
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{create_alien, create_ship_bullet};

    fn cleared_level(level: u32) -> GameState {
        GameState {
            aliens: Vec::new(),
            alien_bullets: Vec::new(),
            level,
            ..GameState::initial()
        }
    }

    #[test]
    fn test_tick_sets_clock_and_moves_aliens() {
        let s = GameState::initial();
        let x0 = s.aliens[0].pos.x;
        let next = tick(s, 1, 0.3);
        assert_eq!(next.time, 1);
        assert!((next.aliens[0].pos.x - (x0 + 0.55)).abs() < 1e-12);
    }

    #[test]
    fn test_first_tick_fires() {
        // time 0 is a multiple of every fire period
        let next = tick(GameState::initial(), 0, 0.0);
        assert_eq!(next.alien_bullets.len(), 1);
        assert_eq!(next.alien_bullets[0].id, "AlienBullet0");
    }

    #[test]
    fn test_fire_period_shrinks_with_level() {
        assert_eq!(fire_period(1), 29.5);
        assert_eq!(fire_period(30), 1.5);
        assert!(fire_period(10) < fire_period(2));

        let mut s = GameState::initial();
        s.time = 59;
        assert!(should_fire(&s));
        s.time = 30;
        assert!(!should_fire(&s));
    }

    #[test]
    fn test_freeze_holds_aliens_and_stops_fire() {
        let mut s = GameState::initial();
        s.power_up = PowerUp::new(PowerUpKind::Freeze, 0);
        s.alien_bullets = vec![create_alien_bullet(0, &create_alien(0, 0))];
        let before = s.clone();

        let next = tick(s, 0, 0.5);
        assert_eq!(next.aliens[3].pos, before.aliens[3].pos);
        assert_eq!(next.alien_bullets.len(), 1);
        assert_eq!(next.alien_bullets[0].pos, before.alien_bullets[0].pos);
    }

    #[test]
    fn test_ship_bullets_move_even_when_frozen() {
        let mut s = GameState::initial();
        s.power_up = PowerUp::new(PowerUpKind::Freeze, 0);
        let bullet = create_ship_bullet(&s);
        let y0 = bullet.pos.y;
        s.ship_bullets = vec![bullet];
        let next = tick(s, 1, 0.5);
        assert_eq!(next.ship_bullets[0].pos.y, y0 - 1.75);
    }

    #[test]
    fn test_old_bullets_expire_into_exit() {
        let mut s = GameState::initial();
        let mut bullet = create_ship_bullet(&s);
        bullet.pos.x = 595.0;
        s.ship_bullets = vec![bullet];
        s.exit = vec![create_alien(1, 1)];

        let kept = tick(s.clone(), 550, 0.5);
        assert_eq!(kept.ship_bullets.len(), 1);

        let next = tick(s, 551, 0.5);
        assert!(next.ship_bullets.is_empty());
        assert_eq!(next.exit.len(), 1);
        assert_eq!(next.exit[0].id, "ShipBullet0");
    }

    #[test]
    fn test_formation_bounces_at_edge() {
        let mut s = GameState::initial();
        s.aliens = vec![create_alien(0, 0), create_alien(0, 9)];
        s.aliens[1].pos.x = 586.0;
        let y0 = s.aliens[0].pos.y;

        let next = bounce_wrap(integrate(s, 1));
        for a in &next.aliens {
            assert_eq!(a.pos.y, y0 + 10.0);
            assert!((a.motion.vel.x + 0.55).abs() < 1e-12);
        }
    }

    #[test]
    fn test_level_clear_grants_power_up() {
        let next = tick(cleared_level(1), 1, 0.8);
        assert_eq!(next.level, 2);
        assert_eq!(next.aliens.len(), ALIEN_ROWS * ALIEN_COLUMNS);
        assert_eq!(
            next.shields.len(),
            SHIELD_GROUPS * SHIELD_ROWS * SHIELD_COLUMNS
        );
        assert_eq!(next.available_power_up.kind, PowerUpKind::Freeze);

        let next = tick(cleared_level(1), 1, 0.2);
        assert_eq!(next.available_power_up.kind, PowerUpKind::Immortality);
    }

    #[test]
    fn test_level_not_cleared_while_alien_bullets_fly() {
        let mut s = cleared_level(3);
        s.alien_bullets = vec![create_alien_bullet(0, &create_alien(0, 0))];
        let next = tick(s, 1, 0.5);
        assert_eq!(next.level, 3);
        assert!(next.aliens.is_empty());
    }

    #[test]
    fn test_final_level_clear_wins() {
        let next = tick(cleared_level(FINAL_LEVEL), 1, 0.5);
        assert_eq!(next.status, GameStatus::Won);
        assert_eq!(next.level, FINAL_LEVEL);
        assert!(next.aliens.is_empty());
    }

    #[test]
    fn test_terminal_tick_clears_board() {
        let mut s = GameState::initial();
        s.status = GameStatus::Lost;
        s.time = 400;
        s.bullet_count = 9;
        s.score = 60;
        s.power_up = PowerUp::new(PowerUpKind::Immortality, 300);
        s.ship_bullets = vec![create_ship_bullet(&s)];
        let live = s.live_bodies().count();

        let next = tick(s, 401, 0.5);
        assert_eq!(next.status, GameStatus::Lost);
        assert!(next.ship_bullets.is_empty());
        assert!(next.alien_bullets.is_empty());
        assert!(next.aliens.is_empty());
        assert!(next.shields.is_empty());
        assert_eq!(next.exit.len(), live);
        assert_eq!(next.bullet_count, 0);
        assert_eq!(next.time, 0);
        assert!(next.power_up.is_none());
        assert!(next.available_power_up.is_none());
        assert_eq!(next.score, 60);
    }

    #[test]
    fn test_power_up_expires() {
        let mut s = GameState::initial();
        s.power_up = PowerUp::new(PowerUpKind::Immortality, 100);
        let still = tick(s.clone(), 600, 0.5);
        assert_eq!(still.power_up.kind, PowerUpKind::Immortality);
        let gone = tick(s, 601, 0.5);
        assert!(gone.power_up.is_none());
    }

    #[test]
    fn test_immortal_ship_survives_alien_contact() {
        let mut s = GameState::initial();
        s.power_up = PowerUp::new(PowerUpKind::Immortality, 0);
        s.aliens[0].pos = s.ship.pos;
        let next = tick(s, 1, 0.5);
        assert_eq!(next.status, GameStatus::Ingame);
    }

    #[test]
    fn test_alien_contact_loses() {
        let mut s = GameState::initial();
        s.aliens[0].pos = s.ship.pos;
        let next = tick(s, 1, 0.5);
        assert_eq!(next.status, GameStatus::Lost);
    }

    #[test]
    fn test_pick_index_bounds() {
        assert_eq!(pick_index(0.0, 50), 0);
        assert_eq!(pick_index(1.0, 50), 49);
        assert_eq!(pick_index(0.5, 1), 0);
    }
}
