//! Event reducer
//!
//! `reduce` is the only way a `GameState` changes: the host feeds it every
//! input and timer event, in delivery order, and keeps the result.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::spawn::{create_power_up, create_ship_bullet};
use super::state::{Body, GameState, PowerUp};
use super::tick::tick;

/// Everything that can happen to a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Put the ship at this x coordinate
    Move { x: f64 },
    /// Fire a ship bullet
    Shoot,
    /// Advance the simulation one tick
    AdvanceTime { elapsed: u64, random: f64 },
    /// Activate the available power-up, if any
    ActivatePower,
    /// Start over after a win or loss
    Restart,
}

/// Fold one event into the state
///
/// Move and Shoot are accepted in every status; after a win or loss their
/// effects are wiped by the next tick.
pub fn reduce(state: GameState, event: &Event) -> GameState {
    match *event {
        Event::Move { x } => {
            let ship = Body {
                pos: DVec2::new(x, state.ship.pos.y),
                ..state.ship
            };
            GameState { ship, ..state }
        }
        Event::Shoot => {
            let bullet = create_ship_bullet(&state);
            let mut ship_bullets = state.ship_bullets;
            ship_bullets.push(bullet);
            GameState {
                ship_bullets,
                bullet_count: state.bullet_count + 1,
                ..state
            }
        }
        Event::AdvanceTime { elapsed, random } => tick(state, elapsed, random),
        Event::ActivatePower => {
            if state.available_power_up.is_none() {
                return state;
            }
            let power_up = create_power_up(state.available_power_up.kind, state.time);
            log::info!("Power-up {} activated at t={}", power_up.id(), state.time);
            GameState {
                power_up,
                available_power_up: PowerUp::none(),
                ..state
            }
        }
        Event::Restart => {
            if state.is_ingame() {
                return state;
            }
            log::info!(
                "Restarting after {:?} (level {}, score {})",
                state.status,
                state.level,
                state.score
            );
            GameState::initial()
        }
    }
}

/// Fold a whole event sequence, starting from `state`
pub fn replay<'a>(state: GameState, events: impl IntoIterator<Item = &'a Event>) -> GameState {
    events.into_iter().fold(state, reduce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::Lcg;
    use crate::sim::state::{GameStatus, PowerUpKind};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_move_keeps_height() {
        let s = reduce(GameState::initial(), &Event::Move { x: 123.0 });
        assert_eq!(s.ship.pos, DVec2::new(123.0, 550.0));
    }

    #[test]
    fn test_shoot_numbers_bullets() {
        let s = reduce(GameState::initial(), &Event::Shoot);
        let s = reduce(s, &Event::Shoot);
        assert_eq!(s.bullet_count, 2);
        let ids: Vec<&str> = s.ship_bullets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ShipBullet0", "ShipBullet1"]);
    }

    #[test]
    fn test_activate_power() {
        let mut s = GameState::initial();
        s.time = 77;
        let s = reduce(s, &Event::ActivatePower);
        assert_eq!(s.power_up, PowerUp::new(PowerUpKind::Freeze, 77));
        assert!(s.available_power_up.is_none());

        // nothing left to activate
        let again = reduce(s.clone(), &Event::ActivatePower);
        assert_eq!(again, s);
    }

    #[test]
    fn test_restart_only_after_game_end() {
        let mut s = GameState::initial();
        s.score = 40;
        assert_eq!(reduce(s.clone(), &Event::Restart), s);

        s.status = GameStatus::Lost;
        s.level = 4;
        assert_eq!(reduce(s, &Event::Restart), GameState::initial());
    }

    #[test]
    fn test_shoot_after_loss_is_wiped_by_next_tick() {
        let mut s = GameState::initial();
        s.status = GameStatus::Lost;
        let s = reduce(s, &Event::Shoot);
        assert_eq!(s.ship_bullets.len(), 1);
        let s = reduce(s, &Event::AdvanceTime { elapsed: 5, random: 0.1 });
        assert!(s.ship_bullets.is_empty());
        assert_eq!(s.status, GameStatus::Lost);
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            (0.0..600.0f64).prop_map(|x| Event::Move { x }),
            Just(Event::Shoot),
            Just(Event::ActivatePower),
            Just(Event::Restart),
        ]
    }

    /// A script of inputs interleaved with clock ticks sampled from the LCG
    fn arb_script() -> impl Strategy<Value = Vec<Event>> {
        (any::<u32>(), prop::collection::vec((arb_event(), 0u8..6), 1..120)).prop_map(
            |(seed, inputs)| {
                let mut rng = Lcg::new(seed);
                let mut elapsed = 0;
                let mut events = Vec::new();
                for (input, ticks) in inputs {
                    events.push(input);
                    for _ in 0..ticks {
                        rng = rng.next();
                        events.push(Event::AdvanceTime {
                            elapsed,
                            random: rng.value(),
                        });
                        elapsed += 1;
                    }
                }
                events
            },
        )
    }

    fn ids_unique<'a>(mut bodies: impl Iterator<Item = &'a Body>) -> bool {
        let mut seen = HashSet::new();
        bodies.all(|b| seen.insert(b.id.as_str()))
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases_in_game(events in arb_script()) {
            let mut state = GameState::initial();
            for event in &events {
                let before = state.clone();
                state = reduce(state, event);
                if !matches!(event, Event::Restart) {
                    prop_assert!(state.score >= before.score);
                }
            }
        }

        #[test]
        fn prop_ids_unique_per_population(events in arb_script()) {
            let mut state = GameState::initial();
            for event in &events {
                state = reduce(state, event);
                prop_assert!(ids_unique(state.ship_bullets.iter()));
                prop_assert!(ids_unique(state.alien_bullets.iter()));
                prop_assert!(ids_unique(state.aliens.iter()));
                prop_assert!(ids_unique(state.shields.iter()));
            }
        }

        #[test]
        fn prop_replay_is_deterministic(events in arb_script()) {
            let a = replay(GameState::initial(), &events);
            let b = replay(GameState::initial(), &events);
            prop_assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }

        #[test]
        fn prop_terminal_tick_clears(events in arb_script(), lost in any::<bool>()) {
            let mut state = replay(GameState::initial(), &events);
            if state.is_ingame() {
                state.status = if lost { GameStatus::Lost } else { GameStatus::Won };
            }
            let status = state.status;
            let next = reduce(state, &Event::AdvanceTime { elapsed: 1000, random: 0.5 });
            prop_assert!(next.ship_bullets.is_empty());
            prop_assert!(next.alien_bullets.is_empty());
            prop_assert!(next.aliens.is_empty());
            prop_assert!(next.shields.is_empty());
            prop_assert_eq!(next.bullet_count, 0);
            prop_assert!(next.power_up.is_none());
            prop_assert_eq!(next.time, 0);
            prop_assert_eq!(next.status, status);
        }
    }
}
