//! Host-side plumbing around the engine
//!
//! The engine only folds events. Something has to produce them in order,
//! feed them to `reduce`, and hand each resulting state to a renderer:
//! - `GameClock`: elapsed counter + LCG, produces `AdvanceTime` events
//! - `Driver`: FIFO event queue with a single consumer
//! - `Autopilot`: seeded stand-in for a human player

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::CANVAS_SIZE;
use crate::settings::AutopilotSettings;
use crate::sim::{Event, GameState, GameStatus, Lcg, reduce};

/// Anything that displays states; it only ever reads them
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Renderer that throws every state away
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Tick source pairing an elapsed counter with one random sample per tick
#[derive(Debug, Clone)]
pub struct GameClock {
    elapsed: u64,
    rng: Lcg,
}

impl GameClock {
    pub fn new(seed: u32) -> Self {
        Self {
            elapsed: 0,
            rng: Lcg::new(seed),
        }
    }

    /// Next tick event; the first one carries elapsed 0
    pub fn tick(&mut self) -> Event {
        self.rng = self.rng.next();
        let event = Event::AdvanceTime {
            elapsed: self.elapsed,
            random: self.rng.value(),
        };
        self.elapsed += 1;
        event
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}

/// Owns the current state and applies queued events strictly in order
#[derive(Debug, Clone, Default)]
pub struct Driver {
    state: GameState,
    queue: VecDeque<Event>,
    /// Events applied so far
    applied: u64,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            queue: VecDeque::new(),
            applied: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Apply every queued event, rendering after each one
    pub fn pump(&mut self, renderer: &mut impl Renderer) {
        while let Some(event) = self.queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            self.state = reduce(state, &event);
            self.applied += 1;
            renderer.render(&self.state);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }
}

/// Scripted player: wanders, shoots and uses power-ups at random
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    settings: AutopilotSettings,
}

impl Autopilot {
    pub fn new(settings: AutopilotSettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        }
    }

    /// Inputs to deliver before the next tick, given the latest state
    pub fn inputs(&mut self, state: &GameState) -> Vec<Event> {
        if state.status != GameStatus::Ingame {
            return if self.settings.auto_restart {
                vec![Event::Restart]
            } else {
                Vec::new()
            };
        }

        let mut events = Vec::new();
        if self.rng.random_bool(self.settings.move_chance.clamp(0.0, 1.0)) {
            events.push(Event::Move {
                x: self.rng.random_range(0.0..CANVAS_SIZE),
            });
        }
        if self.rng.random_bool(self.settings.shoot_chance.clamp(0.0, 1.0)) {
            events.push(Event::Shoot);
        }
        if !state.available_power_up.is_none()
            && self.rng.random_bool(self.settings.power_chance.clamp(0.0, 1.0))
        {
            events.push(Event::ActivatePower);
        }
        events
    }
}
