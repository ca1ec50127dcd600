//! Invaders Sim entry point
//!
//! Runs a headless session: the autopilot plays against the game clock for
//! a fixed number of ticks and the outcome is printed as JSON.

use std::path::Path;

use invaders_sim::Settings;
use invaders_sim::driver::{Autopilot, Driver, GameClock, Renderer};
use invaders_sim::sim::{GameState, GameStatus};

/// Logs the events a player would notice instead of drawing them
#[derive(Default)]
struct LogRenderer {
    status: GameStatus,
    level: u32,
    games: u32,
    wins: u32,
    best_score: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) {
        if state.level != self.level && state.is_ingame() {
            log::debug!("Level {} (score {})", state.level, state.score);
            self.level = state.level;
        }
        if state.status != self.status {
            match state.status {
                GameStatus::Won => {
                    self.wins += 1;
                    log::info!("VICTORY with score {}", state.score);
                }
                GameStatus::Lost => log::info!("GAME OVER at level {}, score {}", state.level, state.score),
                GameStatus::Ingame => log::info!("New game"),
            }
            if self.status == GameStatus::Ingame {
                self.games += 1;
                self.best_score = self.best_score.max(state.score);
            }
            self.status = state.status;
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Invaders Sim (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.resolved_seed();
    log::info!("Game clock seed: {}", seed);

    let mut driver = Driver::new(GameState::initial());
    let mut clock = GameClock::new(seed);
    let mut pilot = Autopilot::new(settings.autopilot.clone());
    let mut renderer = LogRenderer {
        level: 1,
        ..Default::default()
    };

    for _ in 0..settings.max_ticks {
        for event in pilot.inputs(driver.state()) {
            driver.push(event);
        }
        driver.push(clock.tick());
        driver.pump(&mut renderer);
    }

    let state = driver.state();
    let summary = serde_json::json!({
        "seed": seed,
        "ticks": clock.elapsed(),
        "events": driver.applied(),
        "finished_games": renderer.games,
        "wins": renderer.wins,
        "best_score": renderer.best_score.max(state.score),
        "status": state.status,
        "level": state.level,
        "score": state.score,
        "aliens_left": state.aliens.len(),
    });
    println!("{summary}");
}
