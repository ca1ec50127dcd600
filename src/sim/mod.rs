//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per `AdvanceTime` event, regardless of wall-clock spacing
//! - Randomness only from the sample carried by the tick
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod reducer;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collisions, bodies_collided, filter_collisions, handle_collisions};
pub use reducer::{Event, reduce, replay};
pub use rng::Lcg;
pub use state::{Body, GameState, GameStatus, Motion, PowerUp, PowerUpKind};
pub use tick::tick;
