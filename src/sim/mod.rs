//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One synchronous pass per tick, driven by the host's frame scheduler
//! - Stable obstacle iteration order (by grid cell)
//! - No rendering or platform dependencies
//!
//! Per-tick control flow: [`Game::tick`] runs the level stepper (victory
//! check, then patrol advance), then player physics, both of which share
//! [`border::detect_borders`] for contact queries.

pub mod border;
pub mod game;
pub mod geometry;
pub mod level;
pub mod obstacle;
pub mod player;

pub use border::{BorderQuery, Borders, detect_borders};
pub use game::{Game, Outcome};
pub use geometry::{Corners, Rect};
pub use level::{GridPos, Level};
pub use obstacle::{MoveKind, Obstacle, ObstacleId};
pub use player::{Key, Player};

/// Terminal signal that ends a level, propagated explicitly up the per-tick
/// call chain via `Result` instead of unwinding. Both variants are one-shot:
/// the level is torn down and never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The player died.
    Dead(Defeat),
    /// The level held no coins at the start of a tick.
    Won,
}

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defeat {
    /// Touched an obstacle flagged deadly.
    DeadlyContact,
    /// Fell past the bottom edge of the board.
    FellOffMap,
}
