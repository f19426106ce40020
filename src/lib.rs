//! Grid Hopper - a grid platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, border detection, physics, levels)
//! - `plan`: Text plan + legend level definitions
//!
//! Rendering, keyboard wiring, and frame scheduling are host concerns. The
//! host feeds key events into [`sim::Game::on_key_down`]/[`sim::Game::on_key_up`]
//! and calls [`sim::Game::tick`] once per animation frame with a monotonic
//! timestamp, stopping the moment a terminal [`sim::Outcome`] comes back.

pub mod plan;
pub mod sim;

pub use plan::{LevelPlan, PlanError};
pub use sim::{Borders, Defeat, Game, Key, Level, Outcome, Player, Rect, Signal};

/// Game configuration constants
pub mod consts {
    /// Both board axes span 0..100 in percentage units regardless of grid size.
    pub const BOARD_SPAN: f32 = 100.0;
    /// Slack applied to the overlap guards in border detection (percent).
    pub const BORDER_TOLERANCE: f32 = 1.0;
    /// Jump tuning parameter: peak jump height is proportional to this,
    /// independent of board height.
    pub const JUMP_B: f32 = 4.0;
    /// Player body shrink factor, applied about its center.
    pub const PLAYER_SCALE: f32 = 0.9;
    /// Coins occupy this fraction of their grid cell.
    pub const COIN_SCALE: f32 = 0.6;
    /// Scale applied to the default per-tick patrol displacement.
    pub const PATROL_RATE_SCALE: f32 = 0.0005;
}
