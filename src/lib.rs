//! Vector Race - a turn-based race on an integer grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (segment geometry, race state, turn transition)
//! - `race`: Session wrapper exposing the player commands and read-only queries
//! - `config`: Grid bounds and fixed start/goal geometry
//! - `error`: Contract-violation and configuration errors

pub mod config;
pub mod error;
pub mod race;
pub mod sim;

pub use config::RaceConfig;
pub use error::{RaceError, Result};
pub use race::Race;

use glam::IVec2;

/// Default grid configuration constants
pub mod consts {
    use glam::IVec2;

    /// Grid columns
    pub const GRID_WIDTH: i32 = 40;
    /// Grid rows
    pub const GRID_HEIGHT: i32 = 20;

    /// Center of the start line
    pub const START_POINT: IVec2 = IVec2::new(GRID_WIDTH / 2, 1);
    /// Center of the goal line
    pub const GOAL_POINT: IVec2 = IVec2::new(GRID_WIDTH - 2, GRID_HEIGHT - 1);
    /// Half-width of the goal line (goal spans GOAL_POINT.x ± this)
    pub const GOAL_HALF_WIDTH: i32 = 1;

    /// Largest per-axis change between committed and pending velocity
    pub const MAX_ACCELERATION: i32 = 1;
}

/// Whether `p` lies on the grid.
///
/// Both far edges count as on-grid (`x == width` and `y == height` are
/// accepted), matching the lower edges at zero.
#[inline]
pub fn within_grid(p: IVec2, width: i32, height: i32) -> bool {
    p.x >= 0 && p.x <= width && p.y >= 0 && p.y <= height
}
