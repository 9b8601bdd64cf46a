//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer grid coordinates only
//! - One transition per player command
//! - No rendering or platform dependencies

pub mod geometry;
pub mod state;
pub mod turn;

pub use geometry::{Orientation, Segment, intersects, on_segment, orientation};
pub use state::{Axis, RaceState, RaceStatus};
pub use turn::{Command, TurnOutcome, advance_turn, apply_command, request_velocity_change};
