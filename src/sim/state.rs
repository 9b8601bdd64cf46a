//! Race state and core simulation types
//!
//! Everything a presentation layer needs to draw a frame lives in `RaceState`.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use crate::error::RaceError;

/// Outcome of the race so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RaceStatus {
    /// Still racing
    #[default]
    InProgress,
    /// A move crossed the goal line
    Won,
    /// The car left the grid
    OutOfBounds,
}

impl RaceStatus {
    /// True once the race can no longer change
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != RaceStatus::InProgress
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RaceStatus::InProgress => "In progress",
            RaceStatus::Won => "You win!",
            RaceStatus::OutOfBounds => "Game over",
        }
    }
}

/// Velocity axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: IVec2) -> i32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Mutable component of `v` along this axis
    #[inline]
    pub fn of_mut(self, v: &mut IVec2) -> &mut i32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

impl FromStr for Axis {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(RaceError::InvalidAxis(s.to_string())),
        }
    }
}

/// Complete race state for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceState {
    /// Head of the trajectory (the car)
    pub tip: IVec2,
    /// Velocity applied on the most recent turn
    pub committed: IVec2,
    /// Velocity queued for the next turn
    pub pending: IVec2,
    /// Completed turns
    pub turn: u32,
    /// Every move so far, oldest first
    pub trajectory: Vec<Segment>,
    /// Race outcome
    pub status: RaceStatus,
}

impl RaceState {
    /// Fresh state with the car parked on `start`
    pub fn new(start: IVec2) -> Self {
        Self {
            tip: start,
            committed: IVec2::ZERO,
            pending: IVec2::ZERO,
            turn: 0,
            trajectory: Vec::new(),
            status: RaceStatus::InProgress,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check that consecutive moves join up and the first starts at `start`
    pub fn is_contiguous(&self, start: IVec2) -> bool {
        let mut from = start;
        for segment in &self.trajectory {
            if segment.p1 != from {
                return false;
            }
            from = segment.p2;
        }
        from == self.tip
    }
}
