//! Race configuration
//!
//! Grid bounds and the fixed start/goal geometry. Loaded from JSON; every
//! field falls back to the classic 40x20 track when omitted.

use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{RaceError, Result};
use crate::sim::Segment;
use crate::within_grid;

/// Immutable track description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Grid columns (x runs 0..=width)
    pub width: i32,
    /// Grid rows (y runs 0..=height)
    pub height: i32,
    /// Where the car starts
    pub start: IVec2,
    /// Start line (drawn only)
    pub start_line: Segment,
    /// Crossing this ends the race in a win
    pub goal_line: Segment,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            start: START_POINT,
            start_line: Segment::new(START_POINT - IVec2::X, START_POINT),
            goal_line: Segment::new(
                GOAL_POINT - IVec2::new(GOAL_HALF_WIDTH, 0),
                GOAL_POINT + IVec2::new(GOAL_HALF_WIDTH, 0),
            ),
        }
    }
}

impl RaceConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {}x{} track from {}",
            config.width,
            config.height,
            path.display()
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject grids that cannot be raced on
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(RaceError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !within_grid(self.start, self.width, self.height) {
            return Err(RaceError::InvalidConfig(format!(
                "start {} is outside the {}x{} grid",
                self.start, self.width, self.height
            )));
        }
        Ok(())
    }
}
