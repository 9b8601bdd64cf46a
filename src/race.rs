//! Race session
//!
//! Owns the track and the race state. The presentation layer forwards button
//! presses to the command methods and reads the query methods each frame;
//! it never touches `RaceState` fields directly.

use std::ops::RangeInclusive;

use glam::IVec2;

use crate::config::RaceConfig;
use crate::consts::MAX_ACCELERATION;
use crate::error::Result;
use crate::sim::{self, Axis, Command, RaceState, RaceStatus, Segment, TurnOutcome};

/// One race from start line to goal (or crash)
#[derive(Debug, Clone)]
pub struct Race {
    config: RaceConfig,
    state: RaceState,
}

impl Default for Race {
    fn default() -> Self {
        let config = RaceConfig::default();
        let state = RaceState::new(config.start);
        Self { config, state }
    }
}

impl Race {
    /// Start a race on a validated track
    pub fn new(config: RaceConfig) -> Result<Self> {
        config.validate()?;
        let state = RaceState::new(config.start);
        log::info!(
            "New race on {}x{} grid from {}",
            config.width,
            config.height,
            config.start
        );
        Ok(Self { config, state })
    }

    // === Commands ===

    pub fn accelerate_x(&mut self) -> bool {
        self.nudge(Axis::X, 1)
    }

    pub fn decelerate_x(&mut self) -> bool {
        self.nudge(Axis::X, -1)
    }

    pub fn accelerate_y(&mut self) -> bool {
        self.nudge(Axis::Y, 1)
    }

    pub fn decelerate_y(&mut self) -> bool {
        self.nudge(Axis::Y, -1)
    }

    fn nudge(&mut self, axis: Axis, delta: i32) -> bool {
        sim::turn::nudge_velocity(&mut self.state, axis, delta)
    }

    /// Nudge the pending velocity on `axis` by `delta` (-1, 0 or +1)
    ///
    /// Returns whether the pending velocity changed; any other delta is an
    /// error.
    pub fn request_velocity_change(&mut self, axis: Axis, delta: i32) -> Result<bool> {
        sim::request_velocity_change(&mut self.state, axis, delta)
    }

    /// Play one turn; `None` once the race is over
    pub fn advance_turn(&mut self) -> Option<TurnOutcome> {
        sim::advance_turn(&mut self.state, &self.config)
    }

    /// Apply a single command
    pub fn apply(&mut self, command: Command) -> Option<TurnOutcome> {
        sim::apply_command(&mut self.state, &self.config, command)
    }

    /// Apply commands in order, collecting the turns that were played
    pub fn replay<I>(&mut self, commands: I) -> Vec<TurnOutcome>
    where
        I: IntoIterator<Item = Command>,
    {
        commands
            .into_iter()
            .filter_map(|command| self.apply(command))
            .collect()
    }

    // === Queries ===

    pub fn tip(&self) -> IVec2 {
        self.state.tip
    }

    pub fn committed_velocity(&self) -> IVec2 {
        self.state.committed
    }

    pub fn pending_velocity(&self) -> IVec2 {
        self.state.pending
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn trajectory(&self) -> &[Segment] {
        &self.state.trajectory
    }

    pub fn status(&self) -> RaceStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Pending values `axis` can take before the next turn
    pub fn velocity_range(&self, axis: Axis) -> RangeInclusive<i32> {
        let committed = axis.of(self.state.committed);
        (committed - MAX_ACCELERATION)..=(committed + MAX_ACCELERATION)
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }
}
