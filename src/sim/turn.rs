//! Turn transition
//!
//! The two operations that mutate a race: nudging the pending velocity and
//! playing a turn. Both are silent no-ops once the race is over.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use super::state::{Axis, RaceState, RaceStatus};
use crate::config::RaceConfig;
use crate::consts::MAX_ACCELERATION;
use crate::error::{RaceError, Result};
use crate::within_grid;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    AccelerateX,
    DecelerateX,
    AccelerateY,
    DecelerateY,
    /// Play the turn with the pending velocity
    Advance,
}

impl Command {
    /// Axis and delta for velocity commands, `None` for `Advance`
    pub fn velocity_change(self) -> Option<(Axis, i32)> {
        match self {
            Command::AccelerateX => Some((Axis::X, 1)),
            Command::DecelerateX => Some((Axis::X, -1)),
            Command::AccelerateY => Some((Axis::Y, 1)),
            Command::DecelerateY => Some((Axis::Y, -1)),
            Command::Advance => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AccelerateX => f.write_str("+x"),
            Command::DecelerateX => f.write_str("-x"),
            Command::AccelerateY => f.write_str("+y"),
            Command::DecelerateY => f.write_str("-y"),
            Command::Advance => f.write_str("tic"),
        }
    }
}

impl FromStr for Command {
    type Err = RaceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+x" => Ok(Command::AccelerateX),
            "-x" => Ok(Command::DecelerateX),
            "+y" => Ok(Command::AccelerateY),
            "-y" => Ok(Command::DecelerateY),
            "tic" | "advance" | "next" => Ok(Command::Advance),
            _ => Err(RaceError::UnknownCommand(s.to_string())),
        }
    }
}

/// What happened on a played turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Turn number just completed (1-based)
    pub turn: u32,
    /// Move made this turn
    pub segment: Segment,
    /// Status after the turn
    pub status: RaceStatus,
}

/// Nudge the pending velocity on `axis` by `delta`
///
/// Returns whether the pending velocity changed. A change that would leave
/// the pending velocity more than one unit away from the committed one is
/// dropped, as is any change after the race ended. `delta` outside
/// `{-1, 0, 1}` is a caller bug and returns `InvalidDelta`.
pub fn request_velocity_change(state: &mut RaceState, axis: Axis, delta: i32) -> Result<bool> {
    match delta {
        0 => Ok(false),
        -1 | 1 => Ok(nudge_velocity(state, axis, delta)),
        _ => {
            log::warn!("Rejected velocity delta {} on {}", delta, axis);
            Err(RaceError::InvalidDelta(delta))
        }
    }
}

/// Nudge the pending velocity by a delta already known to be ±1
pub(crate) fn nudge_velocity(state: &mut RaceState, axis: Axis, delta: i32) -> bool {
    debug_assert!(delta == 1 || delta == -1);
    if state.is_finished() {
        return false;
    }

    let Some(candidate) = axis.of(state.pending).checked_add(delta) else {
        return false;
    };
    if (i64::from(candidate) - i64::from(axis.of(state.committed))).abs()
        > i64::from(MAX_ACCELERATION)
    {
        log::debug!(
            "Ignored v{} -> {} (committed {})",
            axis,
            candidate,
            axis.of(state.committed)
        );
        return false;
    }

    *axis.of_mut(&mut state.pending) = candidate;
    log::debug!("Pending velocity now {}", state.pending);
    true
}

/// `tip + velocity`, or `None` if the result leaves the `i32` range
fn step(tip: IVec2, velocity: IVec2) -> Option<IVec2> {
    let wide = tip.as_i64vec2() + velocity.as_i64vec2();
    Some(IVec2::new(
        i32::try_from(wide.x).ok()?,
        i32::try_from(wide.y).ok()?,
    ))
}

/// Play one turn
///
/// The next state is built on a copy and swapped in whole, so callers never
/// see a half-applied turn. Returns `None` when the race is already over.
pub fn advance_turn(state: &mut RaceState, config: &RaceConfig) -> Option<TurnOutcome> {
    if state.is_finished() {
        return None;
    }

    let mut next = state.clone();
    next.committed = next.pending;

    // A move past the i32 range is off any grid; the tip is pinned at the edge
    let (new_tip, overflowed) = match step(next.tip, next.committed) {
        Some(tip) => (tip, false),
        None => (next.tip.saturating_add(next.committed), true),
    };
    let segment = Segment::new(next.tip, new_tip);
    next.trajectory.push(segment);

    // Goal first: a winning move that also leaves the grid still wins
    if config.goal_line.intersects(&segment) {
        next.status = RaceStatus::Won;
    } else if overflowed || !within_grid(new_tip, config.width, config.height) {
        next.status = RaceStatus::OutOfBounds;
    }

    next.tip = new_tip;
    next.turn += 1;

    log::info!(
        "Turn {}: {} -> {} (v = {})",
        next.turn,
        segment.p1,
        segment.p2,
        next.committed
    );
    if segment.is_point() {
        log::debug!("Turn {}: car is standing still", next.turn);
    }
    if next.is_finished() {
        log::info!("Race over after {} turns: {}", next.turn, next.status.as_str());
    }

    *state = next;

    Some(TurnOutcome {
        turn: state.turn,
        segment,
        status: state.status,
    })
}

/// Apply a command to the state, returning the played turn for `Advance`
pub fn apply_command(
    state: &mut RaceState,
    config: &RaceConfig,
    command: Command,
) -> Option<TurnOutcome> {
    match command.velocity_change() {
        Some((axis, delta)) => {
            nudge_velocity(state, axis, delta);
            None
        }
        None => advance_turn(state, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (RaceState, RaceConfig) {
        let config = RaceConfig::default();
        (RaceState::new(config.start), config)
    }

    #[test]
    fn test_acceleration_clamped_per_turn() {
        let (mut state, config) = setup();

        assert!(request_velocity_change(&mut state, Axis::X, 1).unwrap());
        for _ in 0..8 {
            assert!(!request_velocity_change(&mut state, Axis::X, 1).unwrap());
        }
        assert_eq!(state.pending.x, 1);

        advance_turn(&mut state, &config);
        assert_eq!(state.committed.x, 1);
        assert!(request_velocity_change(&mut state, Axis::X, 1).unwrap());
        assert_eq!(state.pending.x, 2);
    }

    #[test]
    fn test_can_swing_back_within_turn() {
        let (mut state, _) = setup();

        assert!(request_velocity_change(&mut state, Axis::Y, 1).unwrap());
        assert!(request_velocity_change(&mut state, Axis::Y, -1).unwrap());
        assert!(request_velocity_change(&mut state, Axis::Y, -1).unwrap());
        assert!(!request_velocity_change(&mut state, Axis::Y, -1).unwrap());
        assert_eq!(state.pending, IVec2::new(0, -1));
    }

    #[test]
    fn test_invalid_delta_is_error() {
        let (mut state, _) = setup();
        let before = state.clone();

        assert!(matches!(
            request_velocity_change(&mut state, Axis::X, 2),
            Err(RaceError::InvalidDelta(2))
        ));
        assert!(matches!(
            request_velocity_change(&mut state, Axis::Y, -7),
            Err(RaceError::InvalidDelta(-7))
        ));
        assert!(!request_velocity_change(&mut state, Axis::X, 0).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_advance_moves_tip() {
        let (mut state, config) = setup();
        request_velocity_change(&mut state, Axis::X, 1).unwrap();
        request_velocity_change(&mut state, Axis::Y, 1).unwrap();

        let outcome = advance_turn(&mut state, &config).unwrap();
        assert_eq!(outcome.turn, 1);
        assert_eq!(outcome.segment, Segment::new(config.start, config.start + IVec2::ONE));
        assert_eq!(outcome.status, RaceStatus::InProgress);
        assert_eq!(state.tip, config.start + IVec2::ONE);
        assert_eq!(state.trajectory.len(), 1);
    }

    #[test]
    fn test_zero_velocity_turn_still_counts() {
        let (mut state, config) = setup();
        advance_turn(&mut state, &config);
        assert_eq!(state.turn, 1);
        assert_eq!(state.tip, config.start);
        assert!(state.trajectory[0].is_point());
    }

    #[test]
    fn test_out_of_bounds_below_zero() {
        let (mut state, config) = setup();
        // Start is at y = 1: two turns of -1 leave the grid
        request_velocity_change(&mut state, Axis::Y, -1).unwrap();
        advance_turn(&mut state, &config);
        assert_eq!(state.status, RaceStatus::InProgress);
        assert_eq!(state.tip.y, 0);

        let outcome = advance_turn(&mut state, &config).unwrap();
        assert_eq!(outcome.status, RaceStatus::OutOfBounds);
        assert_eq!(state.tip.y, -1);
        assert_eq!(state.turn, 2);
    }

    #[test]
    fn test_far_edge_is_in_bounds() {
        let config = RaceConfig {
            width: 4,
            height: 4,
            start: IVec2::new(3, 0),
            ..RaceConfig::default()
        };
        let mut state = RaceState::new(config.start);

        request_velocity_change(&mut state, Axis::X, 1).unwrap();
        advance_turn(&mut state, &config);
        // x == width is still on the grid
        assert_eq!(state.tip.x, 4);
        assert_eq!(state.status, RaceStatus::InProgress);

        advance_turn(&mut state, &config);
        assert_eq!(state.status, RaceStatus::OutOfBounds);
    }

    #[test]
    fn test_goal_beats_out_of_bounds() {
        let config = RaceConfig {
            width: 10,
            height: 10,
            start: IVec2::new(5, 9),
            start_line: Segment::new(IVec2::new(4, 9), IVec2::new(5, 9)),
            goal_line: Segment::new(IVec2::new(4, 10), IVec2::new(6, 10)),
        };
        let mut state = RaceState::new(config.start);
        state.committed = IVec2::new(0, 1);
        state.pending = IVec2::new(0, 2);

        // (5, 9) -> (5, 11) crosses the goal and leaves the grid
        let outcome = advance_turn(&mut state, &config).unwrap();
        assert_eq!(outcome.status, RaceStatus::Won);
        assert_eq!(state.tip, IVec2::new(5, 11));
    }

    #[test]
    fn test_terminal_state_frozen() {
        let (mut state, config) = setup();
        request_velocity_change(&mut state, Axis::Y, -1).unwrap();
        advance_turn(&mut state, &config);
        advance_turn(&mut state, &config);
        assert_eq!(state.status, RaceStatus::OutOfBounds);

        let frozen = state.clone();
        for _ in 0..3 {
            assert!(advance_turn(&mut state, &config).is_none());
        }
        assert!(!request_velocity_change(&mut state, Axis::X, 1).unwrap());
        assert!(!request_velocity_change(&mut state, Axis::Y, 1).unwrap());
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_command_parse_and_display() {
        assert_eq!("+x".parse::<Command>().unwrap(), Command::AccelerateX);
        assert_eq!("-Y".parse::<Command>().unwrap(), Command::DecelerateY);
        assert_eq!(" tic ".parse::<Command>().unwrap(), Command::Advance);
        assert_eq!("next".parse::<Command>().unwrap(), Command::Advance);
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(RaceError::UnknownCommand(_))
        ));

        for command in [
            Command::AccelerateX,
            Command::DecelerateX,
            Command::AccelerateY,
            Command::DecelerateY,
            Command::Advance,
        ] {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_apply_command() {
        let (mut state, config) = setup();
        assert!(apply_command(&mut state, &config, Command::AccelerateX).is_none());
        assert_eq!(state.pending, IVec2::new(1, 0));

        let outcome = apply_command(&mut state, &config, Command::Advance).unwrap();
        assert_eq!(outcome.turn, 1);
        assert_eq!(state.tip, config.start + IVec2::X);
    }

    #[test]
    fn test_step_past_i32_range_is_out_of_bounds() {
        let config = RaceConfig {
            width: i32::MAX,
            height: 20,
            start: IVec2::new(i32::MAX, 1),
            ..RaceConfig::default()
        };
        let mut state = RaceState::new(config.start);
        assert!(request_velocity_change(&mut state, Axis::X, 1).unwrap());

        let outcome = advance_turn(&mut state, &config).unwrap();
        assert_eq!(outcome.status, RaceStatus::OutOfBounds);
        assert_eq!(state.tip, IVec2::new(i32::MAX, 1));
        assert_eq!(state.turn, 1);
        assert!(advance_turn(&mut state, &config).is_none());
    }

    #[test]
    fn test_step_below_i32_range_is_out_of_bounds() {
        let config = RaceConfig::default();
        let mut state = RaceState::new(IVec2::new(i32::MIN, 5));
        state.committed = IVec2::new(0, 0);
        state.pending = IVec2::new(-1, 0);

        let outcome = advance_turn(&mut state, &config).unwrap();
        assert_eq!(outcome.status, RaceStatus::OutOfBounds);
        assert_eq!(outcome.segment.p2, IVec2::new(i32::MIN, 5));
    }

    #[test]
    fn test_commands_never_reach_past_limit() {
        let (mut state, config) = setup();
        for _ in 0..3 {
            apply_command(&mut state, &config, Command::DecelerateX);
        }
        assert_eq!(state.pending, IVec2::new(-1, 0));

        advance_turn(&mut state, &config);
        for _ in 0..3 {
            apply_command(&mut state, &config, Command::AccelerateX);
        }
        assert_eq!(state.pending, IVec2::new(0, 0));
    }
}
