//! Data-driven game balance
//!
//! Everything that shapes an attempt lives in [`Tuning`]: physics constants,
//! obstacle geometry, clock cadence and the session attempt limit. Values are
//! fixed for the lifetime of a session; there is no runtime mutation path.
//!
//! Physics constants are expressed per fixed tick (the clock is fixed-rate),
//! so `gravity` is units/tick² and `pipe_speed` is units/tick.

use serde::{Deserialize, Serialize};

/// Fixed simulation tick rate (50 Hz, 20 ms period)
pub const TICKS_PER_SEC: u32 = 50;
/// Maximum substeps per frame to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;

/// Game balance constants, fixed per session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Playfield width (units)
    pub playfield_w: f32,
    /// Playfield height (units)
    pub playfield_h: f32,

    /// Bird horizontal position (never changes; the world scrolls)
    pub bird_x: f32,
    /// Bird spawn height
    pub bird_start_y: f32,
    /// Bird bounding box width
    pub bird_w: f32,
    /// Bird bounding box height
    pub bird_h: f32,

    /// Downward acceleration, units/tick²
    pub gravity: f32,
    /// Velocity set by a flap impulse (negative = upward), units/tick
    pub impulse: f32,

    /// Pipe width
    pub pipe_w: f32,
    /// Vertical gap between the top and bottom pipe of a pair
    pub gap: f32,
    /// Leftward pipe speed, units/tick
    pub pipe_speed: f32,
    /// Minimum height of either pipe of a pair
    pub min_clearance: f32,
    /// Extra headroom subtracted from the top-height range
    pub buffer: f32,
    /// Horizontal distance a pair must travel before the next one spawns
    pub spawn_spacing: f32,

    /// Attempts allowed per bound identity
    pub attempt_limit: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_w: 400.0,
            playfield_h: 600.0,
            bird_x: 100.0,
            bird_start_y: 250.0,
            bird_w: 20.0,
            bird_h: 20.0,
            gravity: 0.25,
            impulse: -6.0,
            pipe_w: 60.0,
            gap: 120.0,
            pipe_speed: 2.0,
            min_clearance: 50.0,
            buffer: 50.0,
            spawn_spacing: 200.0,
            attempt_limit: 5,
        }
    }
}

impl Tuning {
    /// Upper bound of the random top-height range (330 for the reference
    /// config). The lower bound is `min_clearance`.
    pub fn gap_span(&self) -> f32 {
        self.playfield_h - self.gap - 2.0 * self.min_clearance - self.buffer
    }

    /// Validate generation geometry. A config that cannot place a gap with
    /// the required clearances is rejected outright rather than clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.playfield_w > 0.0 && self.playfield_h > 0.0) {
            return Err(ConfigError::BadPlayfield {
                w: self.playfield_w,
                h: self.playfield_h,
            });
        }
        if self.gap_span() <= self.min_clearance {
            return Err(ConfigError::GapDoesNotFit {
                playfield_h: self.playfield_h,
                gap: self.gap,
                min_clearance: self.min_clearance,
                buffer: self.buffer,
            });
        }
        if self.attempt_limit == 0 {
            return Err(ConfigError::ZeroAttemptLimit);
        }
        if self.pipe_speed <= 0.0 || self.spawn_spacing <= 0.0 {
            return Err(ConfigError::BadScroll {
                speed: self.pipe_speed,
                spacing: self.spawn_spacing,
            });
        }
        Ok(())
    }
}

/// Fatal configuration error detected at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    BadPlayfield {
        w: f32,
        h: f32,
    },
    /// `playfield_h - gap - 2*min_clearance - buffer` does not exceed
    /// `min_clearance`, so no top height can be drawn
    GapDoesNotFit {
        playfield_h: f32,
        gap: f32,
        min_clearance: f32,
        buffer: f32,
    },
    ZeroAttemptLimit,
    BadScroll {
        speed: f32,
        spacing: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::BadPlayfield { w, h } => {
                write!(f, "playfield dimensions must be positive (got {w}x{h})")
            }
            ConfigError::GapDoesNotFit {
                playfield_h,
                gap,
                min_clearance,
                buffer,
            } => write!(
                f,
                "gap {gap} with clearance {min_clearance} and buffer {buffer} \
                 does not fit a {playfield_h}-unit playfield"
            ),
            ConfigError::ZeroAttemptLimit => write!(f, "attempt limit must be at least 1"),
            ConfigError::BadScroll { speed, spacing } => {
                write!(
                    f,
                    "pipe speed ({speed}) and spawn spacing ({spacing}) must be positive"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn reference_gap_span() {
        // 600 - 120 - 2*50 - 50
        assert_eq!(Tuning::default().gap_span(), 330.0);
    }

    #[test]
    fn degenerate_height_range_is_rejected() {
        // gap_span exactly equals min_clearance: no room to randomize
        let tuning = Tuning {
            playfield_h: 320.0,
            ..Tuning::default()
        };
        assert_eq!(tuning.gap_span(), tuning.min_clearance);
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn impossible_gap_is_rejected_not_clamped() {
        let tuning = Tuning {
            gap: 500.0,
            ..Tuning::default()
        };
        match tuning.validate() {
            Err(ConfigError::GapDoesNotFit { gap, .. }) => assert_eq!(gap, 500.0),
            other => panic!("expected GapDoesNotFit, got {other:?}"),
        }
    }

    #[test]
    fn zero_attempt_limit_is_rejected() {
        let tuning = Tuning {
            attempt_limit: 0,
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::ZeroAttemptLimit));
    }
}
