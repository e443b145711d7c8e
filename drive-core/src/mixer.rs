//! Differential-drive mixing: steer/throttle channels to per-motor commands.
//!
//! The mixer is a pure function of one [`Channels`] snapshot. Steering is
//! achieved by attenuating the inside motor: the further the steer stick
//! is from center, the larger the duty reduction on that side, up to a
//! full-range reduction at full deflection. A small dead-band around the
//! steer center suppresses jitter-induced crabbing.
//!
//! All arithmetic is integer-only and bounded; the mixer carries no state
//! between invocations.

use crate::types::{
    Channels, Direction, DriveCommand, MotorCommand, CHANNEL_MAX, CHANNEL_MIN, CHANNEL_NEUTRAL,
};

/// Half of the nominal stick range, i.e. full deflection from center.
const HALF_RANGE: i32 = ((CHANNEL_MAX - CHANNEL_MIN) / 2) as i32;

/// Which channel indices carry the drive inputs.
#[derive(Debug, Clone, Copy)]
pub struct ChannelLayout {
    /// Channel index for steering (typically CH1).
    pub steer: usize,
    /// Channel index for throttle (typically CH3).
    pub throttle: usize,
}

/// Standard mode-2 transmitter layout: steer on CH1, throttle on CH3.
pub const DEFAULT_LAYOUT: ChannelLayout = ChannelLayout {
    steer: 0,
    throttle: 2,
};

/// How the mixer derives motor direction from the throttle channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectionMode {
    /// Both motors always run forward; throttle only scales duty.
    AlwaysForward,
    /// Throttle above center drives forward, below center drives
    /// backward, and a dead-band around center stops both motors.
    ThrottleBand,
}

/// Mixer configuration.
///
/// Customize at compile time by creating your own const, or start from
/// [`MixerConfig::default()`].
#[derive(Debug, Clone, Copy)]
pub struct MixerConfig {
    /// PWM duty resolution; motor speeds land in `[0, duty_max]`.
    pub duty_max: u16,
    /// Dead-band half-width around the steer center, in channel units.
    pub steer_deadband: u16,
    /// Dead-band half-width around the throttle center, in channel
    /// units. Only used in [`DirectionMode::ThrottleBand`].
    pub throttle_deadband: u16,
    /// Direction derivation mode.
    pub direction_mode: DirectionMode,
    /// Channel-to-input mapping.
    pub layout: ChannelLayout,
}

/// Default configuration: 500-step duty, ±10 dead-bands, always forward.
pub const DEFAULT_CONFIG: MixerConfig = MixerConfig {
    duty_max: 500,
    steer_deadband: 10,
    throttle_deadband: 10,
    direction_mode: DirectionMode::AlwaysForward,
    layout: DEFAULT_LAYOUT,
};

impl Default for MixerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Error type for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NormalizeError {
    /// `value` lies outside `[old_min, old_max]`.
    OutOfRange,
    /// Source or target range is empty or inverted.
    EmptyRange,
}

/// Linearly rescale `value` from `[old_min, old_max]` to
/// `[new_min, new_max]`, rounding to nearest.
///
/// Unlike a clamping rescale, inputs outside the source range are an
/// explicit [`NormalizeError::OutOfRange`] so that callers cannot
/// mistake "could not normalize" for a legitimate zero result.
pub fn normalize(
    value: i32,
    old_min: i32,
    old_max: i32,
    new_min: i32,
    new_max: i32,
) -> Result<i32, NormalizeError> {
    if old_min >= old_max || new_min >= new_max {
        return Err(NormalizeError::EmptyRange);
    }
    if value < old_min || value > old_max {
        return Err(NormalizeError::OutOfRange);
    }
    let old_span = old_max - old_min;
    let new_span = new_max - new_min;
    Ok(new_min + ((value - old_min) * new_span + old_span / 2) / old_span)
}

/// Steering classification: which motor gets attenuated, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Steer {
    Straight,
    /// Attenuate the left motor by this many channel units.
    Left(i32),
    /// Attenuate the right motor by this many channel units.
    Right(i32),
}

/// Classify the steer channel into a band and compute the inside-motor
/// throttle reduction.
fn classify_steer(steer: i32, config: &MixerConfig) -> Steer {
    let off_center = steer - CHANNEL_NEUTRAL as i32;
    if off_center.abs() < config.steer_deadband as i32 {
        return Steer::Straight;
    }
    // Steer outside the nominal range clamps to a full-deflection turn.
    let turn_amount = off_center.abs().min(HALF_RANGE);
    let turn_pct = (turn_amount * 100 + HALF_RANGE / 2) / HALF_RANGE;
    let reduction = (CHANNEL_MAX - CHANNEL_MIN) as i32 * turn_pct / 100;
    if off_center > 0 {
        Steer::Right(reduction)
    } else {
        Steer::Left(reduction)
    }
}

/// Convert an effective throttle value to a duty magnitude.
///
/// A value the rescale cannot represent (the steering reduction pushed it
/// below the stick range, or the receiver is still at its zeroed startup
/// state) commands zero duty.
fn duty(value: i32, config: &MixerConfig) -> u16 {
    match normalize(
        value,
        CHANNEL_MIN as i32,
        CHANNEL_MAX as i32,
        0,
        config.duty_max as i32,
    ) {
        Ok(v) => v as u16,
        Err(_) => 0,
    }
}

/// Mix one channel snapshot into per-motor commands.
///
/// Invoked once per control-loop tick; the output is recomputed from
/// scratch every call.
#[must_use]
pub fn mix(channels: &Channels, config: &MixerConfig) -> DriveCommand {
    let steer = channels.get(config.layout.steer) as i32;
    let throttle = channels.get(config.layout.throttle) as i32;
    let center = CHANNEL_NEUTRAL as i32;

    let (direction, throttle) = match config.direction_mode {
        DirectionMode::AlwaysForward => (Direction::Forward, throttle),
        DirectionMode::ThrottleBand => {
            let band = config.throttle_deadband as i32;
            if throttle >= center + band {
                (Direction::Forward, throttle)
            } else if throttle <= center - band {
                // Mirror the below-center throttle onto the forward scale
                // so the same duty law applies in reverse.
                (Direction::Backward, 2 * center - throttle)
            } else {
                return DriveCommand::STOP;
            }
        }
    };

    let (left_in, right_in) = match classify_steer(steer, config) {
        Steer::Straight => (throttle, throttle),
        Steer::Right(reduction) => (throttle, throttle - reduction),
        Steer::Left(reduction) => (throttle - reduction, throttle),
    };

    DriveCommand {
        left: MotorCommand {
            speed: duty(left_in, config),
            direction,
        },
        right: MotorCommand {
            speed: duty(right_in, config),
            direction,
        },
    }
}
