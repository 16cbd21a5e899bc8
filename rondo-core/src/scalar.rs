//! Typed accessors for the scalar input variables.

use rondo_types::{PlayState, Tick};

use crate::var::{names, VarStore, VarValue};
use crate::ControlError;

/// Rate value of normal-speed playback.
///
/// The variable store keeps the playback speed as a float multiplier; the
/// control protocol speaks in rate values where `RATE_DEFAULT / value` is
/// that multiplier (500 is double speed, 2000 is half speed).
pub const RATE_DEFAULT: i32 = 1000;

/// Rate value for a speed multiplier.
pub fn rate_from_multiplier(multiplier: f64) -> i32 {
    (RATE_DEFAULT as f64 / multiplier).round() as i32
}

/// Speed multiplier for a rate value.
pub fn multiplier_from_rate(rate: i32) -> f64 {
    RATE_DEFAULT as f64 / rate as f64
}

/// Borrowed view of the variable store with typed get/set pairs.
pub struct Scalars<'a> {
    vars: &'a dyn VarStore,
}

impl<'a> Scalars<'a> {
    pub fn new(vars: &'a dyn VarStore) -> Self {
        Self { vars }
    }

    fn float(&self, name: &str) -> f64 {
        match self.vars.get(name) {
            Some(VarValue::Float(f)) => f,
            Some(VarValue::Integer(i)) => i as f64,
            other => {
                log::debug!(target: "control", "variable '{}' not a float ({:?})", name, other);
                0.0
            }
        }
    }

    fn integer(&self, name: &str) -> i64 {
        match self.vars.get(name) {
            Some(VarValue::Integer(i)) => i,
            other => {
                log::debug!(target: "control", "variable '{}' not an integer ({:?})", name, other);
                0
            }
        }
    }

    fn boolean(&self, name: &str) -> bool {
        match self.vars.get(name) {
            Some(VarValue::Bool(b)) => b,
            Some(VarValue::Integer(i)) => i != 0,
            _ => false,
        }
    }

    pub fn position(&self) -> f64 {
        self.float(names::POSITION)
    }

    pub fn set_position(&self, position: f64) -> Result<(), ControlError> {
        self.vars.set(names::POSITION, VarValue::Float(position))
    }

    pub fn length(&self) -> Tick {
        Tick::new(self.integer(names::LENGTH))
    }

    pub fn time(&self) -> Tick {
        Tick::new(self.integer(names::TIME))
    }

    pub fn set_time(&self, time: Tick) -> Result<(), ControlError> {
        self.vars.set(names::TIME, VarValue::Integer(time.get()))
    }

    /// Current rate value (see [`RATE_DEFAULT`]).
    pub fn rate(&self) -> i32 {
        let stored = self.float(names::RATE);
        if !stored.is_finite() || stored <= 0.0 {
            log::warn!(target: "control", "stored rate {} unusable, reporting default", stored);
            return RATE_DEFAULT;
        }
        rate_from_multiplier(stored)
    }

    /// Set the rate value. Zero or negative values produce a speed the
    /// store rejects.
    pub fn set_rate(&self, rate: i32) -> Result<(), ControlError> {
        self.vars
            .set(names::RATE, VarValue::Float(multiplier_from_rate(rate)))
    }

    pub fn state(&self) -> PlayState {
        let raw = self.integer(names::STATE);
        PlayState::from_raw(raw).unwrap_or_else(|| {
            log::warn!(target: "control", "unknown play state {}", raw);
            PlayState::Init
        })
    }

    pub fn set_state(&self, state: PlayState) -> Result<(), ControlError> {
        self.vars.set(names::STATE, VarValue::Integer(state.as_raw()))
    }

    pub fn audio_delay(&self) -> Tick {
        Tick::new(self.integer(names::AUDIO_DELAY))
    }

    pub fn set_audio_delay(&self, delay: Tick) -> Result<(), ControlError> {
        self.vars.set(names::AUDIO_DELAY, VarValue::Integer(delay.get()))
    }

    pub fn spu_delay(&self) -> Tick {
        Tick::new(self.integer(names::SPU_DELAY))
    }

    pub fn set_spu_delay(&self, delay: Tick) -> Result<(), ControlError> {
        self.vars.set(names::SPU_DELAY, VarValue::Integer(delay.get()))
    }

    pub fn record(&self) -> bool {
        self.boolean(names::RECORD)
    }

    pub fn set_record(&self, record: bool) -> Result<(), ControlError> {
        self.vars.set(names::RECORD, VarValue::Bool(record))
    }

    /// Offset of the active title.
    pub fn current_title(&self) -> usize {
        self.integer(names::TITLE).max(0) as usize
    }
}
