//! # rondo-types
//!
//! Shared type definitions for the rondo input-control stack.
//! This crate contains the media records, query/reply variants, control
//! commands and error codes used by rondo-core and its front ends.

pub mod command;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod media;
pub mod query;

pub use command::{ControlCommand, Slave, SlavePriority};
pub use dispatch::Controller;
pub use error::{ControlError, ResultCode};
pub use event::InputEvent;
pub use media::*;
pub use query::{Arg, ArgKind, Query, QueryCode, QueryResult, Reply, TitleSelector, SIGNATURES};

/// Ticks per second. All time offsets, lengths and delays are expressed in ticks.
pub const CLOCK_FREQ: i64 = 1_000_000;

/// A signed duration in microsecond ticks.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Tick(i64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * CLOCK_FREQ as f64).round() as i64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / CLOCK_FREQ as f64
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// Identifier of an elementary stream (audio, video or subtitle track).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EsId(i32);

impl EsId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
