//! Variable store: named scalar properties of an input.
//!
//! The store itself belongs to the object system hosting the input; this
//! crate only needs typed get/set by name. [`MemoryVarStore`] is the
//! in-process implementation used by the CLI and the tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::ControlError;

/// A scalar variable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarValue {
    Float(f64),
    Integer(i64),
    Bool(bool),
}

impl VarValue {
    fn same_type(&self, other: &VarValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Get/set contract over the external variable store.
pub trait VarStore: Send + Sync {
    /// Current value, or `None` if the variable does not exist.
    fn get(&self, name: &str) -> Option<VarValue>;

    /// Store a value. The store may reject it (wrong type, constraint).
    fn set(&self, name: &str, value: VarValue) -> Result<(), ControlError>;
}

/// Names of the variables the control layer reads and writes.
pub mod names {
    pub const POSITION: &str = "position";
    pub const LENGTH: &str = "length";
    pub const TIME: &str = "time";
    pub const RATE: &str = "rate";
    pub const STATE: &str = "state";
    pub const AUDIO_DELAY: &str = "audio-delay";
    pub const SPU_DELAY: &str = "spu-delay";
    pub const RECORD: &str = "record";
    pub const TITLE: &str = "title";
}

type Constraint = fn(&VarValue) -> bool;

fn finite_positive(value: &VarValue) -> bool {
    matches!(value, VarValue::Float(f) if f.is_finite() && *f > 0.0)
}

fn non_negative(value: &VarValue) -> bool {
    matches!(value, VarValue::Integer(i) if *i >= 0)
}

/// A mutex-guarded map of variables with per-variable constraints.
///
/// Variables keep the type they were created with; a `set` with another
/// type is rejected.
pub struct MemoryVarStore {
    vars: Mutex<HashMap<String, VarValue>>,
    constraints: HashMap<&'static str, Constraint>,
}

impl MemoryVarStore {
    /// An empty store without constraints.
    pub fn empty() -> Self {
        Self {
            vars: Mutex::new(HashMap::new()),
            constraints: HashMap::new(),
        }
    }

    /// A store holding the input variables with their initial values.
    pub fn new() -> Self {
        let mut store = Self::empty();
        let defaults = [
            (names::POSITION, VarValue::Float(0.0)),
            (names::LENGTH, VarValue::Integer(0)),
            (names::TIME, VarValue::Integer(0)),
            (names::RATE, VarValue::Float(1.0)),
            (names::STATE, VarValue::Integer(0)),
            (names::AUDIO_DELAY, VarValue::Integer(0)),
            (names::SPU_DELAY, VarValue::Integer(0)),
            (names::RECORD, VarValue::Bool(false)),
            (names::TITLE, VarValue::Integer(0)),
        ];
        {
            let vars = store.vars.get_mut().unwrap_or_else(PoisonError::into_inner);
            for (name, value) in defaults {
                vars.insert(name.to_string(), value);
            }
        }
        store.constraints.insert(names::RATE, finite_positive);
        store.constraints.insert(names::TITLE, non_negative);
        store
    }

    /// Create or overwrite a variable, bypassing type and constraint checks.
    /// Used by the producer side (demuxer updates length, title, ...).
    pub fn create(&self, name: &str, value: VarValue) {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
    }
}

impl Default for MemoryVarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VarStore for MemoryVarStore {
    fn get(&self, name: &str) -> Option<VarValue> {
        self.vars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    fn set(&self, name: &str, value: VarValue) -> Result<(), ControlError> {
        if let Some(check) = self.constraints.get(name) {
            if !check(&value) {
                return Err(ControlError::Rejected(name.to_string()));
            }
        }
        let mut vars = self.vars.lock().unwrap_or_else(PoisonError::into_inner);
        match vars.get_mut(name) {
            Some(slot) if slot.same_type(&value) => {
                *slot = value;
                Ok(())
            }
            Some(_) => Err(ControlError::Rejected(name.to_string())),
            None => {
                vars.insert(name.to_string(), value);
                Ok(())
            }
        }
    }
}
