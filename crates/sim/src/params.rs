//! Tunable policy parameters and their discovery.

use std::collections::HashMap;

use physics::Observation;
use thiserror::Error;

use crate::Policy;

/// Why a parameter edit was rejected. Both cases are recoverable: the
/// table, the runs and the reward history are left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    /// The value did not parse to a finite number.
    #[error("parameter value {0} is not finite")]
    NonFinite(f32),
    /// The policy never registered this name.
    #[error("unknown parameter `{0}`")]
    Unknown(String),
}

/// One named, tunable value.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f32,
}

/// Ordered name -> value table.
///
/// Order is the order of first registration; a name, once registered,
/// keeps its index for the life of the set.
#[derive(Clone, Debug, Default)]
pub struct ParameterSet {
    entries: Vec<Parameter>,
    index: HashMap<String, usize>,
}

impl ParameterSet {
    /// Registers `name` with an initial `value` if unseen, returning its
    /// stable index. Re-registering is a no-op keeping the stored value.
    pub fn register(&mut self, name: &str, value: f32) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.entries.len();
        self.index.insert(name.to_owned(), i);
        self.entries.push(Parameter {
            name: name.to_owned(),
            value,
        });
        i
    }

    /// Current value of `name`; zero for names that were never registered,
    /// matching the initial value a discovered parameter starts with.
    #[must_use]
    pub fn value(&self, name: &str) -> f32 {
        self.index.get(name).map_or(0.0, |&i| self.entries[i].value)
    }

    /// Evaluates the policy once against `sample`, purely to find out which
    /// parameter names it reads. Every distinct name is registered exactly
    /// once, value zero, in first-seen order. Lookups during real
    /// simulation are then plain reads.
    pub fn discover(&mut self, policy: Policy, sample: &Observation) {
        let mut lookup = |name: &str| {
            self.register(name, 0.0);
            self.value(name)
        };
        policy(sample, &mut lookup);
    }

    /// Validates and stores an edit, reporting whether the value actually
    /// changed. Non-finite input and unknown names are rejected without
    /// touching the table, so a half-typed number in the host UI cannot
    /// reset running episodes.
    pub fn set(&mut self, name: &str, value: f32) -> Result<bool, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFinite(value));
        }
        let Some(&i) = self.index.get(name) else {
            return Err(ParamError::Unknown(name.to_owned()));
        };
        let entry = &mut self.entries[i];
        if entry.value == value {
            return Ok(false);
        }
        entry.value = value;
        Ok(true)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Parameter] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
