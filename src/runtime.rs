//! The runtime model shared by both the evaluator and the generated code.

use std::collections::HashMap;

/// Variable store of a single function invocation. Variables which were
/// never assigned read as zero.
#[derive(Debug, Default, Clone)]
pub struct Record {
    vars: HashMap<Box<str>, u64>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Returns the value of `name`, or zero if it was never assigned. Never
    /// inserts.
    pub fn get(&self, name: &str) -> u64 {
        self.vars.get(name).copied().unwrap_or(0)
    }

    /// Assigns `value` to `name`, overwriting any previous value.
    pub fn set(&mut self, name: &str, value: u64) {
        match self.vars.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.vars.insert(name.into(), value);
            }
        }
    }
}

/// Addition. Returns `None` on overflow.
pub fn plus(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b)
}

/// Natural number subtraction (monus): saturates at zero.
pub fn subtract(a: u64, b: u64) -> u64 {
    a.saturating_sub(b)
}
