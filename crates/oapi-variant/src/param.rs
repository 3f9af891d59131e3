//! Packed call parameters
//!
//! A [`Param`] is what an automation host actually sees for one positional
//! argument. By-reference params start with the caller's input (or `Empty`
//! for an unrequested input) and record whether the host wrote them, which is
//! how an untouched output stays distinguishable from one written with zero.

use crate::{Result, VarType, Variant, VariantError};

/// Passing convention of a parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Read-only for the host
    In,
    /// The host may overwrite the value
    InOut,
}

/// One positional argument of a remote call
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    direction: Direction,
    declared: VarType,
    value: Variant,
    written: bool,
}

impl Param {
    /// A read-only argument; its declared type is the value's type
    pub fn by_value(value: Variant) -> Self {
        Self {
            direction: Direction::In,
            declared: value.vartype(),
            value,
            written: false,
        }
    }

    /// A writable slot of the given type, optionally pre-loaded with an input
    pub fn by_ref(declared: VarType, initial: Variant) -> Self {
        Self {
            direction: Direction::InOut,
            declared,
            value: initial,
            written: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_by_ref(&self) -> bool {
        self.direction == Direction::InOut
    }

    /// Type the slot was declared with (the value may still be `Empty`)
    pub fn declared(&self) -> VarType {
        self.declared
    }

    /// Current value: the caller's input, or what the host wrote
    pub fn value(&self) -> &Variant {
        &self.value
    }

    /// Whether the host wrote this slot during the call
    pub fn written(&self) -> bool {
        self.written
    }

    /// Store a host result into this slot
    pub fn write(&mut self, value: Variant) -> Result<()> {
        if !self.is_by_ref() {
            return Err(VariantError::ReadOnly);
        }
        let found = value.vartype();
        if found != self.declared {
            return Err(VariantError::TypeMismatch {
                expected: self.declared,
                found,
            });
        }
        self.value = value;
        self.written = true;
        Ok(())
    }

    /// The written value, if the host wrote one
    pub fn into_written(self) -> Option<Variant> {
        if self.written {
            Some(self.value)
        } else {
            None
        }
    }
}
