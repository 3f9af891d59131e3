//! The generic automation payload

use std::fmt;
use crate::{SafeArray, ScalarType, VarType};

/// A single automation value
///
/// This is the payload every remote argument and return value is converted
/// into. Values never change type implicitly: an `Int` is not readable as a
/// `Double` and vice versa.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    /// No value (also the state of an unrequested output)
    #[default]
    Empty,
    Int(i32),
    Double(f64),
    Bool(bool),
    Str(String),
    Array(SafeArray),
}

impl Variant {
    /// Runtime type of this value
    pub fn vartype(&self) -> VarType {
        match self {
            Variant::Empty => VarType::Empty,
            Variant::Int(_) => VarType::Scalar(ScalarType::Int),
            Variant::Double(_) => VarType::Scalar(ScalarType::Double),
            Variant::Bool(_) => VarType::Scalar(ScalarType::Bool),
            Variant::Str(_) => VarType::Scalar(ScalarType::Str),
            Variant::Array(a) => VarType::Array(a.element_type()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Variant::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Variant::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&SafeArray> {
        match self {
            Variant::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Empty => write!(f, "<empty>"),
            Variant::Int(v) => write!(f, "{}", v),
            Variant::Double(v) => write!(f, "{}", v),
            Variant::Bool(v) => write!(f, "{}", v),
            Variant::Str(v) => write!(f, "{:?}", v),
            Variant::Array(a) => write!(f, "{}[{}]", VarType::Scalar(a.element_type()), a.len()),
        }
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Variant::Int(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Double(v)
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::Str(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::Str(v)
    }
}

impl From<SafeArray> for Variant {
    fn from(v: SafeArray) -> Self {
        Variant::Array(v)
    }
}

impl<T> From<Vec<T>> for Variant
where
    SafeArray: From<Vec<T>>,
{
    fn from(v: Vec<T>) -> Self {
        Variant::Array(SafeArray::from(v))
    }
}
