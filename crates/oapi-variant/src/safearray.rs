//! One-dimensional safe arrays
//!
//! The automation host exchanges arrays as a single contiguous sequence with
//! an explicit element count and implicit zero lower bound:
//!
//! ```text
//! element_type: VARTYPE   # shared by every element
//! count: u32              # number of elements
//! elements[count]
//! ```
//!
//! Storage is typed per element kind, so an array can never hold mixed types.

use crate::{ScalarType, Variant};

/// Zero-based, one-dimensional array of a single element type
#[derive(Debug, Clone, PartialEq)]
pub enum SafeArray {
    Int(Vec<i32>),
    Double(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl SafeArray {
    /// Create an empty array of the given element type
    pub fn new(element: ScalarType) -> Self {
        Self::with_len(element, 0)
    }

    /// Create an array of `len` default-valued elements
    pub fn with_len(element: ScalarType, len: usize) -> Self {
        match element {
            ScalarType::Int => SafeArray::Int(vec![0; len]),
            ScalarType::Double => SafeArray::Double(vec![0.0; len]),
            ScalarType::Bool => SafeArray::Bool(vec![false; len]),
            ScalarType::Str => SafeArray::Str(vec![String::new(); len]),
        }
    }

    /// Element type shared by all elements
    pub fn element_type(&self) -> ScalarType {
        match self {
            SafeArray::Int(_) => ScalarType::Int,
            SafeArray::Double(_) => ScalarType::Double,
            SafeArray::Bool(_) => ScalarType::Bool,
            SafeArray::Str(_) => ScalarType::Str,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            SafeArray::Int(v) => v.len(),
            SafeArray::Double(v) => v.len(),
            SafeArray::Bool(v) => v.len(),
            SafeArray::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper bound as reported by the automation host (`len - 1`), `None` when empty
    pub fn upper_bound(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Copy out a single element
    pub fn get(&self, index: usize) -> Option<Variant> {
        match self {
            SafeArray::Int(v) => v.get(index).map(|x| Variant::Int(*x)),
            SafeArray::Double(v) => v.get(index).map(|x| Variant::Double(*x)),
            SafeArray::Bool(v) => v.get(index).map(|x| Variant::Bool(*x)),
            SafeArray::Str(v) => v.get(index).map(|x| Variant::Str(x.clone())),
        }
    }
}

impl From<Vec<i32>> for SafeArray {
    fn from(elements: Vec<i32>) -> Self {
        SafeArray::Int(elements)
    }
}

impl From<Vec<f64>> for SafeArray {
    fn from(elements: Vec<f64>) -> Self {
        SafeArray::Double(elements)
    }
}

impl From<Vec<bool>> for SafeArray {
    fn from(elements: Vec<bool>) -> Self {
        SafeArray::Bool(elements)
    }
}

impl From<Vec<String>> for SafeArray {
    fn from(elements: Vec<String>) -> Self {
        SafeArray::Str(elements)
    }
}
