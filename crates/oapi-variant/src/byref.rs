//! By-reference boxes
//!
//! Two box shapes carry values a remote call may write:
//!
//! - [`ByRef<T>`]: a single scalar cell
//! - [`ArrayRef<T>`]: a resizable one-dimensional sequence
//!
//! Both have a sentinel state ("requested, no input offered") that survives a
//! call the host did not write, so callers can tell "not populated" apart from
//! "populated with zero/empty". Boxes live for exactly one call.

use std::ops::Index;
use std::slice;
use crate::{Param, Result, Scalar, VarType, Variant};

/// Something a remote call can write back into
pub trait RefSlot {
    /// Pack the current contents as a writable parameter
    fn pack(&self) -> Param;

    /// Replace the contents with a value the host wrote
    fn unpack(&mut self, value: Variant) -> Result<()>;
}

/// Mutable scalar cell with a sentinel state
#[derive(Debug, Clone, PartialEq)]
pub struct ByRef<T>(Option<T>);

impl<T: Scalar> ByRef<T> {
    /// Output wanted, no input offered
    pub fn empty() -> Self {
        Self(None)
    }

    /// Pre-loaded with an input value (in/out parameter)
    pub fn of(value: T) -> Self {
        Self(Some(value))
    }

    /// Whether the box holds a value (input or written output)
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Contents, `None` while in the sentinel state
    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Contents, or `T::default()` when unset
    ///
    /// Hosts do not guarantee to populate every requested output, so reading
    /// an unset box is legal and yields the type's default.
    pub fn get(&self) -> T {
        self.0.clone().unwrap_or_default()
    }

    /// Move the contents out, leaving the sentinel behind
    pub fn take(&mut self) -> Option<T> {
        self.0.take()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T: Scalar> Default for ByRef<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Scalar> From<Option<T>> for ByRef<T> {
    fn from(opt: Option<T>) -> Self {
        Self(opt)
    }
}

impl<T: Scalar> RefSlot for ByRef<T> {
    fn pack(&self) -> Param {
        let initial = self.0.clone().map(T::into_variant).unwrap_or_default();
        Param::by_ref(VarType::Scalar(T::TYPE), initial)
    }

    fn unpack(&mut self, value: Variant) -> Result<()> {
        self.0 = Some(T::from_variant(value)?);
        Ok(())
    }
}

/// Mutable, resizable one-dimensional sequence with a sentinel state
///
/// Pre-call the caller may leave it empty ("produce whatever length you
/// need") or pre-size it. Post-call, length and contents are exactly what
/// the host wrote; the pre-call length is not preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayRef<T>(Option<Vec<T>>);

impl<T: Scalar> ArrayRef<T> {
    /// Output wanted, no input offered
    pub fn empty() -> Self {
        Self(None)
    }

    /// Pre-loaded with input elements
    pub fn of(values: Vec<T>) -> Self {
        Self(Some(values))
    }

    /// Pre-sized with `len` default elements
    pub fn with_len(len: usize) -> Self {
        Self(Some(vec![T::default(); len]))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Current length; zero in the sentinel state
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[T] {
        self.0.as_deref().unwrap_or(&[])
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Move the elements out; an unset box yields an empty vector
    pub fn into_vec(self) -> Vec<T> {
        self.0.unwrap_or_default()
    }

    pub fn into_option(self) -> Option<Vec<T>> {
        self.0
    }
}

impl<T: Scalar> Default for ArrayRef<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Scalar> From<Vec<T>> for ArrayRef<T> {
    fn from(values: Vec<T>) -> Self {
        Self::of(values)
    }
}

impl<T: Scalar> Index<usize> for ArrayRef<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T: Scalar> IntoIterator for &'a ArrayRef<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar> RefSlot for ArrayRef<T> {
    fn pack(&self) -> Param {
        let initial = self
            .0
            .clone()
            .map(|v| Variant::Array(T::into_array(v)))
            .unwrap_or_default();
        Param::by_ref(VarType::Array(T::TYPE), initial)
    }

    fn unpack(&mut self, value: Variant) -> Result<()> {
        match value {
            Variant::Array(array) => {
                self.0 = Some(T::from_array(array)?);
                Ok(())
            }
            other => Err(crate::VariantError::TypeMismatch {
                expected: VarType::Array(T::TYPE),
                found: other.vartype(),
            }),
        }
    }
}
