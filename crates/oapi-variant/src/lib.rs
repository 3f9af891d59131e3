//! Automation payload model
//!
//! This crate provides the value types exchanged with a late-bound automation
//! host: the generic [`Variant`] payload, one-dimensional [`SafeArray`]s and the
//! by-reference boxes ([`ByRef`], [`ArrayRef`]) that a remote call may write into.
//!
//! # Payload shape
//!
//! Every positional argument of a remote call is packed into a [`Param`]:
//! - By-value arguments carry a [`Variant`] the host may only read
//! - By-reference arguments carry a declared [`VarType`] and an optional input
//!   value; the host may overwrite them, and the fact that it did is recorded
//! - Arrays travel as a single contiguous, zero-based sequence with an explicit
//!   element count, never as a caller-managed pointer/length pair

mod error;
mod vartype;
mod variant;
mod safearray;
mod scalar;
mod param;
mod byref;

pub use error::{VariantError, Result};
pub use vartype::{vt, ScalarType, VarType};
pub use variant::Variant;
pub use safearray::SafeArray;
pub use scalar::Scalar;
pub use param::{Direction, Param};
pub use byref::{ArrayRef, ByRef, RefSlot};
