//! Payload error types

use thiserror::Error;
use crate::VarType;

/// Errors raised while converting or writing payload values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// The value's runtime type differs from the type the slot or reader expects
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: VarType, found: VarType },

    /// A by-value argument was written to
    #[error("argument is passed by value and cannot be written")]
    ReadOnly,
}

/// Result type for payload operations
pub type Result<T> = std::result::Result<T, VariantError>;
