//! Scalar element types
//!
//! The four Rust types that map one-to-one onto automation scalars. Conversions
//! are strict: a value is accepted only when its runtime type is exactly the
//! expected one, so what the host wrote is what the caller reads.

use crate::{Result, SafeArray, ScalarType, VarType, Variant, VariantError};

/// A Rust type with a direct automation scalar representation
pub trait Scalar: Clone + Default + Sized + 'static {
    /// Automation element type of `Self`
    const TYPE: ScalarType;

    /// Wrap a value as a variant
    fn into_variant(self) -> Variant;

    /// Unwrap a variant of exactly this type
    fn from_variant(value: Variant) -> Result<Self>;

    /// Wrap a sequence as a safe array
    fn into_array(values: Vec<Self>) -> SafeArray;

    /// Unwrap a safe array of exactly this element type
    fn from_array(array: SafeArray) -> Result<Vec<Self>>;
}

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident) => {
        impl Scalar for $ty {
            const TYPE: ScalarType = ScalarType::$kind;

            fn into_variant(self) -> Variant {
                Variant::$kind(self)
            }

            fn from_variant(value: Variant) -> Result<Self> {
                match value {
                    Variant::$kind(v) => Ok(v),
                    other => Err(VariantError::TypeMismatch {
                        expected: VarType::Scalar(ScalarType::$kind),
                        found: other.vartype(),
                    }),
                }
            }

            fn into_array(values: Vec<Self>) -> SafeArray {
                SafeArray::$kind(values)
            }

            fn from_array(array: SafeArray) -> Result<Vec<Self>> {
                match array {
                    SafeArray::$kind(v) => Ok(v),
                    other => Err(VariantError::TypeMismatch {
                        expected: VarType::Array(ScalarType::$kind),
                        found: VarType::Array(other.element_type()),
                    }),
                }
            }
        }
    };
}

impl_scalar!(i32, Int);
impl_scalar!(f64, Double);
impl_scalar!(bool, Bool);
impl_scalar!(String, Str);
