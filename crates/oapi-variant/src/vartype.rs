//! Variant type tags
//!
//! Automation hosts tag every value with a small integer type code. Only the
//! subset the bridge exchanges is modelled here: 32-bit integers, doubles,
//! booleans, strings and one-dimensional arrays of those.

use std::fmt;

/// Automation type codes (`VARTYPE`)
pub mod vt {
    /// No value
    pub const VT_EMPTY: u16 = 0;
    /// 32-bit signed integer
    pub const VT_I4: u16 = 3;
    /// 64-bit IEEE double
    pub const VT_R8: u16 = 5;
    /// Length-prefixed string
    pub const VT_BSTR: u16 = 8;
    /// Automation boolean
    pub const VT_BOOL: u16 = 11;
    /// Nested variant
    pub const VT_VARIANT: u16 = 12;
    /// Array flag, combined with the element type
    pub const VT_ARRAY: u16 = 0x2000;
    /// By-reference flag, combined with the value type
    pub const VT_BYREF: u16 = 0x4000;
    /// Mask selecting the base type
    pub const VT_TYPEMASK: u16 = 0x0fff;
}

/// Element type of a scalar or of an array's elements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Double,
    Bool,
    Str,
}

impl ScalarType {
    /// Automation type code of this element type
    pub fn code(self) -> u16 {
        match self {
            ScalarType::Int => vt::VT_I4,
            ScalarType::Double => vt::VT_R8,
            ScalarType::Bool => vt::VT_BOOL,
            ScalarType::Str => vt::VT_BSTR,
        }
    }

    /// Element type for a base type code
    pub fn from_code(code: u16) -> Option<Self> {
        match code & vt::VT_TYPEMASK {
            vt::VT_I4 => Some(ScalarType::Int),
            vt::VT_R8 => Some(ScalarType::Double),
            vt::VT_BOOL => Some(ScalarType::Bool),
            vt::VT_BSTR => Some(ScalarType::Str),
            _ => None,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            ScalarType::Int => "I4",
            ScalarType::Double => "R8",
            ScalarType::Bool => "BOOL",
            ScalarType::Str => "BSTR",
        }
    }
}

/// Runtime type of a [`Variant`](crate::Variant)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarType {
    /// No value
    Empty,
    /// A single value
    Scalar(ScalarType),
    /// A one-dimensional array of values
    Array(ScalarType),
}

impl VarType {
    pub const INT: VarType = VarType::Scalar(ScalarType::Int);
    pub const DOUBLE: VarType = VarType::Scalar(ScalarType::Double);
    pub const BOOL: VarType = VarType::Scalar(ScalarType::Bool);
    pub const STR: VarType = VarType::Scalar(ScalarType::Str);

    /// Automation type code, without the by-reference flag
    pub fn code(self) -> u16 {
        match self {
            VarType::Empty => vt::VT_EMPTY,
            VarType::Scalar(s) => s.code(),
            VarType::Array(s) => vt::VT_ARRAY | s.code(),
        }
    }

    /// Decode a type code; the by-reference flag is ignored
    pub fn from_code(code: u16) -> Option<Self> {
        let code = code & !vt::VT_BYREF;
        if code == vt::VT_EMPTY {
            return Some(VarType::Empty);
        }
        let element = ScalarType::from_code(code)?;
        if code & vt::VT_ARRAY != 0 {
            Some(VarType::Array(element))
        } else if code & !vt::VT_TYPEMASK == 0 {
            Some(VarType::Scalar(element))
        } else {
            None
        }
    }

    /// Whether this is an array type
    pub fn is_array(self) -> bool {
        matches!(self, VarType::Array(_))
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Empty => write!(f, "EMPTY"),
            VarType::Scalar(s) => write!(f, "{}", s.mnemonic()),
            VarType::Array(s) => write!(f, "ARRAY({})", s.mnemonic()),
        }
    }
}
