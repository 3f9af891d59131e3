//! Enumeration code mapping
//!
//! The host exchanges enumerated choices as small integers or fixed strings,
//! one closed code set per family. A Rust family is an ordinary `enum` that
//! implements [`RemoteEnum`], usually declared with [`remote_enum!`]:
//!
//! ```
//! oapi::remote_enum! {
//!     /// Load direction
//!     pub enum Axis: i32 {
//!         X = 1,
//!         Y = 2,
//!         Z = 3,
//!     }
//! }
//! ```
//!
//! Variant → code is total and needs no table. Code → variant goes through
//! an [`EnumRegistry`] built once at startup, which refuses unmapped codes.

mod registry;

use std::borrow::Cow;
use std::fmt;

pub use registry::{EnumMapping, EnumRegistry};

/// A code as understood by the remote host
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RemoteCode {
    Int(i32),
    Str(Cow<'static, str>),
}

impl RemoteCode {
    /// A string code from a table declaration
    pub const fn str(code: &'static str) -> Self {
        RemoteCode::Str(Cow::Borrowed(code))
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            RemoteCode::Int(v) => Some(*v),
            RemoteCode::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RemoteCode::Str(v) => Some(v),
            RemoteCode::Int(_) => None,
        }
    }
}

impl fmt::Display for RemoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCode::Int(v) => write!(f, "{}", v),
            RemoteCode::Str(v) => write!(f, "{:?}", v),
        }
    }
}

/// A closed family of symbolic variants with remote codes
pub trait RemoteEnum: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Family name, used in diagnostics
    const FAMILY: &'static str;

    /// Every variant, in declaration order
    fn variants() -> &'static [Self];

    /// The remote code of this variant
    fn code(self) -> RemoteCode;
}

/// Declare a [`RemoteEnum`] family
///
/// Families use either `i32` codes or `&str` codes, never a mix.
#[macro_export]
macro_rules! remote_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : i32 {
            $( $(#[$vmeta:meta])* $variant:ident = $code:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::enums::RemoteEnum for $name {
            const FAMILY: &'static str = stringify!($name);

            fn variants() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn code(self) -> $crate::enums::RemoteCode {
                match self {
                    $( $name::$variant => $crate::enums::RemoteCode::Int($code) ),+
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : &str {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::enums::RemoteEnum for $name {
            const FAMILY: &'static str = stringify!($name);

            fn variants() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn code(self) -> $crate::enums::RemoteCode {
                match self {
                    $( $name::$variant => $crate::enums::RemoteCode::str($code) ),+
                }
            }
        }
    };
}
