//! Core bridge types
//!
//! - [`Handle`]: a path-addressed remote object, produced by [`resolve`]
//! - [`Status`]: the integer outcome of one remote call
//! - [`BridgeError`]: the fatal error classes

mod error;
mod handle;
mod status;

pub use error::*;
pub use handle::{resolve, resolve_segments, Handle};
pub use status::Status;
