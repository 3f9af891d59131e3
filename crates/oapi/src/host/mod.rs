//! Automation hosts
//!
//! A host performs one late-bound call per [`AutomationHost::call`]: it
//! resolves the handle's path, looks the method up by name, hands the packed
//! parameters over, lets the remote side write into by-ref slots (marking
//! them written) and returns the method's raw return value.
//!
//! - [`LoopbackHost`]: in-process, scriptable; used by tests and dry runs
//! - `ComHost`: `IDispatch` automation on Windows (feature `com`)

mod loopback;
#[cfg(all(windows, feature = "com"))]
mod com;

use oapi_variant::{Param, Variant};
use crate::types::{Handle, Result};

pub use loopback::{CallFrame, CallRecord, Handler, LoopbackHost};
#[cfg(all(windows, feature = "com"))]
pub use com::ComHost;

/// One remote automation endpoint
pub trait AutomationHost: Send + Sync {
    /// Perform exactly one round trip
    ///
    /// Errors mean the call produced no status: unreachable host, terminated
    /// session, unknown member or an argument the host could not accept.
    fn call(&self, handle: &Handle, method: &str, params: &mut [Param]) -> Result<Variant>;

    /// Short description for diagnostics
    fn describe(&self) -> String;
}
