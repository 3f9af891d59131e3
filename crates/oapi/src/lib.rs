//! Late-bound automation bridge
//!
//! This crate lets typed Rust code drive a remote automation object model
//! whose methods are only known by name at run time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Typed call sites (e.g. the sap2000 crate)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Path Resolver       │  Dispatcher          │  Enum Registry │
//! │  - root ProgID       │  - pack/unpack boxes │  - variant→code│
//! │  - member segments   │  - one round trip    │  - code→variant│
//! │                      │  - status extraction │                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AutomationHost: LoopbackHost (in-process) │ ComHost (IDispatch)│
//! ├─────────────────────────────────────────────────────────────┤
//! │              Payload model (oapi-variant crate)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **Handle**: a remote object identified only by its dotted path
//! - **Status**: integer result of a call; non-zero is a host-defined
//!   rejection, returned as a value and never as an error
//! - **By-ref box**: [`ByRef`]/[`ArrayRef`], written by the host during one call
//!
//! # Modules
//!
//! - [`types`]: handles, statuses and errors
//! - [`enums`]: bidirectional enumeration code tables
//! - [`host`]: the upstream seam and its implementations
//! - [`dispatcher`]: the invocation dispatcher
//! - [`config`]: bridge and COM binding configuration

pub mod types;
pub mod enums;
pub mod host;
pub mod dispatcher;
pub mod config;

pub use types::{
    BridgeError, Result, UnknownCodeError,
    Handle, Status,
    resolve, resolve_segments,
};
pub use enums::{EnumMapping, EnumRegistry, RemoteCode, RemoteEnum};
pub use host::{AutomationHost, CallFrame, CallRecord, LoopbackHost};
#[cfg(all(windows, feature = "com"))]
pub use host::ComHost;
pub use dispatcher::{Arg, Dispatcher};
pub use config::{ApartmentKind, BindMode, BridgeConfig, ComConfig, UnpackPolicy};

pub use oapi_variant::{
    ArrayRef, ByRef, RefSlot, Scalar, ScalarType, SafeArray, VarType, Variant, VariantError,
};
