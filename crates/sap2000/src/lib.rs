//! Typed call sites for the SAP2000 automation object model
//!
//! Each proxy wraps a resolved path under the application's root object and
//! turns the bridge's status convention into ordinary results: a zero status
//! is `Ok`, a non-zero status is [`SapError::Rejected`], and any bridge
//! failure is [`SapError::Bridge`]. By-ref boxes stay inside the proxies.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oapi::LoopbackHost;
//! use sap2000::{SapConfig, SapObject, Units};
//!
//! # fn main() -> sap2000::SapResult<()> {
//! let host = Arc::new(LoopbackHost::new("Sap2000v15.SapObject"));
//! let sap = SapObject::new(host, SapConfig::default())?;
//! sap.application_start(Units::KipInF, true, "")?;
//!
//! let model = sap.sap_model();
//! model.initialize_new_model(Units::KipInF)?;
//! model.file().new_blank()?;
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod enums;
pub mod error;
pub mod model;
pub mod object;

pub use component::{Component, SapComponent};
pub use config::{ProgramVersion, SapConfig};
pub use enums::{
    Dir, DistributedLoadType, ItemType, ItemTypeElm, LoadPatternType, LoadType, MatType, Units,
};
pub use error::{SapError, SapResult};
pub use model::SapModel;
pub use object::SapObject;
