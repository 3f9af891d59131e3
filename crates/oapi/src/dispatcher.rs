//! Invocation dispatcher
//!
//! Turns a typed call into exactly one host round trip:
//!
//! ```text
//!  args ──pack──► [Param] ──► AutomationHost::call ──► return value
//!                    │                                    │
//!  boxes ◄─unpack────┘ (per UnpackPolicy)      Int ──► Status
//! ```
//!
//! A non-zero status comes back as `Ok(Status)`; only failures that leave
//! no status behind are errors.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use oapi_variant::{ArrayRef, ByRef, Param, RefSlot, Scalar, Variant};
use crate::config::{BridgeConfig, UnpackPolicy};
use crate::enums::{EnumRegistry, RemoteCode};
use crate::host::AutomationHost;
use crate::types::{BridgeError, Handle, Result, Status};

/// One positional argument of a dispatched call
pub enum Arg<'a> {
    /// Passed by value, never written
    Value(Variant),
    /// A box the host may write into
    Ref(&'a mut dyn RefSlot),
}

impl Arg<'_> {
    pub fn is_by_ref(&self) -> bool {
        matches!(self, Arg::Ref(_))
    }

    fn pack(&self) -> Param {
        match self {
            Arg::Value(v) => Param::by_value(v.clone()),
            Arg::Ref(slot) => slot.pack(),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "{}", v),
            Arg::Ref(slot) => write!(f, "&{}", slot.pack().value()),
        }
    }
}

impl From<Variant> for Arg<'_> {
    fn from(v: Variant) -> Self {
        Arg::Value(v)
    }
}

impl From<RemoteCode> for Arg<'_> {
    fn from(code: RemoteCode) -> Self {
        match code {
            RemoteCode::Int(v) => Arg::Value(Variant::Int(v)),
            RemoteCode::Str(v) => Arg::Value(Variant::Str(v.into_owned())),
        }
    }
}

impl From<&str> for Arg<'_> {
    fn from(v: &str) -> Self {
        Arg::Value(Variant::from(v))
    }
}

impl From<&String> for Arg<'_> {
    fn from(v: &String) -> Self {
        Arg::Value(Variant::from(v.as_str()))
    }
}

macro_rules! impl_arg_value {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::Value(Variant::from(v))
                }
            }
        )+
    };
}

impl_arg_value!(i32, f64, bool, String, Vec<i32>, Vec<f64>, Vec<bool>, Vec<String>);

impl<'a, T: Scalar> From<&'a mut ByRef<T>> for Arg<'a> {
    fn from(slot: &'a mut ByRef<T>) -> Self {
        Arg::Ref(slot)
    }
}

impl<'a, T: Scalar> From<&'a mut ArrayRef<T>> for Arg<'a> {
    fn from(slot: &'a mut ArrayRef<T>) -> Self {
        Arg::Ref(slot)
    }
}

/// Build an argument array for [`Dispatcher::invoke`]
///
/// ```
/// use oapi::{args, ByRef};
///
/// let mut count: ByRef<i32> = ByRef::empty();
/// let list = args!["DEAD", 1.5, &mut count];
/// assert_eq!(list.len(), 3);
/// assert!(list[2].is_by_ref());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Arg::from($arg)),*]
    };
}

/// Late-bound call dispatcher
///
/// Holds the host, the enumeration tables and the bridge configuration. It
/// keeps no per-call state, so one dispatcher serves any number of
/// sequential calls.
pub struct Dispatcher {
    host: Arc<dyn AutomationHost>,
    enums: Arc<EnumRegistry>,
    config: BridgeConfig,
}

impl Dispatcher {
    pub fn new(host: Arc<dyn AutomationHost>, enums: Arc<EnumRegistry>) -> Self {
        Self::with_config(host, enums, BridgeConfig::default())
    }

    pub fn with_config(
        host: Arc<dyn AutomationHost>,
        enums: Arc<EnumRegistry>,
        config: BridgeConfig,
    ) -> Self {
        Self { host, enums, config }
    }

    pub fn host(&self) -> &Arc<dyn AutomationHost> {
        &self.host
    }

    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Invoke `method` on the object at `handle`
    ///
    /// Every by-ref argument the host wrote is copied back into its box
    /// according to the [`UnpackPolicy`]. Boxes the host did not write keep
    /// their pre-call state.
    pub fn invoke(&self, handle: &Handle, method: &str, args: &mut [Arg<'_>]) -> Result<Status> {
        let (returned, params) = self.round_trip(handle, method, args)?;

        let status = match returned {
            Variant::Int(code) => Status::new(code),
            other => {
                let err = BridgeError::StatusType {
                    method: method.to_string(),
                    found: other.vartype(),
                };
                warn!("{}.{} failed: {}", handle, method, err);
                return Err(err);
            }
        };

        if !status.is_success() {
            debug!("{}.{} returned {}", handle, method, status);
        }

        if status.is_success() || self.config.unpack == UnpackPolicy::Always {
            unpack(args, params)?;
        }

        Ok(status)
    }

    /// Invoke a method whose return value is data rather than a status
    ///
    /// By-ref outputs are always unpacked; the raw return value is handed
    /// back uninterpreted.
    pub fn invoke_value(&self, handle: &Handle, method: &str, args: &mut [Arg<'_>]) -> Result<Variant> {
        let (returned, params) = self.round_trip(handle, method, args)?;
        unpack(args, params)?;
        Ok(returned)
    }

    fn round_trip(
        &self,
        handle: &Handle,
        method: &str,
        args: &[Arg<'_>],
    ) -> Result<(Variant, Vec<Param>)> {
        debug!("Invoking {}.{} ({} args)", handle, method, args.len());

        let mut params: Vec<Param> = args.iter().map(Arg::pack).collect();
        if self.config.trace_arguments {
            trace!("{}.{} arguments: {:?}", handle, method, args);
        }

        let returned = self.host.call(handle, method, &mut params).map_err(|e| {
            warn!("{}.{} failed: {}", handle, method, e);
            e
        })?;
        Ok((returned, params))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("host", &self.host.describe())
            .field("families", &self.enums.families())
            .field("config", &self.config)
            .finish()
    }
}

fn unpack(args: &mut [Arg<'_>], params: Vec<Param>) -> Result<()> {
    for (index, (arg, param)) in args.iter_mut().zip(params).enumerate() {
        if let Arg::Ref(slot) = arg {
            if let Some(value) = param.into_written() {
                slot.unpack(value)
                    .map_err(|source| BridgeError::Argument { index, source })?;
            }
        }
    }
    Ok(())
}
