//! In-process scriptable automation host
//!
//! Methods are plain closures registered against a dotted object path and a
//! method name. A handler sees the packed parameters through a [`CallFrame`],
//! may write by-ref slots, and returns the method's return value (normally
//! an integer status).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};
use oapi_variant::{Param, Scalar, Variant};
use crate::types::{BridgeError, Handle, Result};
use super::AutomationHost;

/// Boxed method implementation
pub type Handler = Arc<dyn Fn(&mut CallFrame<'_>) -> Result<Variant> + Send + Sync>;

/// One call served by a [`LoopbackHost`]
#[derive(Clone, Debug, PartialEq)]
pub struct CallRecord {
    pub handle: Handle,
    pub method: String,
    /// Argument values as they arrived, before any write-back
    pub args: Vec<Variant>,
}

/// View of one in-flight call, handed to a handler
pub struct CallFrame<'a> {
    handle: &'a Handle,
    method: &'a str,
    params: &'a mut [Param],
}

impl<'a> CallFrame<'a> {
    pub fn handle(&self) -> &Handle {
        self.handle
    }

    pub fn method(&self) -> &str {
        self.method
    }

    /// Number of positional arguments supplied
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Raw parameter at `index`
    pub fn param(&self, index: usize) -> Result<&Param> {
        self.params.get(index).ok_or_else(|| self.count_error())
    }

    /// Whether argument `index` carries a value (by-ref outputs start empty)
    pub fn is_set(&self, index: usize) -> bool {
        self.params.get(index).map_or(false, |p| !p.value().is_empty())
    }

    /// Argument `index` as a scalar of type `T`
    pub fn get<T: Scalar>(&self, index: usize) -> Result<T> {
        let value = self.param(index)?.value().clone();
        T::from_variant(value).map_err(|source| BridgeError::Argument { index, source })
    }

    /// Argument `index` as an array of `T`
    pub fn array<T: Scalar>(&self, index: usize) -> Result<Vec<T>> {
        match self.param(index)?.value().clone() {
            Variant::Array(array) => {
                T::from_array(array).map_err(|source| BridgeError::Argument { index, source })
            }
            other => Err(BridgeError::Argument {
                index,
                source: oapi_variant::VariantError::TypeMismatch {
                    expected: oapi_variant::VarType::Array(T::TYPE),
                    found: other.vartype(),
                },
            }),
        }
    }

    pub fn int(&self, index: usize) -> Result<i32> {
        self.get(index)
    }

    pub fn double(&self, index: usize) -> Result<f64> {
        self.get(index)
    }

    pub fn bool(&self, index: usize) -> Result<bool> {
        self.get(index)
    }

    pub fn str(&self, index: usize) -> Result<String> {
        self.get(index)
    }

    pub fn int_array(&self, index: usize) -> Result<Vec<i32>> {
        self.array(index)
    }

    pub fn double_array(&self, index: usize) -> Result<Vec<f64>> {
        self.array(index)
    }

    pub fn bool_array(&self, index: usize) -> Result<Vec<bool>> {
        self.array(index)
    }

    pub fn str_array(&self, index: usize) -> Result<Vec<String>> {
        self.array(index)
    }

    /// Write a result into by-ref argument `index`
    pub fn write(&mut self, index: usize, value: impl Into<Variant>) -> Result<()> {
        let got = self.params.len();
        let param = self.params.get_mut(index).ok_or_else(|| BridgeError::ArgumentCount {
            method: self.method.to_string(),
            got,
        })?;
        param
            .write(value.into())
            .map_err(|source| BridgeError::Argument { index, source })
    }

    fn count_error(&self) -> BridgeError {
        BridgeError::ArgumentCount {
            method: self.method.to_string(),
            got: self.params.len(),
        }
    }
}

/// Scriptable in-process host
///
/// # Example
///
/// ```
/// use oapi::{LoopbackHost, resolve};
///
/// let host = LoopbackHost::new("Root")
///     .with_method("Loads", "Count", |_| Ok(3));
/// assert!(host.has_method(&resolve("Root", "Loads"), "Count"));
/// ```
pub struct LoopbackHost {
    root: String,
    methods: RwLock<HashMap<(String, String), Handler>>,
    fallback: RwLock<Option<Handler>>,
    calls: Mutex<Vec<CallRecord>>,
    alive: AtomicBool,
}

impl LoopbackHost {
    /// Host whose root object is registered under `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            methods: RwLock::new(HashMap::new()),
            fallback: RwLock::new(None),
            calls: Mutex::new(Vec::new()),
            alive: AtomicBool::new(true),
        }
    }

    /// Registered name of the root object
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Serve `method` on the object at member path `path` (dotted, relative to the root)
    pub fn register<F, R>(&self, path: &str, method: &str, handler: F)
    where
        F: Fn(&mut CallFrame<'_>) -> Result<R> + Send + Sync + 'static,
        R: Into<Variant>,
    {
        let key = (crate::resolve(&self.root, path).dotted(), method.to_string());
        self.methods.write().insert(key, boxed(handler));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_method<F, R>(self, path: &str, method: &str, handler: F) -> Self
    where
        F: Fn(&mut CallFrame<'_>) -> Result<R> + Send + Sync + 'static,
        R: Into<Variant>,
    {
        self.register(path, method, handler);
        self
    }

    /// Serve every call that has no registered handler
    pub fn with_fallback<F, R>(self, handler: F) -> Self
    where
        F: Fn(&mut CallFrame<'_>) -> Result<R> + Send + Sync + 'static,
        R: Into<Variant>,
    {
        *self.fallback.write() = Some(boxed(handler));
        self
    }

    pub fn has_method(&self, handle: &Handle, method: &str) -> bool {
        self.methods
            .read()
            .contains_key(&(handle.dotted(), method.to_string()))
    }

    /// End the session; every later call fails with `SessionTerminated`
    pub fn shutdown(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("Loopback host {} shut down", self.root);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Every call served so far, in order
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    /// Calls served for one method name
    pub fn calls_to(&self, method: &str) -> Vec<CallRecord> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn handler_for(&self, handle: &Handle, method: &str) -> Option<Handler> {
        let key = (handle.dotted(), method.to_string());
        if let Some(handler) = self.methods.read().get(&key) {
            return Some(handler.clone());
        }
        self.fallback.read().clone()
    }
}

impl AutomationHost for LoopbackHost {
    fn call(&self, handle: &Handle, method: &str, params: &mut [Param]) -> Result<Variant> {
        if !self.is_alive() {
            return Err(BridgeError::SessionTerminated);
        }
        if handle.root() != self.root {
            return Err(BridgeError::HostUnavailable(format!(
                "no running object registered as {}",
                handle.root()
            )));
        }

        let handler = self.handler_for(handle, method).ok_or_else(|| BridgeError::UnknownMember {
            handle: handle.dotted(),
            member: method.to_string(),
        })?;

        trace!("Loopback call {}.{} ({} args)", handle, method, params.len());
        self.calls.lock().push(CallRecord {
            handle: handle.clone(),
            method: method.to_string(),
            args: params.iter().map(|p| p.value().clone()).collect(),
        });

        let mut frame = CallFrame {
            handle,
            method,
            params,
        };
        handler(&mut frame)
    }

    fn describe(&self) -> String {
        format!("loopback:{}", self.root)
    }
}

fn boxed<F, R>(handler: F) -> Handler
where
    F: Fn(&mut CallFrame<'_>) -> Result<R> + Send + Sync + 'static,
    R: Into<Variant>,
{
    Arc::new(move |frame: &mut CallFrame<'_>| handler(frame).map(Into::into))
}
