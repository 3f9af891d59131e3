//! Shared plumbing of every object proxy
//!
//! A proxy is a handle plus the dispatcher that serves it. Call helpers turn
//! the bridge's `Status` into [`SapResult`]: zero is `Ok`, anything else is
//! [`SapError::Rejected`].

use std::sync::Arc;
use oapi::{Arg, BridgeError, ByRef, Dispatcher, Handle, RemoteEnum, Scalar, Variant, VarType};
use crate::error::{SapError, SapResult};

/// A resolved object of the application's model
#[derive(Clone, Debug)]
pub struct Component {
    dispatcher: Arc<Dispatcher>,
    handle: Handle,
}

impl Component {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>, handle: Handle) -> Self {
        Self { dispatcher, handle }
    }

    /// Proxy one layer below this one
    pub(crate) fn child(&self, member: &str) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            handle: self.handle.child(member),
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Call a status-returning method; non-zero is a rejection
    pub(crate) fn call(&self, method: &'static str, args: &mut [Arg<'_>]) -> SapResult<()> {
        let status = self.dispatcher.invoke(&self.handle, method, args)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(SapError::Rejected {
                method,
                status: status.code(),
            })
        }
    }

    /// Call a method whose integer return is data (a count or a code)
    pub(crate) fn call_int(&self, method: &'static str, args: &mut [Arg<'_>]) -> SapResult<i32> {
        match self.call_value(method, args)? {
            Variant::Int(v) => Ok(v),
            other => Err(status_type(method, other.vartype())),
        }
    }

    /// Call a method whose return is data of any type
    pub(crate) fn call_value(&self, method: &'static str, args: &mut [Arg<'_>]) -> SapResult<Variant> {
        Ok(self.dispatcher.invoke_value(&self.handle, method, args)?)
    }

    /// Call a method returning an integer enumeration code
    pub(crate) fn call_enum<E: RemoteEnum>(&self, method: &'static str) -> SapResult<E> {
        let code = self.call_int(method, &mut [])?;
        self.decode(code)
    }

    pub(crate) fn decode<E: RemoteEnum>(&self, code: i32) -> SapResult<E> {
        Ok(self.dispatcher.enums().from_int(code)?)
    }

    pub(crate) fn decode_str<E: RemoteEnum>(&self, code: &str) -> SapResult<E> {
        Ok(self.dispatcher.enums().from_str(code)?)
    }
}

/// Implemented by every typed proxy
pub trait SapComponent {
    fn component(&self) -> &Component;

    /// Dotted path of the proxied object
    fn path(&self) -> String {
        self.component().handle().dotted()
    }
}

/// Interpret a data return that must be boolean
pub(crate) fn expect_bool(method: &'static str, value: Variant) -> SapResult<bool> {
    match value {
        Variant::Bool(b) => Ok(b),
        other => Err(status_type(method, other.vartype())),
    }
}

/// Value of an output the application must write on success
pub(crate) fn required<T: Scalar>(
    method: &'static str,
    output: &'static str,
    value: ByRef<T>,
) -> SapResult<T> {
    value
        .into_option()
        .ok_or(SapError::MissingOutput { method, output })
}

/// Element count sent alongside input arrays
pub(crate) fn count_of(method: &'static str, len: usize) -> SapResult<i32> {
    i32::try_from(len).map_err(|_| SapError::Shape {
        method,
        expected: i32::MAX as usize,
        got: len,
    })
}

fn status_type(method: &str, found: VarType) -> SapError {
    SapError::Bridge(BridgeError::StatusType {
        method: method.to_string(),
        found,
    })
}

/// Require `values` to hold exactly `N` items
pub(crate) fn fixed<T: Copy + Default, const N: usize>(
    method: &'static str,
    values: &[T],
) -> SapResult<[T; N]> {
    if values.len() != N {
        return Err(SapError::Shape {
            method,
            expected: N,
            got: values.len(),
        });
    }
    let mut out = [T::default(); N];
    out.copy_from_slice(values);
    Ok(out)
}

/// Require an output array to hold at least `count` items
pub(crate) fn at_least<T>(method: &'static str, values: &[T], count: usize) -> SapResult<()> {
    if values.len() < count {
        return Err(SapError::Shape {
            method,
            expected: count,
            got: values.len(),
        });
    }
    Ok(())
}

/// Declare a proxy type wrapping a [`Component`]
macro_rules! sap_component {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            inner: $crate::component::Component,
        }

        impl $name {
            pub(crate) fn new(inner: $crate::component::Component) -> Self {
                Self { inner }
            }
        }

        impl $crate::component::SapComponent for $name {
            fn component(&self) -> &$crate::component::Component {
                &self.inner
            }
        }
    };
}

pub(crate) use sap_component;
