//! Bridge error types
//!
//! Every variant here is fatal for the current operation. A remote host that
//! understood a request and refused it reports a non-zero [`Status`](super::Status)
//! instead, which is never turned into an error by the bridge.

use thiserror::Error;
use oapi_variant::{VarType, VariantError};
use crate::enums::RemoteCode;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// A code returned by the host is missing from an enumeration table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {family} code {code}")]
pub struct UnknownCodeError {
    /// Enumeration family the lookup was made in
    pub family: &'static str,
    /// The unmapped code
    pub code: RemoteCode,
}

/// Fatal bridge errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The automation host cannot be reached or bound
    #[error("automation host unavailable: {0}")]
    HostUnavailable(String),

    /// The host session ended; no status code was produced
    #[error("automation session terminated")]
    SessionTerminated,

    /// The host does not know the addressed object or member
    #[error("unknown member {member} on {handle}")]
    UnknownMember { handle: String, member: String },

    /// An argument has the wrong runtime type, or a host wrote the wrong type back
    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: VariantError,
    },

    /// The host rejected the number of arguments
    #[error("{method}: wrong number of arguments ({got} supplied)")]
    ArgumentCount { method: String, got: usize },

    /// A code from the host is not in its enumeration table
    #[error(transparent)]
    UnknownCode(#[from] UnknownCodeError),

    /// The method returned something other than an integer status
    #[error("{method} returned {found} instead of an integer status")]
    StatusType { method: String, found: VarType },

    /// An enumeration table maps one code to two variants
    #[error("enumeration {family} maps code {code} more than once")]
    DuplicateCode { family: &'static str, code: RemoteCode },

    /// An enumeration family was looked up before being registered
    #[error("enumeration {0} is not registered")]
    UnregisteredFamily(&'static str),

    /// Unclassified COM failure
    #[error("COM error 0x{hresult:08x}: {message}")]
    Com { hresult: u32, message: String },
}

impl BridgeError {
    /// Classify a failed `HRESULT` from the automation runtime
    ///
    /// `context` names the object or member involved and ends up in the message.
    pub fn from_hresult(hr: u32, context: &str) -> Self {
        use hresult::*;
        match hr {
            RPC_E_SERVER_DIED | RPC_E_SERVER_DIED_DNE | RPC_E_DISCONNECTED
            | CO_E_OBJNOTCONNECTED | RPC_S_SERVER_UNAVAILABLE | RPC_S_CALL_FAILED => {
                BridgeError::SessionTerminated
            }
            REGDB_E_CLASSNOTREG | CO_E_CLASSSTRING | MK_E_UNAVAILABLE
            | CO_E_SERVER_EXEC_FAILURE | E_ACCESSDENIED => {
                BridgeError::HostUnavailable(format!("{} (0x{:08x})", context, hr))
            }
            DISP_E_UNKNOWNNAME | DISP_E_MEMBERNOTFOUND => {
                let (handle, member) = match context.rsplit_once('.') {
                    Some((h, m)) => (h.to_string(), m.to_string()),
                    None => (String::new(), context.to_string()),
                };
                BridgeError::UnknownMember { handle, member }
            }
            _ => BridgeError::Com {
                hresult: hr,
                message: context.to_string(),
            },
        }
    }

    /// Whether the session itself is gone (as opposed to a bad request)
    pub fn is_session_loss(&self) -> bool {
        matches!(self, BridgeError::SessionTerminated | BridgeError::HostUnavailable(_))
    }
}

/// `HRESULT` codes seen from automation servers
pub mod hresult {
    /// Operation successful
    pub const S_OK: u32 = 0x00000000;
    /// Operation successful, returning false
    pub const S_FALSE: u32 = 0x00000001;
    /// Unspecified error
    pub const E_FAIL: u32 = 0x80004005;
    /// Access denied
    pub const E_ACCESSDENIED: u32 = 0x80070005;
    /// Invalid argument
    pub const E_INVALIDARG: u32 = 0x80070057;
    /// Class not registered
    pub const REGDB_E_CLASSNOTREG: u32 = 0x80040154;
    /// Invalid class string (unknown ProgID)
    pub const CO_E_CLASSSTRING: u32 = 0x800401F3;
    /// Object or server not available
    pub const CO_E_OBJNOTCONNECTED: u32 = 0x800401FD;
    /// Server process could not be started
    pub const CO_E_SERVER_EXEC_FAILURE: u32 = 0x80080005;
    /// No running instance registered
    pub const MK_E_UNAVAILABLE: u32 = 0x800401E3;
    /// Server died during the call
    pub const RPC_E_SERVER_DIED: u32 = 0x80010007;
    /// Server died, call not executed
    pub const RPC_E_SERVER_DIED_DNE: u32 = 0x80010012;
    /// Object disconnected from its clients
    pub const RPC_E_DISCONNECTED: u32 = 0x80010108;
    /// Thread already initialized with a different apartment model
    pub const RPC_E_CHANGED_MODE: u32 = 0x80010106;
    /// RPC server unavailable
    pub const RPC_S_SERVER_UNAVAILABLE: u32 = 0x800706BA;
    /// Remote procedure call failed
    pub const RPC_S_CALL_FAILED: u32 = 0x800706BE;
    /// Unknown member name
    pub const DISP_E_UNKNOWNNAME: u32 = 0x80020006;
    /// Member not found
    pub const DISP_E_MEMBERNOTFOUND: u32 = 0x80020003;
    /// Argument type mismatch
    pub const DISP_E_TYPEMISMATCH: u32 = 0x80020005;
    /// Wrong number of arguments
    pub const DISP_E_BADPARAMCOUNT: u32 = 0x8002000E;
    /// The member raised an exception
    pub const DISP_E_EXCEPTION: u32 = 0x80020009;
}
