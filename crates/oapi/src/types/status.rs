//! Remote call status codes

use std::fmt;

/// Integer status returned by a remote method
///
/// Zero is success; every other value is a host-defined failure that the
/// bridge passes through without interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

impl Status {
    /// The success status
    pub const SUCCESS: Status = Status(0);

    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Raw status code
    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "success")
        } else {
            write!(f, "status {}", self.0)
        }
    }
}
