//! Path-addressed remote object handles
//!
//! A handle is nothing but its path: the root object's registered name
//! followed by member names, one per structural layer:
//!
//! ```text
//! Sap2000v15.SapObject . SapModel . Results . Setup
//! └──── root (ProgID) ┘  └─────── members ───────┘
//! ```
//!
//! Resolving is pure string construction. Nothing is bound or validated until
//! a call is made through the handle, and an unknown path is only reported
//! by the host at that point.

use std::fmt;

/// Opaque reference to a remote object, identified solely by its path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    root: String,
    members: Vec<String>,
}

impl Handle {
    /// Handle to a root object
    pub fn root_object(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            members: Vec::new(),
        }
    }

    /// Handle one layer below this one
    pub fn child(&self, member: &str) -> Handle {
        resolve_segments(&self.root, self.members.iter().map(String::as_str).chain([member]))
    }

    /// Registered name of the root object
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Member names walked from the root, outermost first
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of member layers below the root
    pub fn depth(&self) -> usize {
        self.members.len()
    }

    /// Full dotted path
    pub fn dotted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for m in &self.members {
            write!(f, ".{}", m)?;
        }
        Ok(())
    }
}

/// Resolve a dotted member path below a root object
///
/// Empty segments are skipped, so `resolve("Root", "")` is the root itself.
pub fn resolve(root: &str, path: &str) -> Handle {
    resolve_segments(root, path.split('.'))
}

/// Resolve an explicit list of member names below a root object
pub fn resolve_segments<'a, I>(root: &str, segments: I) -> Handle
where
    I: IntoIterator<Item = &'a str>,
{
    Handle {
        root: root.to_string(),
        members: segments
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
