// File: src/route.rs
// Purpose: Core value types shared by the parser, orchestrator and adapters

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::RouteError;

/// Endpoint and method derived from a route file's location.
///
/// `endpoint` is always slash-rooted and never ends in `/` (except the literal
/// root `/`). `method` is the file name's last dot-separated suffix, used
/// verbatim; adapters decide which values are admissible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStructure {
    /// URL path such as `/users/:id`.
    pub endpoint: String,
    /// Method suffix such as `get` or `command`.
    pub method: String,
}

/// A route target: either a plain path or a pattern.
///
/// Patterns pass through the pipeline untouched; whether a target framework
/// accepts them is up to its adapter.
#[derive(Debug, Clone)]
pub enum RouteSpec {
    /// Slash-rooted path, e.g. `/fruits/apple`.
    Path(String),
    /// Compiled pattern, e.g. for bot `hears` triggers.
    Pattern(Regex),
}

impl RouteSpec {
    /// Returns the path when this spec is a plain path.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            RouteSpec::Path(path) => Some(path),
            RouteSpec::Pattern(_) => None,
        }
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSpec::Path(path) => f.write_str(path),
            RouteSpec::Pattern(pattern) => f.write_str(pattern.as_str()),
        }
    }
}

impl PartialEq for RouteSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RouteSpec::Path(a), RouteSpec::Path(b)) => a == b,
            (RouteSpec::Pattern(a), RouteSpec::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<&str> for RouteSpec {
    fn from(path: &str) -> Self {
        RouteSpec::Path(path.to_string())
    }
}

impl From<String> for RouteSpec {
    fn from(path: String) -> Self {
        RouteSpec::Path(path)
    }
}

impl From<Regex> for RouteSpec {
    fn from(pattern: Regex) -> Self {
        RouteSpec::Pattern(pattern)
    }
}

/// One or more method names for a registration.
///
/// Derivation always produces a single method; the multi form only arises
/// from overrides (some bot frameworks attach one handler to several update
/// events at once). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSpec {
    Single(String),
    Multi(Vec<String>),
}

impl MethodSpec {
    /// All method names carried by this spec, in order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            MethodSpec::Single(name) => vec![name.as_str()],
            MethodSpec::Multi(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Returns the name when this spec is a single method.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            MethodSpec::Single(name) => Some(name),
            MethodSpec::Multi(_) => None,
        }
    }
}

impl fmt::Display for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(",").to_uppercase())
    }
}

impl From<&str> for MethodSpec {
    fn from(name: &str) -> Self {
        MethodSpec::Single(name.to_string())
    }
}

impl From<String> for MethodSpec {
    fn from(name: String) -> Self {
        MethodSpec::Single(name)
    }
}

impl From<Vec<String>> for MethodSpec {
    fn from(names: Vec<String>) -> Self {
        MethodSpec::Multi(names)
    }
}

impl From<&[&str]> for MethodSpec {
    fn from(names: &[&str]) -> Self {
        MethodSpec::Multi(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Metadata exports of a route file, for adapter-specific inspection
/// (command descriptions, scopes and the like).
pub type RouteMeta = BTreeMap<String, serde_json::Value>;

/// The merged registration payload handed to an adapter.
///
/// `method` and `route` are the effective values after merging the
/// file-path-derived structure with any overrides exported by the file.
#[derive(Debug)]
pub struct ParsedRoute<H> {
    /// The handler extracted from the route file's default export.
    pub handler: H,
    /// Effective method; never empty.
    pub method: MethodSpec,
    /// Effective route; a slash-rooted path or a pattern, never empty.
    pub route: RouteSpec,
    /// Remaining metadata exports of the route file.
    pub data: RouteMeta,
}

/// Per-file outcome of a router build.
///
/// One entry is created per discovered file, appended to the report in
/// enumeration order and never mutated afterwards.
#[derive(Debug)]
pub enum EndpointInfo {
    /// The file's handler was registered with the framework.
    Registered {
        /// Path of the route file.
        path: PathBuf,
        /// Registered endpoint.
        endpoint: RouteSpec,
        /// Registered method.
        method: MethodSpec,
        /// Metadata exports of the route file.
        data: RouteMeta,
    },
    /// The file never reached registration, or registration failed.
    Failed {
        /// Path of the route file.
        path: PathBuf,
        /// The error that stopped this file.
        error: RouteError,
    },
}

impl EndpointInfo {
    /// Path of the route file this entry describes.
    pub fn path(&self) -> &Path {
        match self {
            EndpointInfo::Registered { path, .. } => path,
            EndpointInfo::Failed { path, .. } => path,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, EndpointInfo::Registered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_spec_displays_uppercased() {
        assert_eq!(MethodSpec::from("get").to_string(), "GET");

        let multi = MethodSpec::from(&["message", "edited_message"][..]);
        assert_eq!(multi.to_string(), "MESSAGE,EDITED_MESSAGE");
    }

    #[test]
    fn route_spec_compares_patterns_by_source() {
        let a = RouteSpec::from(Regex::new("^/echo").unwrap());
        let b = RouteSpec::from(Regex::new("^/echo").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, RouteSpec::from("/echo"));
    }
}
