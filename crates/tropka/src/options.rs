// File: src/options.rs
// Purpose: Router configuration and its resolved per-build form

use crate::logger::Logger;
use crate::manifest;

/// Endpoint prefix configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Prefix {
    /// No prefix.
    #[default]
    None,
    /// Derive the prefix from the host package's major version, formatted
    /// `/vMAJOR` (so version `1.6.7` yields `/v1`).
    PackageVersion,
    /// A literal prefix such as `/v1/api`. Should start with a slash.
    Literal(String),
}

/// Configuration for [`create_router`](crate::create_router).
///
/// A plain directory string converts into options via `From`, mirroring the
/// common case of only choosing where route files live:
///
/// ```
/// use tropka::RouterOptions;
///
/// let options = RouterOptions::from("src/routes");
/// assert_eq!(options.directory, "src/routes");
/// assert!(!options.quiet);
/// ```
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory to look for routes. Must not end with a path separator.
    pub directory: String,
    /// Silence all logs.
    pub quiet: bool,
    /// Silence only the override naming-convention warning.
    pub ignore_warnings: bool,
    /// Prefix prepended to every derived endpoint.
    pub prefix: Prefix,
    /// Logger to use for this build. `None` constructs a fresh one; injecting
    /// a logger lets callers observe the build's output.
    pub logger: Option<Logger>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            directory: "routes".to_string(),
            quiet: false,
            ignore_warnings: false,
            prefix: Prefix::None,
            logger: None,
        }
    }
}

impl RouterOptions {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Resolves the configuration for one build: the manifest is read here,
    /// exactly once, and the prefix becomes an immutable string passed down.
    pub(crate) fn resolve(&self) -> ResolvedOptions {
        let prefix = match &self.prefix {
            Prefix::None => String::new(),
            Prefix::Literal(prefix) => prefix.clone(),
            Prefix::PackageVersion => {
                let version = manifest::package_version();
                format!("/v{}", manifest::major_version(&version))
            }
        };

        ResolvedOptions {
            directory: self.directory.clone(),
            quiet: self.quiet,
            ignore_warnings: self.ignore_warnings,
            prefix,
        }
    }
}

impl From<&str> for RouterOptions {
    fn from(directory: &str) -> Self {
        Self::new(directory)
    }
}

impl From<String> for RouterOptions {
    fn from(directory: String) -> Self {
        Self::new(directory)
    }
}

/// Options after per-build resolution; the prefix is a plain string.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    pub directory: String,
    pub quiet: bool,
    pub ignore_warnings: bool,
    pub prefix: String,
}

#[cfg(test)]
pub(crate) fn resolved(directory: &str) -> ResolvedOptions {
    ResolvedOptions {
        directory: directory.to_string(),
        quiet: false,
        ignore_warnings: false,
        prefix: String::new(),
    }
}
