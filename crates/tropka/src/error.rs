// File: src/error.rs
// Purpose: Error taxonomy for the registration pipeline

use thiserror::Error;

/// Everything that can stop a single route file from being registered.
///
/// Configuration problems (routes directory ending with a separator, adapter
/// construction failure) are not represented here; they abort the whole build
/// before any file is processed and surface as a single error log.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The file name has no dot-separated method suffix besides the extension.
    #[error("Method is not provided")]
    MethodMissing,

    /// The route name portion of the file name is empty.
    #[error("Route names should not start with a dot")]
    InvalidNaming,

    /// The loaded module is not an export record.
    #[error("No exports found")]
    NoExports,

    /// The export record has no `default` entry.
    #[error("No default export found")]
    NoDefaultExport,

    /// The default export is neither a handler nor a defined-route wrapper.
    #[error("Invalid default export")]
    InvalidDefaultExport,

    /// The defined-route wrapper's own `default` is not a handler.
    #[error("Default export does not wrap a callable handler")]
    InvalidDefinedHandler,

    /// The `method` export is neither a string nor a list of strings.
    #[error("Exported method must be a string or a list of strings")]
    InvalidMethodType,

    /// The `route` export is neither a string nor a pattern.
    #[error("Exported route must be a string or a pattern")]
    InvalidRouteType,

    /// The module loader failed to produce exports for this file.
    #[error("Failed to load module: {0}")]
    Load(anyhow::Error),

    /// The adapter rejected the route or its registration call failed.
    #[error("{0}")]
    Adapter(anyhow::Error),
}
