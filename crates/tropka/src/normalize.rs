// File: src/normalize.rs
// Purpose: Normalizes manually overridden routes

use crate::logger::Logger;
use crate::route::RouteSpec;

/// Normalizes a manually set route override.
///
/// Patterns and absent overrides pass through untouched. A path override that
/// does not start with a slash is remapped with a warning:
///
/// ```text
/// "/some/route" -> "/some/route"
/// "some/route"  -> "/some/route"   (warning)
/// pattern       -> pattern
/// ```
pub(crate) fn normalize_manual_route(
    logger: &Logger,
    route: Option<RouteSpec>,
) -> Option<RouteSpec> {
    match route {
        Some(RouteSpec::Path(path)) if !path.starts_with('/') => {
            logger.warn(format!(
                "Route \"{path}\" should start with a slash, automatically remapping"
            ));
            Some(RouteSpec::Path(format!("/{path}")))
        }
        other => other,
    }
}
