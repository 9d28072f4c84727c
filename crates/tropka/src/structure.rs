// File: src/structure.rs
// Purpose: Derives an endpoint and method from a route file's path

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RouteError;
use crate::options::ResolvedOptions;
use crate::route::RouteStructure;

static BRACKET_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("hardcoded pattern"));

/// Derives the [`RouteStructure`] for a route file.
///
/// The file name's last dot-separated suffix before the extension becomes the
/// method; everything else, including further dots, belongs to the route
/// name. `[token]` segments translate to `:token` parameters, a trailing
/// `index` segment collapses into its parent, and the configured directory is
/// stripped from the front.
///
/// ```text
/// routes/some/route.get.rs            -> endpoint: "/some/route", method: "get"
/// routes/fruits/[name]/index.post.rs  -> endpoint: "/fruits/:name", method: "post"
/// routes/index.put.rs                 -> endpoint: "/", method: "put"
/// ```
pub(crate) fn parse_structure(
    options: &ResolvedOptions,
    path: impl AsRef<Path>,
) -> Result<RouteStructure, RouteError> {
    let path = path.as_ref().to_string_lossy().replace('\\', "/");

    let mut parts: Vec<&str> = path.split('.').collect();
    // Last segment is the file extension, discarded.
    parts.pop();

    if parts.len() < 2 {
        return Err(RouteError::MethodMissing);
    }

    let method = match parts.pop() {
        Some(method) if !method.is_empty() => method,
        _ => return Err(RouteError::MethodMissing),
    };

    if parts.last().is_some_and(|name| name.ends_with('/')) {
        return Err(RouteError::InvalidNaming);
    }

    // Re-joining on '.' preserves interior dots that are not the method.
    let endpoint = parts.join(".");
    let endpoint = BRACKET_SEGMENT.replace_all(&endpoint, ":$1");

    let directory = options.directory.replace('\\', "/");
    let directory = directory.strip_suffix('/').unwrap_or(&directory);
    let directory_prefix = format!("{directory}/");
    let endpoint = endpoint
        .strip_prefix(directory_prefix.as_str())
        .unwrap_or(&endpoint);

    let endpoint = collapse_trailing_index(endpoint);
    let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint);

    // Never produce a double slash when a prefixed endpoint is empty.
    let slash = if !options.prefix.is_empty() && endpoint.is_empty() {
        ""
    } else {
        "/"
    };

    Ok(RouteStructure {
        endpoint: format!("{}{}{}", options.prefix, slash, endpoint),
        method: method.to_string(),
    })
}

/// Removes a trailing `index` segment so `some/nested/index` maps to
/// `some/nested`, while a `:index` parameter segment is preserved.
fn collapse_trailing_index(endpoint: &str) -> &str {
    match endpoint.strip_suffix("index") {
        Some(rest) if !rest.ends_with(':') => rest,
        _ => endpoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::resolved;

    #[test]
    fn handles_wildcard_segments() {
        let options = resolved("skiprouterreplace");

        let structure = parse_structure(&options, "route/with/[wildcard]/route.put.rs").unwrap();
        assert_eq!(structure.endpoint, "/route/with/:wildcard/route");
        assert_eq!(structure.method, "put");

        let structure = parse_structure(&options, "route/with/[wildcard]/[route].put.rs").unwrap();
        assert_eq!(structure.endpoint, "/route/with/:wildcard/:route");

        // A parameter literally named "index" is not collapsed.
        let structure = parse_structure(&options, "route/with/[wildcard]/[index].put.rs").unwrap();
        assert_eq!(structure.endpoint, "/route/with/:wildcard/:index");
    }

    #[test]
    fn returns_the_method_verbatim() {
        let options = resolved("skiprouterreplace");

        let structure = parse_structure(&options, "route/with/some/weird.methodAAA.rs").unwrap();
        assert_eq!(structure.endpoint, "/route/with/some/weird");
        assert_eq!(structure.method, "methodAAA");

        let structure = parse_structure(&options, "routes/with/nonlatin/alphabet.привет.rs").unwrap();
        assert_eq!(structure.method, "привет");
    }

    #[test]
    fn collapses_trailing_index() {
        let options = resolved("skiprouterreplace");

        let structure = parse_structure(&options, "nested/route/index.put.rs").unwrap();
        assert_eq!(structure.endpoint, "/nested/route");

        let structure = parse_structure(&options, "index.put.jsx").unwrap();
        assert_eq!(structure.endpoint, "/");
    }

    #[test]
    fn replaces_backslashes() {
        let options = resolved("skiprouterreplace");

        let structure =
            parse_structure(&options, "nested\\route\\with\\backslashes.put.rs").unwrap();
        assert_eq!(structure.endpoint, "/nested/route/with/backslashes");
    }

    #[test]
    fn strips_the_directory_as_an_exact_prefix() {
        let options = resolved("src/route");

        // "src/routes" is not "src/route/" and must survive untouched.
        let structure = parse_structure(&options, "src/routes/nested/route.get.rs").unwrap();
        assert_eq!(structure.endpoint, "/src/routes/nested/route");

        let structure = parse_structure(&options, "src/route/nested/route.get.rs").unwrap();
        assert_eq!(structure.endpoint, "/nested/route");

        // A stray trailing slash on the configured directory changes nothing.
        let options = resolved("src/route/");
        let structure = parse_structure(&options, "src/route/nested/route.get.rs").unwrap();
        assert_eq!(structure.endpoint, "/nested/route");
    }

    #[test]
    fn prepends_the_configured_prefix_without_double_slashes() {
        let mut options = resolved("skiprouterreplace");
        options.prefix = "/v1".to_string();

        let structure = parse_structure(&options, "nested/route.put.rs").unwrap();
        assert_eq!(structure.endpoint, "/v1/nested/route");

        let structure = parse_structure(&options, "index.put.rs").unwrap();
        assert_eq!(structure.endpoint, "/v1");
    }

    #[test]
    fn only_the_last_suffix_is_the_method() {
        let options = resolved("skiprouterreplace");

        let structure = parse_structure(&options, "nested/route.put.someother.get.rs").unwrap();
        assert_eq!(structure.endpoint, "/nested/route.put.someother");
        assert_eq!(structure.method, "get");
    }

    #[test]
    fn rejects_files_without_a_method() {
        let options = resolved("routes");

        assert!(matches!(
            parse_structure(&options, "routes/no-method.rs"),
            Err(RouteError::MethodMissing)
        ));
        assert!(matches!(
            parse_structure(&options, "routes/extensionless"),
            Err(RouteError::MethodMissing)
        ));
    }

    #[test]
    fn rejects_empty_route_names() {
        let options = resolved("routes");

        assert!(matches!(
            parse_structure(&options, "routes/.get.rs"),
            Err(RouteError::InvalidNaming)
        ));
    }
}
