// File: src/router.rs
// Purpose: The router orchestrator - enumerate, load, derive, merge, register

use std::path::Path;

use anyhow::Result;

use crate::adapter::Adapter;
use crate::error::RouteError;
use crate::exports::{flatten_exports, FlatExports};
use crate::files::collect_route_files;
use crate::loader::ModuleLoader;
use crate::logger::Logger;
use crate::normalize::normalize_manual_route;
use crate::options::{ResolvedOptions, RouterOptions};
use crate::route::{EndpointInfo, MethodSpec, ParsedRoute, RouteSpec, RouteStructure};
use crate::structure::parse_structure;

/// Registers endpoints relative to the file system.
///
/// Scans the configured directory, derives an endpoint and method from every
/// file's name and location, loads each file's exports through the module
/// loader and registers the handler against `app` through the adapter
/// produced by `adapter`. Files are processed strictly one at a time, in
/// deterministic enumeration order; a failing file is recorded and skipped
/// without aborting the build.
///
/// Returns one [`EndpointInfo`] per discovered file, in order. The list is
/// empty only when a configuration error (routes directory ending with a
/// separator, adapter construction failure, materializer or enumeration
/// failure) stops the build before any file is processed.
///
/// ```
/// use tropka::{create_router, defined, noop_adapter, ExportValue, StaticLoader};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let loader: StaticLoader<fn()> = StaticLoader::new()
///     .with_module("routes/index.get.rs", ExportValue::handler_module((|| {}) as fn()))
///     .with_module(
///         "routes/!fruits.get.rs",
///         defined((|| {}) as fn()).method("post").into_module(),
///     );
///
/// let report = create_router((), &loader, noop_adapter(), "routes").await;
/// for endpoint in &report {
///     println!("{} -> registered: {}", endpoint.path().display(), endpoint.is_registered());
/// }
/// # }
/// ```
pub async fn create_router<I, L, A, F>(
    app: I,
    loader: &L,
    adapter: F,
    options: impl Into<RouterOptions>,
) -> Vec<EndpointInfo>
where
    L: ModuleLoader + Sync,
    A: Adapter<Handler = L::Handler> + Send + Sync,
    F: FnOnce(I) -> Result<A>,
{
    let options = options.into();
    let logger = options
        .logger
        .clone()
        .unwrap_or_else(|| Logger::new(options.quiet));
    let options = options.resolve();

    let mut report: Vec<EndpointInfo> = Vec::new();

    if options.directory.ends_with('/') || options.directory.ends_with('\\') {
        logger.error("Routes directory should not end with a slash, skipping router registration");
        return report;
    }

    let mut adapter = match adapter(app) {
        Ok(adapter) => adapter,
        Err(error) => {
            logger.error(format!("Failed to instantiate adapter: {error}"));
            return report;
        }
    };
    if let Err(error) = adapter.init().await {
        logger.error(format!("Failed to instantiate adapter: {error}"));
        return report;
    }

    let directory = Path::new(&options.directory);

    // One bulk preparation pass over the whole tree, never per file.
    if let Err(error) = loader.materialize(directory).await {
        logger.error(format!("Failed to materialize routes directory: {error}"));
        return report;
    }

    let files = match collect_route_files(directory) {
        Ok(files) => files,
        Err(error) => {
            logger.error(format!("Failed to read routes directory: {error}"));
            return report;
        }
    };

    for file in files {
        let (flat, structure) = match prepare_route(&options, loader, &adapter, &file).await {
            Ok(prepared) => prepared,
            Err(error) => {
                logger.error(format!("Failed to register {}: {error}", file.display()));
                report.push(EndpointInfo::Failed { path: file, error });
                continue;
            }
        };

        let overridden = flat.method.is_some() || flat.route.is_some();

        let method = flat
            .method
            .unwrap_or(MethodSpec::Single(structure.method));
        let route = normalize_manual_route(&logger, flat.route)
            .unwrap_or(RouteSpec::Path(structure.endpoint));

        if overridden && !options.ignore_warnings {
            warn_override_naming(&logger, &file);
        }

        let parsed = ParsedRoute {
            handler: flat.handler,
            method: method.clone(),
            route: route.clone(),
            data: flat.data.clone(),
        };

        if let Err(error) = adapter.register(parsed).await {
            logger.error(format!("Failed to register {route}: {error}"));
            report.push(EndpointInfo::Failed {
                path: file,
                error: RouteError::Adapter(error),
            });
            continue;
        }

        logger.info(format!("Registered {method} {route}"));
        report.push(EndpointInfo::Registered {
            path: file,
            endpoint: route,
            method,
            data: flat.data,
        });
    }

    if let Err(error) = adapter.ready(&report).await {
        logger.error(format!("Failed to run ready hook: {error}"));
    }

    report
}

/// Load, flatten and derive one file. Any error here means the file never
/// reaches registration.
async fn prepare_route<L, A>(
    options: &ResolvedOptions,
    loader: &L,
    adapter: &A,
    file: &Path,
) -> Result<(FlatExports<L::Handler>, RouteStructure), RouteError>
where
    L: ModuleLoader + Sync,
    A: Adapter<Handler = L::Handler> + Sync,
{
    let module = loader.load(file).await.map_err(RouteError::Load)?;
    let flat = flatten_exports(module)?;

    let structure = parse_structure(options, file)?;
    let structure = adapter
        .route(structure)
        .await
        .map_err(RouteError::Adapter)?;

    Ok((flat, structure))
}

/// Files whose effective method or route differs from what the file name
/// implies should be prefixed with `!` by convention.
fn warn_override_naming(logger: &Logger, path: &Path) {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let (directory, file_name) = match normalized.rsplit_once('/') {
        Some((directory, file_name)) => (Some(directory), file_name),
        None => (None, normalized.as_str()),
    };

    if file_name.starts_with('!') {
        return;
    }

    let suggested = match directory {
        Some(directory) => format!("{directory}/!{file_name}"),
        None => format!("!{file_name}"),
    };
    logger.warn(format!(
        "Files with overridden routes should start with \"!\", rename the file to {suggested}"
    ));
}
