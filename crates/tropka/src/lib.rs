//! # Tropka
//!
//! File-system routing for Rust web and bot frameworks: point it at a
//! directory of route files and it derives an endpoint and method from every
//! file's name and location, loads the file's exported handler and registers
//! it against your framework instance through a pluggable adapter.
//!
//! ## File Naming Convention
//!
//! | File Path | Registration |
//! |-----------|--------------|
//! | `routes/index.get.rs` | `GET /` |
//! | `routes/fruits/apple.post.rs` | `POST /fruits/apple` |
//! | `routes/fruits/[name]/index.get.rs` | `GET /fruits/:name` |
//! | `routes/some.nested.route.put.rs` | `PUT /some.nested.route` |
//! | `routes/start.command.rs` | bot command `/start` |
//!
//! Only the last dot-separated suffix before the extension is the method;
//! everything else belongs to the route name. A `[token]` directory or file
//! segment becomes a `:token` parameter, and a trailing `index` file maps to
//! its parent directory's endpoint.
//!
//! Route files may override the derived values by exporting `method` and
//! `route` beside (or inside) their default export; overriding files should
//! be prefixed with `!` by convention, which is nudged with a warning.
//!
//! ## Pieces
//!
//! - [`create_router`] drives the pipeline: enumerate, load, derive, merge,
//!   register, one file at a time, collecting a per-file [`EndpointInfo`]
//!   report. A broken file is recorded and skipped, never fatal.
//! - [`Adapter`] binds the pipeline to a target framework; see the
//!   `tropka-axum` and `tropka-bot` crates for the bundled bindings.
//! - [`ModuleLoader`] obtains live exports from route files; [`StaticLoader`]
//!   is the bundled in-memory implementation.
//!
//! ## Quick Start
//!
//! ```
//! use tropka::{create_router, noop_adapter, ExportValue, RouterOptions, StaticLoader};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let loader: StaticLoader<fn()> = StaticLoader::new()
//!     .with_module("routes/index.get.rs", ExportValue::handler_module((|| {}) as fn()));
//!
//! let report = create_router(
//!     (),
//!     &loader,
//!     noop_adapter(),
//!     RouterOptions::new("routes"),
//! )
//! .await;
//!
//! for endpoint in &report {
//!     println!("{}: registered = {}", endpoint.path().display(), endpoint.is_registered());
//! }
//! # }
//! ```

mod adapter;
mod error;
mod exports;
mod files;
mod loader;
mod logger;
mod manifest;
mod normalize;
mod options;
mod route;
mod router;
mod structure;

pub use adapter::{noop_adapter, Adapter, NoopAdapter};
pub use error::RouteError;
pub use exports::{defined, DefinedRoute, ExportRecord, ExportValue};
pub use loader::{ModuleLoader, StaticLoader};
pub use logger::{LogLevel, LogRecord, Logger};
pub use options::{Prefix, RouterOptions};
pub use route::{EndpointInfo, MethodSpec, ParsedRoute, RouteMeta, RouteSpec, RouteStructure};
pub use router::create_router;
