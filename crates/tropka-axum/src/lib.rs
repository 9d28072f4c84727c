//! Axum adapter for tropka. Lets you define endpoints in route files and
//! register them on an [`axum::Router`].
//!
//! Axum's router is a by-value builder, so the live instance handed to
//! [`create_router`](tropka::create_router) is a [`SharedRouter`] handle; the
//! finished router is taken back out of the handle once the build completes:
//!
//! ```no_run
//! use axum::Router;
//! use tropka::{create_router, ExportValue, StaticLoader};
//! use tropka_axum::{adapter, define, RouteHandler, SharedRouter};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let loader: StaticLoader<RouteHandler> = StaticLoader::new()
//!     .with_module(
//!         "routes/index.get.rs",
//!         ExportValue::handler_module(define(|| async { "Hello world!" })),
//!     );
//!
//! let app = SharedRouter::new(Router::new());
//! create_router(app.clone(), &loader, adapter(), "routes").await;
//!
//! let router = app.take().expect("router built");
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, router).await.unwrap();
//! # }
//! ```

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use axum::extract::Request;
use axum::handler::Handler;
use axum::response::Response;
use axum::routing::{on_service, MethodFilter};
use axum::Router;
use tower::util::BoxCloneService;

use tropka::{Adapter, ParsedRoute, RouteSpec, RouteStructure};

/// The handler type route files export for this adapter.
pub type RouteHandler = BoxCloneService<Request, Response, Infallible>;

/// Methods admissible for axum registrations. `any` attaches the handler to
/// every supported HTTP method.
pub const METHODS: [&str; 9] = [
    "any", "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

const CONCRETE_METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Wraps any axum handler into the [`RouteHandler`] shape route files export.
///
/// ```
/// use tropka_axum::define;
///
/// let handler = define(|| async { "Hello world!" });
/// # let _ = handler;
/// ```
pub fn define<H, T>(handler: H) -> RouteHandler
where
    H: Handler<T, ()>,
    T: 'static,
{
    BoxCloneService::new(handler.with_state(()))
}

/// Cloneable handle over an [`axum::Router`] under construction.
///
/// The router is taken out of the handle for every registration and put back
/// updated; [`take`](SharedRouter::take) extracts the finished router.
#[derive(Clone, Debug, Default)]
pub struct SharedRouter {
    inner: Arc<Mutex<Option<Router>>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(router))),
        }
    }

    /// Takes the built router out of the handle. Returns `None` if it was
    /// already taken.
    pub fn take(&self) -> Option<Router> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    fn update(&self, apply: impl FnOnce(Router) -> Router) -> Result<()> {
        let mut slot = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let router = slot.take().context("Router instance was already taken")?;
        *slot = Some(apply(router));
        Ok(())
    }
}

/// Factory for the axum adapter, passed to
/// [`create_router`](tropka::create_router).
pub fn adapter() -> impl FnOnce(SharedRouter) -> Result<AxumAdapter> {
    |instance| {
        Ok(AxumAdapter {
            instance,
            claimed: HashSet::new(),
        })
    }
}

/// Registers parsed routes on an axum router.
pub struct AxumAdapter {
    instance: SharedRouter,
    /// (method, path) pairs already claimed, to reject duplicates before
    /// axum's own overlap panic.
    claimed: HashSet<(String, String)>,
}

impl AxumAdapter {
    fn claim(&mut self, method: &str, path: &str) -> Result<()> {
        let methods: &[&str] = if method == "any" {
            &CONCRETE_METHODS
        } else {
            std::slice::from_ref(&method)
        };

        for claimed in methods {
            if self
                .claimed
                .contains(&(claimed.to_string(), path.to_string()))
            {
                bail!("{} {path} is already registered", claimed.to_uppercase());
            }
        }
        for claimed in methods {
            self.claimed.insert((claimed.to_string(), path.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl Adapter for AxumAdapter {
    type Handler = RouteHandler;

    async fn route(&self, structure: RouteStructure) -> Result<RouteStructure> {
        method_filter(&structure.method)?;
        Ok(structure)
    }

    async fn register(&mut self, route: ParsedRoute<RouteHandler>) -> Result<()> {
        let path = match &route.route {
            RouteSpec::Path(path) => path.clone(),
            RouteSpec::Pattern(_) => {
                bail!("Exported route must be a string, axum does not accept patterns")
            }
        };

        let mut filter: Option<MethodFilter> = None;
        for name in route.method.names() {
            let next = method_filter(name)?;
            self.claim(name, &path)?;
            filter = Some(match filter {
                Some(acc) => acc.or(next),
                None => next,
            });
        }
        let filter = filter.context("No method provided")?;

        self.instance
            .update(|router| router.route(&path, on_service(filter, route.handler)))
    }
}

fn method_filter(method: &str) -> Result<MethodFilter> {
    let filter = match method {
        "any" => MethodFilter::GET
            .or(MethodFilter::POST)
            .or(MethodFilter::PUT)
            .or(MethodFilter::DELETE)
            .or(MethodFilter::PATCH)
            .or(MethodFilter::OPTIONS)
            .or(MethodFilter::HEAD)
            .or(MethodFilter::TRACE),
        "get" => MethodFilter::GET,
        "post" => MethodFilter::POST,
        "put" => MethodFilter::PUT,
        "delete" => MethodFilter::DELETE,
        "patch" => MethodFilter::PATCH,
        "options" => MethodFilter::OPTIONS,
        "head" => MethodFilter::HEAD,
        "trace" => MethodFilter::TRACE,
        other => bail!(
            "Method must be one of: {}, received: {other}",
            METHODS.join(", ")
        ),
    };
    Ok(filter)
}
