// File: src/adapter.rs
// Purpose: The framework adapter contract

use std::marker::PhantomData;

use anyhow::Result;
use async_trait::async_trait;

use crate::route::{EndpointInfo, ParsedRoute, RouteStructure};

/// Strategy object binding the pipeline to one target framework.
///
/// An adapter is constructed once per router build from the live framework
/// instance (by the factory passed to [`create_router`](crate::create_router))
/// and driven through four hooks:
///
/// - [`init`](Adapter::init) runs once before any file is processed; a
///   failure here aborts the whole build.
/// - [`route`](Adapter::route) validates and transforms the derived
///   [`RouteStructure`] (method vocabulary checks, endpoint reshaping).
/// - [`register`](Adapter::register) performs the actual binding call; it is
///   also where exported overrides are validated against the framework.
/// - [`ready`](Adapter::ready) runs exactly once after the last file with the
///   full ordered report, e.g. to batch-publish a bot command list.
///
/// Errors from `route` and `register` are caught per file by the
/// orchestrator; they fail that file only and the build continues.
#[async_trait]
pub trait Adapter {
    /// The handler type this framework accepts; must match the loader's.
    type Handler;

    /// Called once the adapter is constructed, before any file is processed.
    async fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Validates and transforms a derived route structure.
    async fn route(&self, structure: RouteStructure) -> Result<RouteStructure> {
        Ok(structure)
    }

    /// Registers one route with the framework instance.
    async fn register(&mut self, route: ParsedRoute<Self::Handler>) -> Result<()>;

    /// Called once after all files were processed, with the full report.
    async fn ready(&mut self, report: &[EndpointInfo]) -> Result<()> {
        let _ = report;
        Ok(())
    }
}

/// Adapter that accepts every route and registers nothing.
///
/// The stand-in when no real framework binding is configured; useful for
/// dry-running a routes directory.
#[derive(Debug, Default)]
pub struct NoopAdapter<H> {
    _handler: PhantomData<H>,
}

#[async_trait]
impl<H: Send> Adapter for NoopAdapter<H> {
    type Handler = H;

    async fn register(&mut self, _route: ParsedRoute<H>) -> Result<()> {
        Ok(())
    }
}

/// Factory for [`NoopAdapter`], ignoring the framework instance.
pub fn noop_adapter<I, H>() -> impl FnOnce(I) -> Result<NoopAdapter<H>> {
    |_instance| {
        Ok(NoopAdapter {
            _handler: PhantomData,
        })
    }
}
