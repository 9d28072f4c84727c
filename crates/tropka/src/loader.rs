// File: src/loader.rs
// Purpose: Module materializer/loader contract and the in-memory reference loader

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::exports::ExportValue;

/// The external collaborator that turns route files into live exports.
///
/// The pipeline assumes nothing about how a handler is obtained from a source
/// file beyond this contract: one bulk [`materialize`](ModuleLoader::materialize)
/// pass over the routes directory, then one [`load`](ModuleLoader::load) per
/// discovered file. Implementations may transpile, compile, dlopen or simply
/// look modules up in a registry.
#[async_trait]
pub trait ModuleLoader {
    /// The handler type this loader produces; must match the adapter's.
    type Handler;

    /// Prepares the whole directory tree for loading. Invoked exactly once
    /// per router build, before any file is loaded.
    async fn materialize(&self, directory: &Path) -> Result<()> {
        let _ = directory;
        Ok(())
    }

    /// Produces the export record for one route file.
    async fn load(&self, path: &Path) -> Result<ExportValue<Self::Handler>>;
}

/// In-memory loader backed by a path to exports registry.
///
/// The reference implementation for compile-time-registered route modules and
/// for tests; `materialize` is a no-op. Each module is consumed by the build
/// that loads it.
///
/// ```
/// use tropka::{ExportValue, StaticLoader};
///
/// let loader: StaticLoader<fn()> = StaticLoader::new()
///     .with_module("routes/index.get.rs", ExportValue::handler_module((|| {}) as fn()));
/// ```
#[derive(Debug, Default)]
pub struct StaticLoader<H> {
    modules: Mutex<BTreeMap<PathBuf, ExportValue<H>>>,
}

impl<H> StaticLoader<H> {
    pub fn new() -> Self {
        Self {
            modules: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn with_module(self, path: impl Into<PathBuf>, module: ExportValue<H>) -> Self {
        self.insert(path, module);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, module: ExportValue<H>) {
        self.modules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path.into(), module);
    }
}

#[async_trait]
impl<H: Send> ModuleLoader for StaticLoader<H> {
    type Handler = H;

    async fn load(&self, path: &Path) -> Result<ExportValue<H>> {
        self.modules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(path)
            .ok_or_else(|| anyhow!("Module not found: {}", path.display()))
    }
}
