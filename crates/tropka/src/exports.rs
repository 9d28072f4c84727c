// File: src/exports.rs
// Purpose: Model of a loaded route module and the exports flattener

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::RouteError;
use crate::route::{MethodSpec, RouteMeta, RouteSpec};

/// A raw value appearing in a loaded module's export record.
///
/// This is the boundary type between the module loader and the pipeline; it
/// deliberately admits shapes the flattener will reject, so loader
/// implementations do not have to validate anything themselves.
#[derive(Debug)]
pub enum ExportValue<H> {
    /// A callable handler.
    Handler(H),
    /// A nested export record (the defined-route wrapper).
    Record(ExportRecord<H>),
    /// A string, e.g. a method override or command description.
    Text(String),
    /// A list of strings, e.g. a multi-event method override.
    TextList(Vec<String>),
    /// A compiled pattern route override.
    Pattern(Regex),
    /// Arbitrary metadata.
    Json(serde_json::Value),
}

impl<H> ExportValue<H> {
    /// An export record whose `default` entry is the given handler - the
    /// shape of a plain route file.
    pub fn handler_module(handler: H) -> Self {
        ExportValue::Record(ExportRecord::new().with("default", ExportValue::Handler(handler)))
    }
}

impl<H> From<DefinedRoute<H>> for ExportValue<H> {
    fn from(defined: DefinedRoute<H>) -> Self {
        defined.into_module()
    }
}

/// An ordered export-name to value map, as handed back by a module loader.
#[derive(Debug, Default)]
pub struct ExportRecord<H> {
    entries: BTreeMap<String, ExportValue<H>>,
}

impl<H> ExportRecord<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: ExportValue<H>) -> Self {
        self.entries.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ExportValue<H>) {
        self.entries.insert(name.into(), value);
    }

    fn remove(&mut self, name: &str) -> Option<ExportValue<H>> {
        self.entries.remove(name)
    }

    /// Converts the remaining entries into metadata. Handlers, nested records
    /// and patterns carry no metadata value and are skipped.
    fn into_meta(self) -> RouteMeta {
        self.entries
            .into_iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    ExportValue::Text(text) => serde_json::Value::String(text),
                    ExportValue::TextList(list) => serde_json::Value::Array(
                        list.into_iter().map(serde_json::Value::String).collect(),
                    ),
                    ExportValue::Json(value) => value,
                    ExportValue::Handler(_) | ExportValue::Record(_) | ExportValue::Pattern(_) => {
                        return None
                    }
                };
                Some((name, value))
            })
            .collect()
    }
}

/// Builder for the defined-route wrapper: a default export bundling the
/// handler with optional method and route overrides.
///
/// ```
/// use tropka::{defined, ExportValue};
///
/// let module: ExportValue<fn()> = defined((|| {}) as fn())
///     .method("post")
///     .route("/fruits")
///     .into_module();
/// ```
#[derive(Debug)]
pub struct DefinedRoute<H> {
    handler: H,
    method: Option<ExportValue<H>>,
    route: Option<ExportValue<H>>,
}

/// Starts a defined-route wrapper around a handler.
pub fn defined<H>(handler: H) -> DefinedRoute<H> {
    DefinedRoute {
        handler,
        method: None,
        route: None,
    }
}

impl<H> DefinedRoute<H> {
    pub fn method(mut self, method: impl Into<MethodSpec>) -> Self {
        self.method = Some(match method.into() {
            MethodSpec::Single(name) => ExportValue::Text(name),
            MethodSpec::Multi(names) => ExportValue::TextList(names),
        });
        self
    }

    pub fn route(mut self, route: impl Into<RouteSpec>) -> Self {
        self.route = Some(match route.into() {
            RouteSpec::Path(path) => ExportValue::Text(path),
            RouteSpec::Pattern(pattern) => ExportValue::Pattern(pattern),
        });
        self
    }

    /// Finishes the wrapper as a complete module export record.
    pub fn into_module(self) -> ExportValue<H> {
        let mut wrapper = ExportRecord::new().with("default", ExportValue::Handler(self.handler));
        if let Some(method) = self.method {
            wrapper.insert("method", method);
        }
        if let Some(route) = self.route {
            wrapper.insert("route", route);
        }

        ExportValue::Record(ExportRecord::new().with("default", ExportValue::Record(wrapper)))
    }
}

/// A module's exports after flattening: the handler plus raw overrides and
/// metadata, ready for the merge step.
#[derive(Debug)]
pub(crate) struct FlatExports<H> {
    pub handler: H,
    pub method: Option<MethodSpec>,
    pub route: Option<RouteSpec>,
    pub data: RouteMeta,
}

/// Locates the handler inside a loaded module and extracts overrides.
///
/// The default export may be the handler itself or a defined-route wrapper;
/// an override nested in the wrapper takes precedence over a same-named
/// top-level export. Only shape is validated here - whether a method or route
/// is acceptable to the target framework is the adapter's concern.
pub(crate) fn flatten_exports<H>(module: ExportValue<H>) -> Result<FlatExports<H>, RouteError> {
    let ExportValue::Record(mut record) = module else {
        return Err(RouteError::NoExports);
    };

    let Some(default) = record.remove("default") else {
        return Err(RouteError::NoDefaultExport);
    };

    let (handler, nested_method, nested_route) = match default {
        ExportValue::Handler(handler) => (handler, None, None),
        ExportValue::Record(mut wrapper) => {
            let Some(inner) = wrapper.remove("default") else {
                return Err(RouteError::InvalidDefaultExport);
            };
            let ExportValue::Handler(handler) = inner else {
                return Err(RouteError::InvalidDefinedHandler);
            };
            (handler, wrapper.remove("method"), wrapper.remove("route"))
        }
        _ => return Err(RouteError::InvalidDefaultExport),
    };

    // Nested wrapper values win; top-level named exports are the fallback.
    let method = nested_method
        .or_else(|| record.remove("method"))
        .map(method_override)
        .transpose()?;
    let route = nested_route
        .or_else(|| record.remove("route"))
        .map(route_override)
        .transpose()?;

    Ok(FlatExports {
        handler,
        method,
        route,
        data: record.into_meta(),
    })
}

fn method_override<H>(value: ExportValue<H>) -> Result<MethodSpec, RouteError> {
    match value {
        ExportValue::Text(name) => Ok(MethodSpec::Single(name)),
        ExportValue::TextList(names) if !names.is_empty() => Ok(MethodSpec::Multi(names)),
        _ => Err(RouteError::InvalidMethodType),
    }
}

fn route_override<H>(value: ExportValue<H>) -> Result<RouteSpec, RouteError> {
    match value {
        ExportValue::Text(path) => Ok(RouteSpec::Path(path)),
        ExportValue::Pattern(pattern) => Ok(RouteSpec::Pattern(pattern)),
        _ => Err(RouteError::InvalidRouteType),
    }
}
