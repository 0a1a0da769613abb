//! Read-only request parameters consumed by controllers.
//!
//! Controllers never parse HTTP themselves. Whatever sits in front of them
//! (server, router, test harness) hands over a [`RequestView`] that already
//! holds the merged path/query/body parameters. [`ParamRequest`] is the
//! in-memory implementation used by the crate's tests and by callers that
//! have no request type of their own.

use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline params before heap allocation
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Names are `Arc<str>` because the same names repeat on every request and
/// `Arc::clone()` is a refcount bump instead of a string copy.
pub type ParamVec = SmallVec<[(Arc<str>, Value); MAX_INLINE_PARAMS]>;

/// Read access to the parameters of one inbound request.
pub trait RequestView {
    /// Look up a single parameter by name
    fn param(&self, name: &str) -> Option<&Value>;

    /// Snapshot of every parameter, keyed by name
    fn params(&self) -> Map<String, Value>;
}

/// Loose truthiness test applied by [`ParamFallback::Falsy`](crate::runtime_config::ParamFallback).
///
/// `null`, `false`, any zero number, `""`, `"0"`, `[]` and `{}` are falsy.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Type a raw string parameter: integer, then finite float, then bool, else string.
///
/// A typed value is only kept when it is as truthy as the raw string, so
/// `"0.0"` and `"false"` stay strings (truthy) instead of becoming falsy.
fn convert(raw: &str) -> Value {
    let raw_value = || Value::String(raw.to_string());
    let typed = if let Ok(v) = raw.parse::<i64>() {
        Value::from(v)
    } else if let Some(v) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Value::from(v)
    } else if let Ok(v) = raw.parse::<bool>() {
        Value::from(v)
    } else {
        return raw_value();
    };
    if is_falsy(&typed) == is_falsy(&raw_value()) {
        typed
    } else {
        raw_value()
    }
}

/// Parameters of a request that has already been parsed upstream.
///
/// Lookup uses "last write wins": when a name was pushed more than once
/// (`?limit=10&limit=20`) the last occurrence is returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamRequest {
    params: ParamVec,
}

impl ParamRequest {
    /// Create a request with no parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw string pairs (path or query params), typing each value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let params = pairs
            .into_iter()
            .map(|(k, v)| (Arc::from(k.as_ref()), convert(v.as_ref())))
            .collect();
        Self { params }
    }

    /// Add a parameter, builder style
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a parameter; shadows any earlier value of the same name
    pub fn push(&mut self, name: &str, value: impl Into<Value>) {
        self.params.push((Arc::from(name), value.into()));
    }

    /// Fold a JSON body into the params.
    ///
    /// Object bodies contribute one param per field. Any other body is kept
    /// whole under `"body"`.
    pub fn merge_body(&mut self, body: Value) {
        match body {
            Value::Object(map) => {
                for (k, v) in map {
                    self.params.push((Arc::from(k.as_str()), v));
                }
            }
            other => self.push("body", other),
        }
    }

    /// Number of stored entries, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when no params were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl RequestView for ParamRequest {
    #[inline]
    fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    fn params(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for (k, v) in &self.params {
            map.insert(k.to_string(), v.clone());
        }
        map
    }
}
