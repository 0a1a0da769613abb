//! Write-only response surface and the result container stored into it.

use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage, names shared as `Arc<str>`
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Where a controller writes its headers and result.
///
/// The controller never reads a sink back; the caller owning the sink does.
pub trait ResponseSink {
    /// Set a header. `overwrite` replaces existing values of the same name,
    /// otherwise the value is added alongside them.
    fn set_header(&mut self, name: &str, value: &str, overwrite: bool);

    /// Store the action result
    fn set_result(&mut self, result: Payload);
}

/// Result of an action, always a list or a keyed map.
///
/// Built from whatever the handler returned:
/// - array → [`Payload::List`]
/// - object → [`Payload::Map`]
/// - `null` → empty list
/// - any scalar → single-element list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Ordered values
    List(Vec<Value>),
    /// Keyed values
    Map(Map<String, Value>),
}

impl Payload {
    /// The payload as a JSON value (array or object)
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Payload::List(items) => Value::Array(items),
            Payload::Map(map) => Value::Object(map),
        }
    }

    /// Number of top-level entries
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Payload::List(items) => items.len(),
            Payload::Map(map) => map.len(),
        }
    }

    /// True when the payload holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::List(Vec::new())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::List(items),
            Value::Object(map) => Payload::Map(map),
            Value::Null => Payload::default(),
            scalar => Payload::List(vec![scalar]),
        }
    }
}

/// In-memory [`ResponseSink`] that records everything written to it.
///
/// Header names are matched case-insensitively (RFC 7230).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedResponse {
    status: StatusCode,
    headers: HeaderVec,
    result: Option<Payload>,
}

impl Default for RecordedResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordedResponse {
    /// Empty `200 OK` response with no headers and no result
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderVec::new(),
            result: None,
        }
    }

    /// Response status
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Change the response status
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// First value of a header
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded for a header, in insertion order
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// All headers
    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Stored result, `None` until an action succeeded
    #[must_use]
    pub fn result(&self) -> Option<&Payload> {
        self.result.as_ref()
    }

    /// Take the stored result out
    pub fn take_result(&mut self) -> Option<Payload> {
        self.result.take()
    }
}

impl ResponseSink for RecordedResponse {
    fn set_header(&mut self, name: &str, value: &str, overwrite: bool) {
        if overwrite {
            self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
        self.headers.push((Arc::from(name), value.to_string()));
    }

    fn set_result(&mut self, result: Payload) {
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_from_value() {
        assert_eq!(Payload::from(json!(null)), Payload::List(vec![]));
        assert_eq!(Payload::from(json!("ok")), Payload::List(vec![json!("ok")]));
        assert_eq!(Payload::from(json!(false)), Payload::List(vec![json!(false)]));
        assert_eq!(
            Payload::from(json!([1, 2, 3])),
            Payload::List(vec![json!(1), json!(2), json!(3)])
        );
        let keyed = Payload::from(json!({"id": 1}));
        assert_eq!(keyed.clone().into_value(), json!({"id": 1}));
        assert_eq!(keyed.len(), 1);
    }

    #[test]
    fn test_payload_serializes_untagged() {
        let list = serde_json::to_value(Payload::from(json!(5))).unwrap();
        assert_eq!(list, json!([5]));
        let map = serde_json::to_value(Payload::from(json!({"a": "b"}))).unwrap();
        assert_eq!(map, json!({"a": "b"}));
    }

    #[test]
    fn test_set_header_overwrite_and_append() {
        let mut res = RecordedResponse::new();
        res.set_header("Allow", "GET", true);
        res.set_header("allow", "POST", false);
        assert_eq!(res.header_values("ALLOW"), vec!["GET", "POST"]);

        res.set_header("Allow", "PUT", true);
        assert_eq!(res.header_values("Allow"), vec!["PUT"]);
        assert_eq!(res.header("allow"), Some("PUT"));
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn test_result_and_status() {
        let mut res = RecordedResponse::default();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.result().is_none());

        res.set_result(Payload::from(json!({"id": 3})));
        res.set_status(StatusCode::CREATED);
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.take_result(), Some(Payload::from(json!({"id": 3}))));
        assert!(res.result().is_none());
    }
}
