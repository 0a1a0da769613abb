use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum inline actions before heap allocation
///
/// The four verbs plus a handful of custom actions covers typical controllers.
pub const MAX_INLINE_ACTIONS: usize = 8;

/// Type-erased action handler
pub type ActionFn<C> = Arc<dyn Fn(&mut C) -> anyhow::Result<Value> + Send + Sync>;

/// The HTTP verbs that drive the `Allow` header, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Every verb, in the order they appear in `Allow`
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    /// Upper-case header token (`GET`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Lower-case action name the verb's handler is registered under (`get`)
    #[must_use]
    pub const fn action_name(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
        }
    }

    /// Matching `http::Method`
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Verb for an `http::Method`, `None` for anything outside the four
    #[must_use]
    pub fn from_method(method: &Method) -> Option<Self> {
        Verb::ALL.into_iter().find(|v| v.method() == *method)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statically declared set of actions a controller exposes.
///
/// Names are stored lower-cased, so resolution is case-insensitive as long as
/// the lookup key is lower-cased too. Registering a name twice keeps the last
/// handler.
///
/// ```rust
/// use rest_controller::controller::ActionTable;
/// use serde_json::json;
///
/// struct Pets;
///
/// let table = ActionTable::<Pets>::new()
///     .get(|_| Ok(json!({"pets": []})))
///     .action("Export", |_| Ok("csv"));
///
/// assert!(table.contains("export"));
/// assert_eq!(table.allow_header(), "GET");
/// ```
pub struct ActionTable<C> {
    entries: SmallVec<[(Arc<str>, ActionFn<C>); MAX_INLINE_ACTIONS]>,
}

impl<C> ActionTable<C> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Handler registered under an already lower-cased name
    #[inline]
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ActionFn<C>> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, h)| Arc::clone(h))
    }

    /// Whether an action is registered under an already lower-cased name
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Registered action names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_ref())
    }

    /// Number of registered actions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no action is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verbs with a registered handler, in canonical order
    #[must_use]
    pub fn allowed_verbs(&self) -> SmallVec<[Verb; 4]> {
        Verb::ALL
            .into_iter()
            .filter(|v| self.contains(v.action_name()))
            .collect()
    }

    /// `Allow` header value, e.g. `"GET, POST"`; empty when no verb is handled
    #[must_use]
    pub fn allow_header(&self) -> String {
        self.allowed_verbs()
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<C: 'static> ActionTable<C> {
    /// Register a handler under an arbitrary action name.
    #[must_use]
    pub fn action<F, T>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        let name: Arc<str> = Arc::from(name.to_ascii_lowercase());
        let handler: ActionFn<C> =
            Arc::new(move |c: &mut C| -> anyhow::Result<Value> { handler(c).map(Into::into) });

        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = handler,
            None => self.entries.push((name, handler)),
        }
        self
    }

    /// Register the handler for a verb
    #[must_use]
    pub fn verb<F, T>(self, verb: Verb, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        self.action(verb.action_name(), handler)
    }

    /// Register the `get` handler
    #[must_use]
    pub fn get<F, T>(self, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        self.verb(Verb::Get, handler)
    }

    /// Register the `post` handler
    #[must_use]
    pub fn post<F, T>(self, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        self.verb(Verb::Post, handler)
    }

    /// Register the `put` handler
    #[must_use]
    pub fn put<F, T>(self, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        self.verb(Verb::Put, handler)
    }

    /// Register the `delete` handler
    #[must_use]
    pub fn delete<F, T>(self, handler: F) -> Self
    where
        F: Fn(&mut C) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Value> + 'static,
    {
        self.verb(Verb::Delete, handler)
    }
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for ActionTable<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, h)| (Arc::clone(k), Arc::clone(h)))
                .collect(),
        }
    }
}

impl<C> fmt::Debug for ActionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("actions", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Counter {
        hits: u32,
    }

    #[test]
    fn test_allow_header_is_canonical_order() {
        let table = ActionTable::<Counter>::new()
            .delete(|_| Ok(json!(null)))
            .action("archive", |_| Ok(json!(null)))
            .post(|_| Ok(json!(null)))
            .get(|_| Ok(json!(null)));
        assert_eq!(table.allow_header(), "GET, POST, DELETE");
        assert_eq!(
            table.allowed_verbs().as_slice(),
            &[Verb::Get, Verb::Post, Verb::Delete]
        );
    }

    #[test]
    fn test_allow_header_ignores_custom_actions() {
        let table = ActionTable::<Counter>::new()
            .action("patch", |_| Ok(json!(null)))
            .action("head", |_| Ok(json!(null)));
        assert_eq!(table.allow_header(), "");
    }

    #[test]
    fn test_names_lowercased_and_replaced() {
        let table = ActionTable::<Counter>::new()
            .action("Export", |_| Ok(1))
            .action("EXPORT", |_| Ok(2));
        assert_eq!(table.len(), 1);
        assert!(table.contains("export"));
        assert!(!table.contains("Export"));

        let mut counter = Counter { hits: 0 };
        let handler = table.resolve("export").unwrap();
        assert_eq!(handler(&mut counter).unwrap(), json!(2));
    }

    #[test]
    fn test_handler_mutates_controller() {
        let table = ActionTable::<Counter>::new().get(|c: &mut Counter| {
            c.hits += 1;
            Ok(c.hits)
        });
        let mut counter = Counter { hits: 0 };
        let handler = table.resolve("get").unwrap();
        handler(&mut counter).unwrap();
        assert_eq!(handler(&mut counter).unwrap(), json!(2));
        assert!(table.resolve("post").is_none());
    }

    #[test]
    fn test_verb_method_roundtrip() {
        for verb in Verb::ALL {
            assert_eq!(Verb::from_method(&verb.method()), Some(verb));
        }
        assert_eq!(Verb::from_method(&Method::PATCH), None);
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }
}
