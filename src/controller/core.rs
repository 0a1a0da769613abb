//! Controller core - the dispatch path.

use super::actions::ActionTable;
use crate::error::ActionNotFound;
use crate::request::RequestView;
use crate::response::{Payload, ResponseSink};
use crate::runtime_config::{ParamFallback, RuntimeConfig};
use serde_json::{Map, Value};
use std::any::type_name;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span, info, warn};

/// Header written on every dispatch
pub const ALLOW_HEADER: &str = "Allow";

/// Per-instance state every controller carries.
///
/// Owns the request and response for the lifetime of the controller, plus the
/// action table, which is built from [`Controller::actions`] on first dispatch
/// and reused for every later dispatch on the same instance.
pub struct ControllerContext<C: Controller> {
    request: C::Request,
    response: C::Response,
    param_fallback: ParamFallback,
    actions: Option<Arc<ActionTable<C>>>,
}

impl<C: Controller> ControllerContext<C> {
    /// Context with the default runtime configuration
    pub fn new(request: C::Request, response: C::Response) -> Self {
        Self::with_config(request, response, &RuntimeConfig::default())
    }

    /// Context using an explicit runtime configuration
    pub fn with_config(request: C::Request, response: C::Response, config: &RuntimeConfig) -> Self {
        Self {
            request,
            response,
            param_fallback: config.param_fallback,
            actions: None,
        }
    }

    /// Request this controller reads from
    #[inline]
    pub fn request(&self) -> &C::Request {
        &self.request
    }

    /// Replace the request
    pub fn set_request(&mut self, request: C::Request) {
        self.request = request;
    }

    /// Response this controller writes to
    #[inline]
    pub fn response(&self) -> &C::Response {
        &self.response
    }

    /// Mutable access to the response
    #[inline]
    pub fn response_mut(&mut self) -> &mut C::Response {
        &mut self.response
    }

    /// Replace the response
    pub fn set_response(&mut self, response: C::Response) {
        self.response = response;
    }

    /// Policy applied when `param` decides whether to fall back to the default
    pub fn param_fallback(&self) -> ParamFallback {
        self.param_fallback
    }

    /// Cached action table, `None` until the first dispatch
    pub fn cached_actions(&self) -> Option<&ActionTable<C>> {
        self.actions.as_deref()
    }

    /// Action table for this instance, built on first use.
    pub fn action_table(&mut self) -> Arc<ActionTable<C>> {
        let table = self.actions.get_or_insert_with(|| {
            let table = C::actions();
            debug!(
                controller = type_name::<C>(),
                actions = ?table.names().collect::<Vec<_>>(),
                "Action table populated"
            );
            Arc::new(table)
        });
        Arc::clone(table)
    }
}

/// A REST controller variant.
///
/// Implementors declare which actions they expose through [`Controller::actions`]
/// and hold a [`ControllerContext`]. Everything else (parameter access, the
/// `Allow` header, [`Controller::dispatch`]) is provided.
///
/// # Dispatch cycle
///
/// 1. lower-case the requested action name
/// 2. [`Controller::pre_dispatch`]
/// 3. populate the action table if this instance has not done so yet
/// 4. write `Allow` (overwriting any earlier value)
/// 5. resolve the action, or fail with [`ActionNotFound`] (404)
/// 6. invoke the handler and store its result, coerced to a [`Payload`]
/// 7. [`Controller::post_dispatch`], only after a successful handler
///
/// Errors from hooks and handlers propagate out of `dispatch` unchanged.
pub trait Controller: Sized + 'static {
    /// Request parameters this controller reads
    type Request: RequestView;
    /// Response this controller writes
    type Response: ResponseSink;

    /// Declare the actions this controller exposes.
    ///
    /// Called once per instance, on its first dispatch.
    fn actions() -> ActionTable<Self>;

    /// Wrap a freshly built context into the concrete controller
    fn from_context(context: ControllerContext<Self>) -> Self;

    /// Shared controller state
    fn context(&self) -> &ControllerContext<Self>;

    /// Mutable shared controller state
    fn context_mut(&mut self) -> &mut ControllerContext<Self>;

    /// One-time setup, run at the end of construction
    fn init(&mut self) {}

    /// Runs at the start of every dispatch, before the action is resolved
    fn pre_dispatch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after a handler succeeded and its result was stored
    fn post_dispatch(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Build a controller around its request and response, then run [`Controller::init`].
    ///
    /// Uses [`RuntimeConfig::default`]; load the environment once at startup
    /// and pass it to [`Controller::with_config`] instead when it matters.
    fn new(request: Self::Request, response: Self::Response) -> Self {
        Self::with_config(request, response, &RuntimeConfig::default())
    }

    /// Build a controller with an explicit runtime configuration
    fn with_config(
        request: Self::Request,
        response: Self::Response,
        config: &RuntimeConfig,
    ) -> Self {
        let mut controller =
            Self::from_context(ControllerContext::with_config(request, response, config));
        controller.init();
        controller
    }

    /// Current request
    fn request(&self) -> &Self::Request {
        self.context().request()
    }

    /// Replace the request; chainable
    fn set_request(&mut self, request: Self::Request) -> &mut Self {
        self.context_mut().set_request(request);
        self
    }

    /// Current response
    fn response(&self) -> &Self::Response {
        self.context().response()
    }

    /// Mutable access to the response
    fn response_mut(&mut self) -> &mut Self::Response {
        self.context_mut().response_mut()
    }

    /// Replace the response; chainable
    fn set_response(&mut self, response: Self::Response) -> &mut Self {
        self.context_mut().set_response(response);
        self
    }

    /// Every request parameter
    fn all_params(&self) -> Map<String, Value> {
        self.request().params()
    }

    /// A request parameter, or `default` when the configured
    /// [`ParamFallback`] says the value does not count.
    ///
    /// With the default [`ParamFallback::Falsy`], `0`, `""`, `"0"`, `false`
    /// and empty containers all yield `default`, same as a missing param.
    fn param<D: Into<Value>>(&self, name: &str, default: D) -> Value {
        let ctx = self.context();
        let value = ctx.request().param(name);
        if ctx.param_fallback().use_default(value) {
            return default.into();
        }
        value.cloned().unwrap_or(Value::Null)
    }

    /// `Allow` header value for this controller, e.g. `"GET, POST"`
    fn allow_methods(&mut self) -> String {
        self.context_mut().action_table().allow_header()
    }

    /// Run one dispatch cycle for `action`.
    ///
    /// # Errors
    ///
    /// [`ActionNotFound`] when no action is declared under the lower-cased
    /// name; otherwise whatever a hook or the handler returned.
    fn dispatch(&mut self, action: &str) -> anyhow::Result<()> {
        let action = action.to_ascii_lowercase();
        let span = debug_span!("dispatch", controller = type_name::<Self>(), action = %action);
        let _entered = span.enter();

        debug!("Pre-dispatch hook");
        self.pre_dispatch()?;

        let table = self.context_mut().action_table();
        let allow = table.allow_header();
        self.response_mut().set_header(ALLOW_HEADER, &allow, true);

        let Some(handler) = table.resolve(&action) else {
            warn!(action = %action, allow = %allow, "Action not found");
            return Err(ActionNotFound::new(action).into());
        };

        let start = Instant::now();
        let value = match handler(self) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Action failed");
                return Err(e);
            }
        };
        info!(
            action = %action,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Action complete"
        );

        self.response_mut().set_result(Payload::from(value));

        debug!("Post-dispatch hook");
        self.post_dispatch()
    }
}
