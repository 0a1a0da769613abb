//! # rest_controller
//!
//! **rest_controller** is the request-dispatch core of a minimal REST controller
//! abstraction. Given a request whose parameters were already parsed upstream, it
//! resolves which controller action to run, writes the `Allow` header, runs the
//! pre/post dispatch hooks around the action, and stores the action result into
//! the response.
//!
//! ## Architecture
//!
//! - **[`controller`]** - the `Controller` trait, its per-instance context, and the
//!   statically declared `ActionTable`
//! - **[`request`]** - `RequestView`, the read-only parameter surface, and `ParamRequest`
//! - **[`response`]** - `ResponseSink`, the `Payload` result container, and `RecordedResponse`
//! - **[`error`]** - `ActionNotFound` (404) and status translation for callers
//! - **[`runtime_config`]** - environment-driven configuration
//!
//! HTTP transport, URL routing, body serialization and authentication all live
//! outside this crate. Callers hand a controller its request and response, call
//! `dispatch`, and translate any error into a transport response themselves.
//!
//! ### Dispatch Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller as Router / Server
//!     participant Controller
//!     participant Table as ActionTable
//!     participant Response as ResponseSink
//!     participant Handler
//!
//!     Caller->>Controller: new(request, response)
//!     Controller->>Controller: init()
//!     Caller->>Controller: dispatch("GET")
//!     Controller->>Controller: lower-case → "get"
//!     Controller->>Controller: pre_dispatch()
//!
//!     alt First dispatch on this instance
//!         Controller->>Table: Controller::actions()
//!         Table-->>Controller: cached for the instance
//!     end
//!
//!     Controller->>Response: set_header("Allow", "GET, DELETE", overwrite)
//!
//!     alt Action not declared
//!         Controller-->>Caller: Err(ActionNotFound) (404)
//!     end
//!
//!     Controller->>Handler: invoke
//!     Handler-->>Controller: Value
//!     Controller->>Response: set_result(Payload)
//!     Controller->>Controller: post_dispatch()
//!     Controller-->>Caller: Ok(())
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_controller::{ActionTable, Controller, ControllerContext, ParamRequest, RecordedResponse};
//! use serde_json::json;
//!
//! struct Health {
//!     ctx: ControllerContext<Health>,
//! }
//!
//! impl Controller for Health {
//!     type Request = ParamRequest;
//!     type Response = RecordedResponse;
//!
//!     fn actions() -> ActionTable<Self> {
//!         ActionTable::new().get(|_| Ok(json!({ "status": "ok" })))
//!     }
//!     fn from_context(ctx: ControllerContext<Self>) -> Self {
//!         Self { ctx }
//!     }
//!     fn context(&self) -> &ControllerContext<Self> {
//!         &self.ctx
//!     }
//!     fn context_mut(&mut self) -> &mut ControllerContext<Self> {
//!         &mut self.ctx
//!     }
//! }
//!
//! let mut health = Health::new(ParamRequest::new(), RecordedResponse::new());
//! health.dispatch("get").unwrap();
//!
//! let err = health.dispatch("post").unwrap_err();
//! assert_eq!(rest_controller::error::status_for(&err), http::StatusCode::NOT_FOUND);
//! assert_eq!(err.to_string(), "Action \"post\" does not exist");
//! ```
//!
//! ## Runtime Considerations
//!
//! Dispatch is a single synchronous call chain with no internal concurrency.
//! A controller owns its request and response exclusively; servers handling
//! requests in parallel build one controller per request.

pub mod controller;
pub mod error;
pub mod request;
pub mod response;
pub mod runtime_config;

pub use controller::{ActionTable, Controller, ControllerContext, Verb, ALLOW_HEADER};
pub use error::{status_for, ActionNotFound};
pub use request::{ParamRequest, RequestView};
pub use response::{Payload, RecordedResponse, ResponseSink};
pub use runtime_config::{ParamFallback, RuntimeConfig};
