//! # Controller Module
//!
//! Action resolution and dispatch for REST controllers.
//!
//! ## Overview
//!
//! A controller is a type that declares a set of named actions. Actions named
//! after HTTP verbs (`get`, `post`, `put`, `delete`) also drive the `Allow`
//! header; any other name is a custom action reachable only when requested
//! explicitly. A router or server that has already picked the controller type
//! builds one instance per request and calls [`Controller::dispatch`] once.
//!
//! ## Declaring a Controller
//!
//! ```rust
//! use rest_controller::controller::{ActionTable, Controller, ControllerContext};
//! use rest_controller::request::ParamRequest;
//! use rest_controller::response::RecordedResponse;
//! use serde_json::json;
//!
//! struct PetController {
//!     ctx: ControllerContext<PetController>,
//! }
//!
//! impl PetController {
//!     fn show(&mut self) -> anyhow::Result<serde_json::Value> {
//!         Ok(json!({ "id": self.param("id", 0), "name": "Fluffy" }))
//!     }
//! }
//!
//! impl Controller for PetController {
//!     type Request = ParamRequest;
//!     type Response = RecordedResponse;
//!
//!     fn actions() -> ActionTable<Self> {
//!         ActionTable::new()
//!             .get(Self::show)
//!             .delete(|_| Ok(json!(null)))
//!     }
//!
//!     fn from_context(ctx: ControllerContext<Self>) -> Self {
//!         Self { ctx }
//!     }
//!
//!     fn context(&self) -> &ControllerContext<Self> {
//!         &self.ctx
//!     }
//!
//!     fn context_mut(&mut self) -> &mut ControllerContext<Self> {
//!         &mut self.ctx
//!     }
//! }
//!
//! let request = ParamRequest::new().with_param("id", 42);
//! let mut controller = PetController::new(request, RecordedResponse::new());
//! controller.dispatch("GET").expect("dispatch");
//!
//! assert_eq!(controller.response().header("Allow"), Some("GET, DELETE"));
//! ```
//!
//! ## Error Handling
//!
//! An unknown action fails with [`crate::error::ActionNotFound`] (404) after
//! `pre_dispatch` ran and `Allow` was written. Translating that into a
//! transport response is the caller's job.

mod actions;
mod core;

pub use self::actions::{ActionFn, ActionTable, Verb, MAX_INLINE_ACTIONS};
pub use self::core::{Controller, ControllerContext, ALLOW_HEADER};
