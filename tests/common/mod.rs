#![allow(dead_code)]

use rest_controller::{
    ActionTable, Controller, ControllerContext, ParamRequest, RecordedResponse,
};
use serde_json::{json, Value};

/// Exposes `get` and `delete`, declared in reverse order.
pub struct ReadDelete {
    ctx: ControllerContext<ReadDelete>,
}

impl Controller for ReadDelete {
    type Request = ParamRequest;
    type Response = RecordedResponse;

    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .delete(|_| Ok(json!({ "deleted": true })))
            .get(|c: &mut ReadDelete| Ok(json!({ "id": c.param("id", Value::Null) })))
    }

    fn from_context(ctx: ControllerContext<Self>) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ControllerContext<Self> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ControllerContext<Self> {
        &mut self.ctx
    }
}

/// Exposes only `post`.
pub struct PostOnly {
    ctx: ControllerContext<PostOnly>,
}

impl Controller for PostOnly {
    type Request = ParamRequest;
    type Response = RecordedResponse;

    fn actions() -> ActionTable<Self> {
        ActionTable::new().post(|c: &mut PostOnly| Ok(c.all_params()))
    }

    fn from_context(ctx: ControllerContext<Self>) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ControllerContext<Self> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ControllerContext<Self> {
        &mut self.ctx
    }
}

/// Exposes custom actions only; no verb handlers.
pub struct Reports {
    ctx: ControllerContext<Reports>,
}

impl Controller for Reports {
    type Request = ParamRequest;
    type Response = RecordedResponse;

    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .action("export", |_| Ok("csv"))
            .action("summary", |_| Ok(json!([1, 2, 3])))
    }

    fn from_context(ctx: ControllerContext<Self>) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ControllerContext<Self> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ControllerContext<Self> {
        &mut self.ctx
    }
}

/// Records every hook and handler call, in order.
///
/// `pre:<allow>` records the `Allow` header visible when `pre_dispatch` runs.
pub struct Recorder {
    ctx: ControllerContext<Recorder>,
    pub events: Vec<String>,
    pub fail_pre: bool,
    pub fail_post: bool,
}

impl Recorder {
    pub fn build() -> Self {
        Self::new(ParamRequest::new(), RecordedResponse::new())
    }

    fn get(&mut self) -> anyhow::Result<Value> {
        self.events.push("get".into());
        Ok(json!("fetched"))
    }

    fn put(&mut self) -> anyhow::Result<Value> {
        self.events.push("put".into());
        Ok(json!({ "updated": 1 }))
    }

    fn nothing(&mut self) -> anyhow::Result<Value> {
        self.events.push("nothing".into());
        Ok(Value::Null)
    }

    fn explode(&mut self) -> anyhow::Result<Value> {
        self.events.push("explode".into());
        Err(anyhow::anyhow!("storage offline"))
    }
}

impl Controller for Recorder {
    type Request = ParamRequest;
    type Response = RecordedResponse;

    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .get(Self::get)
            .put(Self::put)
            .action("nothing", Self::nothing)
            .action("explode", Self::explode)
    }

    fn from_context(ctx: ControllerContext<Self>) -> Self {
        Self {
            ctx,
            events: Vec::new(),
            fail_pre: false,
            fail_post: false,
        }
    }

    fn context(&self) -> &ControllerContext<Self> {
        &self.ctx
    }

    fn context_mut(&mut self) -> &mut ControllerContext<Self> {
        &mut self.ctx
    }

    fn init(&mut self) {
        self.events.push("init".into());
    }

    fn pre_dispatch(&mut self) -> anyhow::Result<()> {
        let allow = self.response().header("Allow").unwrap_or("-").to_string();
        self.events.push(format!("pre:{allow}"));
        if self.fail_pre {
            anyhow::bail!("pre hook rejected request");
        }
        Ok(())
    }

    fn post_dispatch(&mut self) -> anyhow::Result<()> {
        self.events.push("post".into());
        if self.fail_post {
            anyhow::bail!("post hook failed");
        }
        Ok(())
    }
}
