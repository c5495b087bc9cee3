pub mod item_ctx;
pub mod submit_flow;

pub use item_ctx::ItemCtx;
pub use submit_flow::SubmitFlow;
