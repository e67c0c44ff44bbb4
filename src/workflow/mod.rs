pub mod document_ctx;
pub mod evaluation_agent;

pub use document_ctx::DocumentCtx;
pub use evaluation_agent::EvaluationAgent;
