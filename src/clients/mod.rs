//! 推理端点客户端
//!
//! 端点协议可插拔：评估流程只依赖 `InferenceClient`，
//! 具体的请求/响应格式由各实现负责

pub mod ollama_client;
pub mod openai_client;

pub use ollama_client::OllamaClient;
pub use openai_client::OpenAiClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Backend, Config};
use crate::error::{AppResult, InferError};

/// 推理客户端
///
/// 每次调用只发送一次请求，不做重试
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// 模型名称（仅用于日志）
    fn model_name(&self) -> &str;

    /// 发送提示词，返回模型输出的原始文本
    async fn infer(&self, prompt: &str) -> Result<String, InferError>;
}

/// 根据配置创建客户端
pub fn build_client(config: &Config) -> AppResult<Arc<dyn InferenceClient>> {
    let client: Arc<dyn InferenceClient> = match config.backend {
        Backend::Ollama => Arc::new(OllamaClient::new(config)?),
        Backend::OpenAi => Arc::new(OpenAiClient::new(config)),
    };
    Ok(client)
}
