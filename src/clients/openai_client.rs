//! OpenAI 兼容端点客户端
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（vLLM、LM Studio、llama.cpp server 等）
//! - 整个调用由 `tokio::time::timeout` 限时
//! - 关闭 `async-openai` 自带的 5xx / 429 重试：每次调用只发送一次请求

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::InferenceClient;
use crate::config::Config;
use crate::error::InferError;

const SYSTEM_MESSAGE: &str =
    "You are a careful peer reviewer of research manuscripts. Follow the requested output format exactly.";

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout_secs: u64,
}

impl OpenAiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        // 最大重试时长为 0：首次失败即为最终结果
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry),
            model_name: config.llm_model_name.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    async fn send_to_llm(&self, prompt: &str) -> Result<String, InferError> {
        let invalid = |e: async_openai::error::OpenAIError| {
            InferError::unreachable(format!("无效请求: {e}"))
        };

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()
            .map_err(invalid)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(invalid)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.2)
            .build()
            .map_err(invalid)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            InferError::unreachable(e.to_string())
        })?;

        debug!("LLM API 调用成功");

        // 没有内容时返回空串，由解析器按解析失败处理
        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }
}

#[async_trait]
impl InferenceClient for OpenAiClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn infer(&self, prompt: &str) -> Result<String, InferError> {
        debug!("调用 LLM API，模型: {}", self.model_name);

        match tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            self.send_to_llm(prompt),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(InferError::Timeout {
                timeout_secs: self.timeout_secs,
            }),
        }
    }
}
