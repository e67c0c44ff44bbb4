//! Ollama 客户端
//!
//! `POST {base_url}/api/generate`，请求体 `{model, prompt, stream: false}`
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::InferenceClient;
use crate::config::Config;
use crate::error::{AppResult, InferError};
use crate::utils::truncate_text;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
    model_name: String,
    response_field: String,
    timeout_secs: u64,
}

impl OllamaClient {
    /// 创建新的 Ollama 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/api/generate",
                config.llm_api_base_url.trim_end_matches('/')
            ),
            model_name: config.llm_model_name.clone(),
            response_field: config.response_field.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn classify(&self, err: reqwest::Error) -> InferError {
        if err.is_timeout() {
            InferError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            InferError::unreachable(err.to_string())
        }
    }

    /// 从响应体中取出模型输出
    ///
    /// - JSON 且含 `error` 字段：视为端点错误
    /// - JSON 且含配置的输出字段：返回该字段
    /// - 其他情况：原样返回响应体，交给解析器处理
    fn extract_text(&self, body: &str) -> Result<String, InferError> {
        let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) else {
            return Ok(body.trim().to_string());
        };

        if let Some(error) = map.get("error") {
            let detail = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(InferError::unreachable(detail));
        }

        match map.get(&self.response_field).and_then(JsonValue::as_str) {
            Some(text) => Ok(text.trim().to_string()),
            None => {
                warn!("响应中缺少字段 '{}'，按原文解析", self.response_field);
                Ok(body.trim().to_string())
            }
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn infer(&self, prompt: &str) -> Result<String, InferError> {
        debug!("调用 Ollama，模型: {}, 提示词长度: {} 字符", self.model_name, prompt.len());

        let payload = GenerateRequest {
            model: &self.model_name,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(InferError::unreachable(format!(
                "HTTP {}: {}",
                status,
                truncate_text(body.trim(), 200)
            )));
        }

        debug!("Ollama 调用成功，响应长度: {} 字符", body.len());
        self.extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn test_config(base_url: &str, timeout_secs: u64) -> Config {
        Config {
            llm_api_base_url: base_url.to_string(),
            llm_model_name: "llama3.2".to_string(),
            request_timeout_secs: timeout_secs,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_infer_returns_response_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "llama3.2",
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"llama3.2","response":"Score: 0.8\nExplanation: Fine.","done":true}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(&server.url(), 5)).unwrap();
        let text = client.infer("evaluate this").await.unwrap();

        assert_eq!(text, "Score: 0.8\nExplanation: Fine.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_infer_uses_configured_response_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"text":"Score: 0.4\nExplanation: Thin."}"#)
            .create_async()
            .await;

        let config = Config {
            response_field: "text".to_string(),
            ..test_config(&server.url(), 5)
        };
        let client = OllamaClient::new(&config).unwrap();

        assert_eq!(
            client.infer("p").await.unwrap(),
            "Score: 0.4\nExplanation: Thin."
        );
    }

    #[tokio::test]
    async fn test_http_error_status_is_unreachable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model crashed")
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(&server.url(), 5)).unwrap();
        let err = client.infer("p").await.unwrap_err();

        match err {
            InferError::Unreachable { detail } => {
                assert!(detail.contains("500"));
                assert!(detail.contains("model crashed"));
            }
            other => panic!("期望 Unreachable，实际: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_field_in_body_is_unreachable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"error":"model 'llama3.2' not found"}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(&server.url(), 5)).unwrap();
        let err = client.infer("p").await.unwrap_err();

        assert_eq!(err, InferError::unreachable("model 'llama3.2' not found"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_unreachable() {
        // 绑定后立即释放端口，保证无人监听
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OllamaClient::new(&test_config(&format!("http://{addr}"), 5)).unwrap();
        let err = client.infer("p").await.unwrap_err();

        assert!(matches!(err, InferError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_stalled_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 接受连接但从不响应
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            }
        });

        let client = OllamaClient::new(&test_config(&format!("http://{addr}"), 1)).unwrap();
        let err = client.infer("p").await.unwrap_err();

        assert_eq!(err, InferError::Timeout { timeout_secs: 1 });
        server.abort();
    }

    #[test]
    fn test_extract_text_falls_back_to_raw_body() {
        let client = OllamaClient::new(&test_config("http://localhost:11434", 5)).unwrap();

        assert_eq!(
            client.extract_text("  Score: 1\nExplanation: raw  ").unwrap(),
            "Score: 1\nExplanation: raw"
        );
        assert_eq!(
            client.extract_text(r#"{"completion":"x"}"#).unwrap(),
            r#"{"completion":"x"}"#
        );
    }
}
