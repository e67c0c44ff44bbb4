//! # Paper Review
//!
//! 使用本地大模型对论文稿件做粗略的可发表性预审
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 推理端点客户端，协议可插拔
//! - `OllamaClient` - Ollama `/api/generate`
//! - `OpenAiClient` - OpenAI 兼容端点
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个能力互相独立
//! - `chunker` / `prompt_builder` / `response_parser` - 分块、提示词、输出解析
//! - `pdf_extractor` / `section_parser` - PDF 文本提取、章节切分
//! - `ReportWriter` - 写结果 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一段文本在一个维度上"的评估流程
//! - `EvaluationAgent` - 分块 → 提示词 → 推理 → 解析 → 汇总
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/text_pipeline` - extract / preprocess 阶段
//! - `orchestrator/batch_processor` - 批量文档评估
//! - `orchestrator/document_processor` - 单篇文档的多维度评估
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{build_client, InferenceClient, OllamaClient, OpenAiClient};
pub use config::{Backend, Config};
pub use error::{AppError, AppResult, InferError, ParseError};
pub use models::{AggregateResult, Criterion, DocumentReport, Evaluation, ResponseFormat};
pub use orchestrator::{App, ProcessingStats};
pub use workflow::EvaluationAgent;
