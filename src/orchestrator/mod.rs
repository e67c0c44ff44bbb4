//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `text_pipeline` - 文本准备
//! - PDF → 纯文本（extract）
//! - 纯文本 → 章节文本（preprocess）
//!
//! ### `batch_processor` - 批量评估
//! - 创建推理客户端与评估代理
//! - 扫描预处理目录，逐篇评估
//! - 写入 JSON 报告，输出全局统计
//!
//! ### `document_processor` - 单篇文档
//! - 逐维度运行 `EvaluationAgent`
//! - 计算平均分与是否可发表
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<文档>)
//!     ↓
//! document_processor (处理单篇文档的所有维度)
//!     ↓
//! workflow::EvaluationAgent (处理单个维度的所有分块)
//!     ↓
//! services (能力层：分块 / 提示词 / 解析 / 写报告)
//!     ↓
//! clients (推理端点)
//! ```
//!
//! 全程顺序执行，不并发

pub mod batch_processor;
pub mod document_processor;
pub mod text_pipeline;

pub use batch_processor::{App, ProcessingStats};
pub use document_processor::process_document;
pub use text_pipeline::{extract_all, preprocess_all, StageStats};
