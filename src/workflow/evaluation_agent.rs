//! 评估代理 - 流程层
//!
//! 核心职责：定义"一段文本在一个维度上"的完整评估流程
//!
//! 流程顺序（逐块、按顺序、不并发）：
//! 1. 切分文本
//! 2. 构建提示词 → 调用推理端点 → 解析输出
//! 3. 单块失败记 0 分并继续，最后取平均、拼接说明

use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::InferenceClient;
use crate::models::{AggregateResult, Chunk, ChunkOutcome, ChunkResult, Criterion, ResponseFormat};
use crate::services::{build_prompt, split_into_chunks, try_parse};
use crate::utils::truncate_text;

/// 评估代理
///
/// - 显式构造，持有客户端和评估维度，不存在全局实例
/// - 单次 `analyze` 内的所有状态都不跨调用共享
/// - 永远返回完整的 `AggregateResult`，错误在块级别消化
pub struct EvaluationAgent {
    client: Arc<dyn InferenceClient>,
    criterion: Criterion,
    response_format: ResponseFormat,
}

impl EvaluationAgent {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        criterion: Criterion,
        response_format: ResponseFormat,
    ) -> Self {
        Self {
            client,
            criterion,
            response_format,
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// 分块评估整段文本
    pub async fn analyze(&self, text: &str, chunk_size: NonZeroUsize) -> AggregateResult {
        let chunks = split_into_chunks(text, chunk_size);

        if chunks.is_empty() {
            warn!("输入文本为空，{} 评分记为 0", self.criterion);
        } else {
            debug!(
                "{} 评估开始：{} 个分块，模型: {}",
                self.criterion,
                chunks.len(),
                self.client.model_name()
            );
        }

        let mut results = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            results.push(self.evaluate_chunk(chunk).await);
        }

        let aggregate = AggregateResult::from_chunks(&results);

        info!(
            "✓ {} 得分 {:.3}（分块 {}，调用失败 {}，无法解析 {}）",
            self.criterion,
            aggregate.score,
            aggregate.chunk_count,
            aggregate.failed_chunks,
            aggregate.unscorable_chunks
        );
        if aggregate.chunk_count > 0 && aggregate.is_unscored() {
            warn!(
                "⚠️ {} 所有分块均未得到有效评分，0 分不代表模型的真实评价",
                self.criterion
            );
        }

        aggregate
    }

    /// 评估单个分块
    pub async fn evaluate_chunk(&self, chunk: &Chunk<'_>) -> ChunkResult {
        let prompt = build_prompt(chunk, self.criterion, self.response_format);

        let outcome = match self.client.infer(&prompt).await {
            Ok(raw) => match try_parse(&raw) {
                Ok(evaluation) => {
                    debug!(
                        "分块 {}/{} 得分 {}",
                        chunk.index, chunk.total, evaluation.score
                    );
                    ChunkOutcome::Scored {
                        score: evaluation.score,
                        explanation: evaluation.explanation,
                    }
                }
                Err(reason) => {
                    warn!(
                        "分块 {}/{} 输出无法解析 ({}): {}",
                        chunk.index,
                        chunk.total,
                        reason,
                        truncate_text(&raw, 120)
                    );
                    ChunkOutcome::Unscorable { reason }
                }
            },
            Err(error) => {
                warn!("分块 {}/{} 调用失败: {}", chunk.index, chunk.total, error);
                ChunkOutcome::Failed { error }
            }
        };

        ChunkResult {
            index: chunk.index,
            outcome,
        }
    }
}
