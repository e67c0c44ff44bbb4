//! 评估相关的数据模型
//!
//! 单次 `analyze` 调用内创建并丢弃，不跨评估共享

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{InferError, ParseError};

/// 解析失败时写入 explanation 的固定文本
pub const PARSE_FAILURE_EXPLANATION: &str = "Failed to parse the response.";

/// 评估维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// 连贯性
    Coherence,
    /// 新颖性
    Novelty,
}

impl Criterion {
    /// 报告中的字段名
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Coherence => "coherence",
            Criterion::Novelty => "novelty",
        }
    }

    /// 提示词中 1 分对应的描述
    pub fn top_score_meaning(&self) -> &'static str {
        match self {
            Criterion::Coherence => "highly coherent",
            Criterion::Novelty => "highly novel",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coherence" => Ok(Criterion::Coherence),
            "novelty" => Ok(Criterion::Novelty),
            other => Err(format!("未知的评估维度: {other}（可选: coherence, novelty）")),
        }
    }
}

/// 要求模型输出的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `Score: <f>\nExplanation: <text>`
    #[default]
    Markers,
    /// `{"score": <f>, "explanation": "<text>"}`
    Json,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markers" | "text" => Ok(ResponseFormat::Markers),
            "json" => Ok(ResponseFormat::Json),
            other => Err(format!("未知的输出格式: {other}（可选: markers, json）")),
        }
    }
}

/// 文本分块
///
/// `index` 从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub index: usize,
    pub total: usize,
    pub text: &'a str,
}

/// 解析后的评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    pub explanation: String,
}

impl Evaluation {
    /// 解析失败时的兼容结果：0 分 + 固定说明
    pub fn parse_failure() -> Self {
        Self {
            score: 0.0,
            explanation: PARSE_FAILURE_EXPLANATION.to_string(),
        }
    }
}

/// 单个分块的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// 成功评分
    Scored { score: f64, explanation: String },
    /// 端点有返回，但内容无法解析
    Unscorable { reason: ParseError },
    /// 调用端点失败
    Failed { error: InferError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub index: usize,
    pub outcome: ChunkOutcome,
}

impl ChunkResult {
    /// 参与平均的分数，失败记 0
    pub fn score(&self) -> f64 {
        match &self.outcome {
            ChunkOutcome::Scored { score, .. } => *score,
            ChunkOutcome::Unscorable { .. } | ChunkOutcome::Failed { .. } => 0.0,
        }
    }

    /// 形如 `Chunk 2: ...` 的说明行
    pub fn explanation_line(&self) -> String {
        match &self.outcome {
            ChunkOutcome::Scored { explanation, .. } => {
                format!("Chunk {}: {}", self.index, explanation)
            }
            ChunkOutcome::Unscorable { .. } => {
                format!("Chunk {}: {}", self.index, PARSE_FAILURE_EXPLANATION)
            }
            ChunkOutcome::Failed { error } => {
                format!("Chunk {}: Error occurred - {}", self.index, error)
            }
        }
    }
}

/// 整篇文本在一个维度上的汇总结果
///
/// 只有 `score` 和 `explanation` 会写入报告，计数字段仅用于日志
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub score: f64,
    pub explanation: String,
    #[serde(skip)]
    pub chunk_count: usize,
    #[serde(skip)]
    pub failed_chunks: usize,
    #[serde(skip)]
    pub unscorable_chunks: usize,
}

impl AggregateResult {
    /// 按分块顺序汇总：分数取平均（失败记 0），说明按行拼接
    pub fn from_chunks(results: &[ChunkResult]) -> Self {
        let chunk_count = results.len();
        let score = if chunk_count == 0 {
            0.0
        } else {
            results.iter().map(ChunkResult::score).sum::<f64>() / chunk_count as f64
        };

        let explanation = results
            .iter()
            .map(ChunkResult::explanation_line)
            .collect::<Vec<_>>()
            .join("\n");

        let failed_chunks = results
            .iter()
            .filter(|r| matches!(r.outcome, ChunkOutcome::Failed { .. }))
            .count();
        let unscorable_chunks = results
            .iter()
            .filter(|r| matches!(r.outcome, ChunkOutcome::Unscorable { .. }))
            .count();

        Self {
            score,
            explanation,
            chunk_count,
            failed_chunks,
            unscorable_chunks,
        }
    }

    /// 没有任何分块得到真实评分（区分"0 分"和"全部失败"）
    pub fn is_unscored(&self) -> bool {
        self.failed_chunks + self.unscorable_chunks == self.chunk_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(index: usize, score: f64, explanation: &str) -> ChunkResult {
        ChunkResult {
            index,
            outcome: ChunkOutcome::Scored {
                score,
                explanation: explanation.to_string(),
            },
        }
    }

    #[test]
    fn test_aggregate_of_no_chunks_is_zero() {
        let result = AggregateResult::from_chunks(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.explanation, "");
        assert!(result.is_unscored());
    }

    #[test]
    fn test_failures_count_as_zero_in_average() {
        let results = vec![
            scored(1, 0.9, "clear"),
            ChunkResult {
                index: 2,
                outcome: ChunkOutcome::Failed {
                    error: InferError::Timeout { timeout_secs: 10 },
                },
            },
            ChunkResult {
                index: 3,
                outcome: ChunkOutcome::Unscorable {
                    reason: ParseError::Unrecognized,
                },
            },
        ];

        let aggregate = AggregateResult::from_chunks(&results);
        assert!((aggregate.score - 0.3).abs() < 1e-9);
        assert_eq!(aggregate.failed_chunks, 1);
        assert_eq!(aggregate.unscorable_chunks, 1);
        assert!(!aggregate.is_unscored());
        assert_eq!(
            aggregate.explanation,
            "Chunk 1: clear\n\
             Chunk 2: Error occurred - Request timed out after 10s\n\
             Chunk 3: Failed to parse the response."
        );
    }

    #[test]
    fn test_serialized_aggregate_has_only_score_and_explanation() {
        let aggregate = AggregateResult::from_chunks(&[scored(1, 0.5, "ok")]);
        let value = serde_json::to_value(&aggregate).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["explanation", "score"]);
    }

    #[test]
    fn test_criterion_from_str() {
        assert_eq!("Coherence".parse::<Criterion>(), Ok(Criterion::Coherence));
        assert_eq!(" novelty ".parse::<Criterion>(), Ok(Criterion::Novelty));
        assert!("ethics".parse::<Criterion>().is_err());
    }
}
