use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::evaluation::{AggregateResult, Criterion};

/// 可发表阈值：平均分不低于该值即视为可发表
pub const PUBLISHABLE_THRESHOLD: f64 = 0.75;

/// 单篇文档的评估报告
///
/// 序列化后各维度结果平铺为顶层字段，例如：
/// `{"filename": "P001.txt", "coherence": {...}, "average_score": 0.8, "is_publishable": true}`
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    #[serde(flatten)]
    pub criteria: BTreeMap<Criterion, AggregateResult>,
    pub average_score: f64,
    pub is_publishable: bool,
}

impl DocumentReport {
    pub fn new(filename: impl Into<String>, criteria: BTreeMap<Criterion, AggregateResult>) -> Self {
        let average_score = if criteria.is_empty() {
            0.0
        } else {
            criteria.values().map(|r| r.score).sum::<f64>() / criteria.len() as f64
        };

        Self {
            filename: filename.into(),
            criteria,
            average_score,
            is_publishable: average_score >= PUBLISHABLE_THRESHOLD,
        }
    }
}
