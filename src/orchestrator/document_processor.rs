//! 单篇文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **读取文档**：读取预处理后的文本
//! 2. **逐维度评估**：按配置顺序依次运行每个 `EvaluationAgent`
//! 3. **汇总报告**：计算平均分与是否可发表

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{info, info_span, Instrument};

use crate::models::{file_name, load_text, DocumentReport};
use crate::workflow::{DocumentCtx, EvaluationAgent};

/// 处理单篇文档
///
/// # 参数
/// - `agents`: 各评估维度的代理
/// - `path`: 预处理文本路径
/// - `document_index`: 文档序号（用于日志）
/// - `chunk_size`: 分块大小
///
/// # 返回
/// 返回该文档的评估报告；只有读取失败时返回错误
pub async fn process_document(
    agents: &[EvaluationAgent],
    path: &Path,
    document_index: usize,
    chunk_size: NonZeroUsize,
) -> Result<DocumentReport> {
    let filename = file_name(path);
    let text = load_text(path)
        .await
        .with_context(|| format!("无法读取文档: {}", filename))?;

    info!(
        "[文档 {}] 文本长度: {} 字符",
        document_index,
        text.chars().count()
    );

    let mut criteria = BTreeMap::new();
    for agent in agents {
        let ctx = DocumentCtx::new(&filename, document_index, agent.criterion());
        let result = agent
            .analyze(&text, chunk_size)
            .instrument(info_span!("evaluate", doc = %ctx))
            .await;
        criteria.insert(agent.criterion(), result);
    }

    let report = DocumentReport::new(filename, criteria);
    info!(
        "[文档 {}] 平均分: {:.3} | 可发表: {}",
        document_index,
        report.average_score,
        if report.is_publishable { "是" } else { "否" }
    );

    Ok(report)
}
