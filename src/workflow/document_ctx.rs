//! 文档处理上下文
//!
//! 封装"我正在处理第几篇文档的哪个评估维度"这一信息

use std::fmt::Display;

use crate::models::Criterion;

/// 文档处理上下文（仅用于日志）
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 文件名
    pub filename: String,

    /// 文档序号（从1开始）
    pub document_index: usize,

    /// 当前评估维度
    pub criterion: Criterion,
}

impl DocumentCtx {
    pub fn new(filename: impl Into<String>, document_index: usize, criterion: Criterion) -> Self {
        Self {
            filename: filename.into(),
            document_index,
            criterion,
        }
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文档 #{} {} 维度#{}]",
            self.document_index, self.filename, self.criterion
        )
    }
}
