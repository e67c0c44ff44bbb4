//! 报告写入服务 - 业务能力层
//!
//! 只负责把评估报告写成 JSON 数组，不关心评估流程

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::DocumentReport;

pub struct ReportWriter {
    output_path: PathBuf,
}

impl ReportWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    /// 写入全部报告（覆盖已有文件），必要时创建父目录
    pub async fn write(&self, reports: &[DocumentReport]) -> AppResult<()> {
        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent, e))?;
        }

        let json = serde_json::to_string_pretty(reports)?;
        tokio::fs::write(&self.output_path, json)
            .await
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))?;

        debug!(
            "已写入 {} 条报告到 {}",
            reports.len(),
            self.output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateResult, Criterion};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_write_creates_parent_and_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.json");

        let mut criteria = BTreeMap::new();
        criteria.insert(
            Criterion::Coherence,
            AggregateResult {
                score: 0.9,
                explanation: "Chunk 1: clear".to_string(),
                ..Default::default()
            },
        );
        let reports = vec![DocumentReport::new("P001.txt", criteria)];

        let writer = ReportWriter::new(&path);
        writer.write(&reports).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let array = written.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["filename"], "P001.txt");
        assert_eq!(array[0]["is_publishable"], true);
    }

    #[tokio::test]
    async fn test_write_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        ReportWriter::new(&path).write(&[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
