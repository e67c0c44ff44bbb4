//! 批量评估处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：根据配置创建推理客户端与各维度的评估代理
//! 2. **批量加载**：扫描预处理目录中的所有 `.txt` 文档
//! 3. **顺序处理**：逐篇委托 `document_processor`，单篇失败不影响其他文档
//! 4. **结果输出**：写入 JSON 报告并输出全局统计

use anyhow::Result;
use tracing::{error, info, warn};

use crate::clients::build_client;
use crate::config::{dedup_criteria, Config};
use crate::models::{file_name, list_files, DocumentReport};
use crate::orchestrator::document_processor;
use crate::services::ReportWriter;
use crate::utils::logging::{log_document_start, log_files_found, log_startup, print_final_stats};
use crate::workflow::EvaluationAgent;

/// 应用主结构
pub struct App {
    config: Config,
    agents: Vec<EvaluationAgent>,
    writer: ReportWriter,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub publishable: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup("evaluate", &config);

        let client = build_client(&config)?;
        // 同一维度只评估一次
        let agents = dedup_criteria(config.criteria.clone())
            .into_iter()
            .map(|criterion| EvaluationAgent::new(client.clone(), criterion, config.response_format))
            .collect();
        let writer = ReportWriter::new(&config.output_file);

        Ok(Self {
            config,
            agents,
            writer,
        })
    }

    /// 运行评估主逻辑
    ///
    /// # 参数
    /// - `only`: 只评估指定文件名的文档
    pub async fn run(&self, only: Option<&str>) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待评估的文档...");
        let documents: Vec<_> = list_files(&self.config.preprocessed_dir, "txt")
            .await?
            .into_iter()
            .filter(|path| only.map_or(true, |name| file_name(path) == name))
            .collect();

        if documents.is_empty() {
            warn!("⚠️ 没有找到待评估的文档");
        } else {
            log_files_found(documents.len(), "txt");
        }

        let mut stats = ProcessingStats {
            total: documents.len(),
            ..Default::default()
        };
        let mut reports: Vec<DocumentReport> = Vec::with_capacity(documents.len());

        for (idx, path) in documents.iter().enumerate() {
            let document_index = idx + 1;
            log_document_start(document_index, documents.len(), &file_name(path));

            match document_processor::process_document(
                &self.agents,
                path,
                document_index,
                self.config.chunk_size,
            )
            .await
            {
                Ok(report) => {
                    stats.success += 1;
                    if report.is_publishable {
                        stats.publishable += 1;
                    }
                    reports.push(report);
                }
                Err(e) => {
                    error!("[文档 {}] ❌ 评估失败: {:#}", document_index, e);
                    stats.failed += 1;
                }
            }
        }

        self.writer.write(&reports).await?;

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.writer.path().display().to_string(),
        );
        info!("📝 可发表: {}/{}", stats.publishable, stats.success);

        Ok(stats)
    }
}
