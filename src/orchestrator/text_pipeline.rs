//! 文本准备流水线 - 编排层
//!
//! - `extract_all`：PDF → 纯文本
//! - `preprocess_all`：纯文本 → 按章节整理的文本
//!
//! 单个文件失败只记录警告并跳过

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{file_name, list_files, load_text};
use crate::services::pdf_extractor::extract_pdf_file;
use crate::services::section_parser::parse_sections;
use crate::utils::logging::log_files_found;

/// 阶段统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
}

/// 提取 `input_dir` 下所有 PDF 的文本，写入 `output_dir/<stem>.txt`
pub async fn extract_all(input_dir: &Path, output_dir: &Path) -> Result<StageStats> {
    let pdfs = list_files(input_dir, "pdf").await?;
    log_files_found(pdfs.len(), "pdf");
    ensure_dir(output_dir).await?;

    let mut stats = StageStats {
        total: pdfs.len(),
        ..Default::default()
    };

    for pdf in &pdfs {
        let name = file_name(pdf);
        info!("📄 正在提取: {}", name);

        match extract_pdf_file(pdf).await {
            Ok(text) if !text.is_empty() => {
                let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
                let output_path = output_dir.join(format!("{stem}.txt"));
                write_text(&output_path, &text).await?;
                info!("✓ 文本已保存至: {}", output_path.display());
                stats.success += 1;
            }
            Ok(_) => {
                warn!("⚠️ 未提取到文本（可能是扫描件）: {}", name);
                stats.skipped += 1;
            }
            Err(e) => {
                warn!("⚠️ 提取失败: {}", e);
                stats.skipped += 1;
            }
        }
    }

    info!(
        "✅ 提取完成: 成功 {}/{}，跳过 {}",
        stats.success, stats.total, stats.skipped
    );
    Ok(stats)
}

/// 把 `input_dir` 下的纯文本切分为章节，写入 `output_dir` 下的同名文件
pub async fn preprocess_all(input_dir: &Path, output_dir: &Path) -> Result<StageStats> {
    let texts = list_files(input_dir, "txt").await?;
    log_files_found(texts.len(), "txt");
    ensure_dir(output_dir).await?;

    let mut stats = StageStats {
        total: texts.len(),
        ..Default::default()
    };

    for path in &texts {
        let name = file_name(path);
        info!("📄 正在预处理: {}", name);

        let raw_text = match load_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ 读取失败: {}", e);
                stats.skipped += 1;
                continue;
            }
        };

        let sections = parse_sections(&raw_text);
        let found = sections.iter().filter(|s| !s.content.is_empty()).count();

        let output_path = output_dir.join(&name);
        write_text(&output_path, &sections.render()).await?;
        info!(
            "✓ 识别到 {} 个章节，已保存至: {}",
            found,
            output_path.display()
        );
        stats.success += 1;
    }

    info!(
        "✅ 预处理完成: 成功 {}/{}，跳过 {}",
        stats.success, stats.total, stats.skipped
    );
    Ok(stats)
}

async fn ensure_dir(dir: &Path) -> AppResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::file_write_failed(dir, e))
}

async fn write_text(path: &Path, content: &str) -> AppResult<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path, e))
}
