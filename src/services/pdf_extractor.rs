//! PDF 文本提取
//!
//! 封装 `pdf-extract`：
//! - 加密、损坏或无法识别的 PDF 返回错误
//! - 扫描件（纯图片）提取结果为空，由调用方决定跳过
//! - 解析在阻塞线程中执行，解析库内部 panic 也转换为错误

use std::path::Path;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 从 PDF 字节中提取全文
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(pdf_bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| e.to_string())
}

/// 读取并提取单个 PDF 文件
pub async fn extract_pdf_file(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;
    debug!("读取 PDF {} ({} 字节)", path.display(), bytes.len());

    let extracted = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
        .await
        .map_err(|e| AppError::pdf_extraction_failed(path, format!("解析过程异常终止: {e}")))?;

    extracted.map_err(|detail| AppError::pdf_extraction_failed(path, detail))
}
