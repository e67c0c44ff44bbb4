use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{AppError, AppResult};

/// 列出文件夹中指定扩展名的文件（按文件名排序，不递归）
pub async fn list_files(folder: &Path, extension: &str) -> AppResult<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(AppError::DirectoryNotFound {
            path: folder.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder, e))?
    {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// 读取 UTF-8 文本文件
pub async fn load_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))
}

/// 文件名（用于报告和日志）
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
