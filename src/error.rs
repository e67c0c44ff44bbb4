//! 错误类型
//!
//! - `InferError`：单次推理调用失败（超时 / 不可达）
//! - `ParseError`：模型输出无法解析为评分
//! - `AppError`：配置、文件、PDF 提取等应用级错误
//!
//! 注意：`InferError` 和 `ParseError` 的 Display 文本会写入评估报告的 explanation 字段，
//! 因此保持英文

use std::path::PathBuf;
use thiserror::Error;

/// 推理端点调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferError {
    /// 请求在限定时间内未返回
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// 网络层或 HTTP 层失败（连接失败、非 2xx 状态码、端点返回 error 字段）
    #[error("Inference endpoint unreachable: {detail}")]
    Unreachable { detail: String },
}

impl InferError {
    pub fn unreachable(detail: impl Into<String>) -> Self {
        InferError::Unreachable {
            detail: detail.into(),
        }
    }
}

/// 模型输出解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 既没有可解析的 JSON，也缺少 `Score:` / `Explanation:` 标记
    #[error("response contains neither a JSON object nor Score/Explanation markers")]
    Unrecognized,

    /// `Score:` 之后的内容不是数字
    #[error("score token {token:?} is not a number")]
    InvalidScore { token: String },

    /// 分数为 NaN 或无穷大
    #[error("score {token:?} is not finite")]
    NonFiniteScore { token: String },
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Config { message: String },

    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({}): {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 目录不存在
    #[error("目录不存在: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PDF 文本提取失败
    #[error("PDF文本提取失败 ({}): {detail}", path.display())]
    PdfExtractionFailed { path: PathBuf, detail: String },

    /// HTTP 客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuildFailed(#[from] reqwest::Error),

    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config {
            message: message.into(),
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建 PDF 提取错误
    pub fn pdf_extraction_failed(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        AppError::PdfExtractionFailed {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
