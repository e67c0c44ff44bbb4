use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::models::{Criterion, ResponseFormat};

/// 推理端点类型
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ollama `/api/generate`
    #[default]
    Ollama,
    /// OpenAI 兼容的 `/chat/completions`
    #[serde(alias = "open_ai")]
    OpenAi,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Backend::Ollama),
            "openai" | "open_ai" => Ok(Backend::OpenAi),
            other => Err(format!("未知的推理后端: {other}（可选: ollama, openai）")),
        }
    }
}

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > TOML 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 推理端点配置 ---
    pub backend: Backend,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 仅 OpenAI 兼容后端使用
    pub llm_api_key: String,
    /// Ollama 响应中承载模型输出的字段
    pub response_field: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 评估配置 ---
    /// 每个分块的最大字符数
    pub chunk_size: NonZeroUsize,
    pub response_format: ResponseFormat,
    pub criteria: Vec<Criterion>,
    // --- 目录配置 ---
    pub pdf_dir: PathBuf,
    pub text_dir: PathBuf,
    pub preprocessed_dir: PathBuf,
    pub output_file: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(4000) {
    Some(n) => n,
    None => unreachable!(),
};

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Ollama,
            llm_api_base_url: "http://localhost:11434".to_string(),
            llm_model_name: "llama3.2".to_string(),
            llm_api_key: String::new(),
            response_field: "response".to_string(),
            request_timeout_secs: 10,
            chunk_size: DEFAULT_CHUNK_SIZE,
            response_format: ResponseFormat::Markers,
            criteria: vec![Criterion::Coherence],
            pdf_dir: PathBuf::from("Data/All_papers"),
            text_dir: PathBuf::from("Data/extracted_text"),
            preprocessed_dir: PathBuf::from("Data/preprocessed_text"),
            output_file: PathBuf::from("Data/evaluation_results.json"),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env(|name| std::env::var(name).ok())
    }

    /// 加载配置文件（可选）并叠加环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let config = base.with_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|source| AppError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            criteria: dedup_criteria(config.criteria),
            ..config
        })
    }

    /// 用环境变量覆盖配置，无法解析的值沿用原值
    pub fn with_env(self, var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            backend: var("LLM_BACKEND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.backend),
            llm_api_base_url: var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_api_key: var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            response_field: var("LLM_RESPONSE_FIELD").unwrap_or(self.response_field),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_timeout_secs),
            chunk_size: var("CHUNK_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.chunk_size),
            response_format: var("RESPONSE_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.response_format),
            criteria: var("CRITERIA")
                .and_then(|v| {
                    v.split(',')
                        .map(str::parse)
                        .collect::<Result<Vec<Criterion>, _>>()
                        .ok()
                })
                .map(dedup_criteria)
                .unwrap_or(self.criteria),
            pdf_dir: var("PDF_DIR").map(PathBuf::from).unwrap_or(self.pdf_dir),
            text_dir: var("TEXT_DIR").map(PathBuf::from).unwrap_or(self.text_dir),
            preprocessed_dir: var("PREPROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.preprocessed_dir),
            output_file: var("OUTPUT_FILE").map(PathBuf::from).unwrap_or(self.output_file),
            verbose_logging: var("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.llm_api_base_url.trim().is_empty() {
            return Err(AppError::config("llm_api_base_url 不能为空"));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::config("request_timeout_secs 必须大于 0"));
        }
        if self.criteria.is_empty() {
            return Err(AppError::config("criteria 至少需要一个评估维度"));
        }
        Ok(())
    }
}

/// 去掉重复的评估维度，保留首次出现的顺序
pub fn dedup_criteria(criteria: Vec<Criterion>) -> Vec<Criterion> {
    let mut unique = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        if !unique.contains(&criterion) {
            unique.push(criterion);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_env_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("LLM_MODEL_NAME", "mistral"),
            ("CHUNK_SIZE", "1200"),
            ("CRITERIA", "coherence,novelty"),
            ("LLM_BACKEND", "openai"),
            ("REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().with_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.llm_model_name, "mistral");
        assert_eq!(config.chunk_size.get(), 1200);
        assert_eq!(config.criteria, vec![Criterion::Coherence, Criterion::Novelty]);
        assert_eq!(config.backend, Backend::OpenAi);
        // 无法解析的值沿用默认值
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_zero_chunk_size_from_env_is_ignored() {
        let config = Config::default().with_env(|name| (name == "CHUNK_SIZE").then(|| "0".into()));
        assert_eq!(config.chunk_size.get(), 4000);
    }

    #[test]
    fn test_toml_file_with_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
llm_model_name = "qwen2.5"
chunk_size = 2500
response_format = "json"
criteria = ["novelty"]
output_file = "out/results.json"
"#
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.llm_model_name, "qwen2.5");
        assert_eq!(config.chunk_size.get(), 2500);
        assert_eq!(config.response_format, ResponseFormat::Json);
        assert_eq!(config.criteria, vec![Criterion::Novelty]);
        assert_eq!(config.output_file, PathBuf::from("out/results.json"));
        // 未提供的字段使用默认值
        assert_eq!(config.llm_api_base_url, "http://localhost:11434");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_validate_rejects_empty_criteria() {
        let config = Config {
            criteria: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_criteria_are_collapsed() {
        let config = Config::default()
            .with_env(|name| (name == "CRITERIA").then(|| "novelty,coherence,novelty".into()));
        assert_eq!(config.criteria, vec![Criterion::Novelty, Criterion::Coherence]);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"criteria = ["coherence", "coherence"]"#).unwrap();
        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.criteria, vec![Criterion::Coherence]);
    }
}
