//! 命令行参数

use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::config::{dedup_criteria, Backend, Config};
use crate::models::{Criterion, ResponseFormat};

#[derive(Debug, Parser)]
#[command(name = "paper_review", version, about = "使用本地大模型预审论文稿件")]
pub struct Cli {
    /// TOML 配置文件
    #[arg(short, long, global = true, env = "PAPER_REVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// 显示调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 从 PDF 中提取文本
    Extract(DirArgs),
    /// 把提取的文本切分为章节
    Preprocess(DirArgs),
    /// 调用模型评估预处理后的文档
    Evaluate(EvaluateArgs),
}

#[derive(Debug, Args)]
pub struct DirArgs {
    /// 输入目录
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// 输出目录
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl DirArgs {
    /// 未指定的目录使用配置中的默认值
    pub fn resolve(&self, default_input: &Path, default_output: &Path) -> (PathBuf, PathBuf) {
        (
            self.input.clone().unwrap_or_else(|| default_input.to_path_buf()),
            self.output.clone().unwrap_or_else(|| default_output.to_path_buf()),
        )
    }
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// 预处理文本目录
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// 结果 JSON 文件
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// 只评估该文件名（如 P006.txt）
    #[arg(long)]
    pub only: Option<String>,

    /// 评估维度，逗号分隔（coherence,novelty）
    #[arg(long, value_delimiter = ',')]
    pub criteria: Option<Vec<Criterion>>,

    /// 分块大小（字符数）
    #[arg(long)]
    pub chunk_size: Option<NonZeroUsize>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 推理端点地址
    #[arg(long)]
    pub base_url: Option<String>,

    /// 推理后端（ollama / openai）
    #[arg(long)]
    pub backend: Option<Backend>,

    /// 要求模型输出的格式（markers / json）
    #[arg(long)]
    pub format: Option<ResponseFormat>,

    /// 单次请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl EvaluateArgs {
    /// 用命令行参数覆盖配置
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.preprocessed_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(criteria) = &self.criteria {
            config.criteria = dedup_criteria(criteria.clone());
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(model) = &self.model {
            config.llm_model_name = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.llm_api_base_url = base_url.clone();
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(format) = self.format {
            config.response_format = format;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
    }
}
