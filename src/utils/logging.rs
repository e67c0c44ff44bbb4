//! 日志工具模块
//!
//! 提供批处理过程中的横幅与统计输出
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `stage`: 当前阶段名称（extract / preprocess / evaluate）
/// - `config`: 配置
pub fn log_startup(stage: &str, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {} 阶段", stage);
    info!(
        "🤖 推理端点: {:?} @ {} (模型: {})",
        config.backend, config.llm_api_base_url, config.llm_model_name
    );
    info!(
        "📏 分块大小: {} 字符 | 超时: {} 秒",
        config.chunk_size, config.request_timeout_secs
    );
    info!("{}", "=".repeat(60));
}

/// 记录待处理文件数量
pub fn log_files_found(total: usize, kind: &str) {
    info!("✓ 找到 {} 个待处理的 {} 文件", total, kind);
    info!("📋 将按文件名顺序逐个处理\n");
}

/// 记录单篇文档开始
///
/// # 参数
/// - `index`: 文档序号（从 1 开始）
/// - `total`: 文档总数
/// - `filename`: 文件名
pub fn log_document_start(index: usize, total: usize, filename: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 开始处理第 {}/{} 篇: {}", index, total, filename);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `output_path`: 结果文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
