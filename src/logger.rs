//! 日志初始化
//!
//! 默认级别 info（verbose 时为 debug），可通过 `RUST_LOG` 覆盖

use tracing_subscriber::EnvFilter;

/// 初始化日志（重复调用无副作用）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
