/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则为 `info`（详细模式下为 `debug`）
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录导入开始信息
///
/// # 参数
/// - `paths`: 传入的文件路径
pub fn log_startup<P: AsRef<Path>>(paths: &[P]) {
    info!("{}", "=".repeat(60));
    info!("🚀 问答导入开始 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    for path in paths {
        info!("📁 {}", path.as_ref().display());
    }
    info!("{}", "=".repeat(60));
}

/// 打印导入统计信息
///
/// # 参数
/// - `mode`: 导入模式
/// - `pairs`: 生成的问答数量
/// - `skipped`: 跳过的行数
pub fn log_summary(mode: &str, pairs: usize, skipped: usize) {
    info!("{}", "─".repeat(60));
    info!("📊 导入完成 ({})", mode);
    info!("✅ 问答: {}", pairs);
    if skipped > 0 {
        info!("⚠️ 跳过: {}", skipped);
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
