//! 日志工具模块
//!
//! 负责初始化 tracing，并提供统一格式的进度日志

use crate::config::Config;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则为 `info`，`verbose` 时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, analyzer_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 追加销售统计");
    info!("📄 输入文件: {}", config.input_path.display());
    info!("📁 输出目录: {}", config.output_dir.display());
    info!("📊 统计项目数: {}", analyzer_count);
    info!("{}", "=".repeat(60));
}

/// 记录数据加载信息
pub fn log_dataset_loaded(orders: usize, lines: usize, skipped: usize) {
    info!("✓ 找到 {} 个订单 ({} 行商品)", orders, lines);
    if skipped > 0 {
        info!("💡 已跳过 {} 行列数不完整的数据", skipped);
    }
}

/// 记录单项统计开始
pub fn log_analysis_start(name: &str, index: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始第 {}/{} 项统计: {}", index, total, name);
    info!("{}", "─".repeat(60));
}

/// 记录结果文件
pub fn log_report_saved(path: &Path, rows: usize) {
    info!("✓ 已保存 {} 行结果至: {}", rows, path.display());
}

/// 打印最终统计信息
pub fn print_final_stats(saved: &[std::path::PathBuf]) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部统计完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for path in saved {
        info!("  - {}", path.display());
    }
}
