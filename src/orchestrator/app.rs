//! 统计流程编排
//!
//! 加载一次订单数据，依次执行选定的统计，每项统计写出 CSV 并打印摘要

use crate::config::Config;
use crate::error::{AppResult, OutputError};
use crate::models::{load_orders, Dataset};
use crate::reporting::ReportWriter;
use crate::services::AnalysisMode;
use crate::utils::logging;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    writer: ReportWriter,
}

impl App {
    pub fn new(config: Config) -> Self {
        let writer = ReportWriter::new(config.output_dir.clone());
        Self { config, writer }
    }

    /// 运行统计，摘要写到标准输出
    pub fn run(&self, mode: &AnalysisMode) -> AppResult<Vec<PathBuf>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(mode, &mut out)
    }

    /// 运行统计，摘要写到 `out`，返回写出的文件
    pub fn run_with_output(&self, mode: &AnalysisMode, out: &mut dyn Write) -> AppResult<Vec<PathBuf>> {
        let analyzers = mode.analyzers();
        logging::log_startup(&self.config, analyzers.len());

        let dataset = self.load()?;
        if dataset.orders.is_empty() {
            warn!("⚠️ 输入文件中没有订单，结果文件将只包含表头");
        }

        let mut saved = Vec::with_capacity(analyzers.len());
        for (i, analyzer) in analyzers.iter().enumerate() {
            logging::log_analysis_start(analyzer.name(), i + 1, analyzers.len());

            let report = analyzer.analyze(&dataset);
            let path = self.writer.write(report.as_ref())?;
            report
                .write_summary(out, self.config.summary_limit)
                .and_then(|_| out.flush())
                .map_err(OutputError::Summary)?;

            logging::log_report_saved(&path, report.rows().len());
            saved.push(path);
        }

        logging::print_final_stats(&saved);
        Ok(saved)
    }

    fn load(&self) -> AppResult<Dataset> {
        info!("\n📁 正在读取订单数据...");
        let dataset = load_orders(&self.config)?;
        logging::log_dataset_loaded(dataset.orders.len(), dataset.line_count, dataset.skipped_rows);
        Ok(dataset)
    }
}
