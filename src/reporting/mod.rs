//! 输出层
//!
//! 每种统计结果都实现 [`Report`]：同一份数据既写成 CSV，也打印成控制台摘要

pub mod format;
pub mod writer;

use std::io;

pub use format::{format_percent, percent_of, percentage};
pub use writer::{render_csv, write_csv, ReportWriter};

/// 一份可输出的统计结果
pub trait Report {
    /// 输出文件名
    fn file_name(&self) -> &'static str;

    /// CSV 表头
    fn header(&self) -> Vec<String>;

    /// CSV 数据行，顺序即输出顺序
    fn rows(&self) -> Vec<Vec<String>>;

    /// 打印排行摘要，`limit` 限制排行榜长度
    fn write_summary(&self, out: &mut dyn io::Write, limit: usize) -> io::Result<()>;
}
