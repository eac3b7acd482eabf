//! 百分比计算与格式化

/// `count / total * 100`，分母为 0 时返回 0
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// 保留一位小数并带 `%` 后缀
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// 等价于 `format_percent(percentage(count, total))`
pub fn percent_of(count: usize, total: usize) -> String {
    format_percent(percentage(count, total))
}
