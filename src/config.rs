use crate::error::InputError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 程序配置
///
/// 解析顺序：默认值 → TOML 配置文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 订单明细 CSV 文件
    pub input_path: PathBuf,
    /// 统计结果 CSV 的输出目录
    pub output_dir: PathBuf,
    /// 订单号列名
    pub order_id_column: String,
    /// 商品名称列名
    pub product_column: String,
    /// 追加销售标记列名
    pub upsell_column: String,
    /// 标记列中表示"追加销售"的取值
    pub upsell_marker: String,
    /// 控制台排行榜显示的条目数
    pub summary_limit: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("products.csv"),
            output_dir: PathBuf::from("."),
            order_id_column: "№ заказа".to_string(),
            product_column: "Товары".to_string(),
            upsell_column: "Допродажа".to_string(),
            upsell_marker: "Допродажа".to_string(),
            summary_limit: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：可选的 TOML 文件，再叠加环境变量
    pub fn load(config_file: Option<&Path>) -> Result<Self, InputError> {
        let base = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    /// 从 TOML 文件读取配置，缺省的键使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, InputError> {
        if !path.exists() {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| InputError::ConfigReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| InputError::ConfigParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            input_path: env("UPSELL_INPUT").map(PathBuf::from).unwrap_or(self.input_path),
            output_dir: env("UPSELL_OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            order_id_column: env("UPSELL_ORDER_COLUMN").unwrap_or(self.order_id_column),
            product_column: env("UPSELL_PRODUCT_COLUMN").unwrap_or(self.product_column),
            upsell_column: env("UPSELL_FLAG_COLUMN").unwrap_or(self.upsell_column),
            upsell_marker: env("UPSELL_MARKER").unwrap_or(self.upsell_marker),
            summary_limit: env("UPSELL_SUMMARY_LIMIT").and_then(|v| v.parse().ok()).unwrap_or(self.summary_limit),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_columns() {
        let config = Config::default();
        assert_eq!(config.order_id_column, "№ заказа");
        assert_eq!(config.product_column, "Товары");
        assert_eq!(config.upsell_marker, "Допродажа");
        assert_eq!(config.summary_limit, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input_path = \"orders.csv\"\nsummary_limit = 3").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.input_path, PathBuf::from("orders.csv"));
        assert_eq!(config.summary_limit, 3);
        assert_eq!(config.product_column, "Товары");
    }

    #[test]
    fn test_invalid_toml_is_reported_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "summary_limit = \"many\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, InputError::ConfigParseFailed { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_toml_file(Path::new("definitely/missing.toml")).unwrap_err();
        assert!(matches!(err, InputError::NotFound { .. }));
    }
}
