use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文件或配置错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Validation(#[from] ValidationError),
    /// 输出文件错误
    #[error("输出错误: {0}")]
    Output(#[from] OutputError),
}

/// 输入错误（订单文件、配置文件）
#[derive(Debug, Error)]
pub enum InputError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取或解析失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 缺少必需的列
    #[error("文件 {} 缺少必需的列 '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
    /// 配置文件无法读取
    #[error("无法读取配置文件 ({}): {source}", path.display())]
    ConfigReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件格式错误
    #[error("无法解析配置文件 ({}): {source}", path.display())]
    ConfigParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 参数校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("最小组合大小必须不小于 2 (收到: {min})")]
    ComboMinTooSmall { min: usize },
    #[error("最大组合大小 {max} 不能小于最小组合大小 {min}")]
    ComboMaxBelowMin { min: usize, max: usize },
    #[error("每个类别的商品数量必须大于 0 (收到: {top_n})")]
    TopNTooSmall { top_n: usize },
}

/// 输出错误
#[derive(Debug, Error)]
pub enum OutputError {
    /// 无法创建输出目录
    #[error("无法创建输出目录 ({}): {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 控制台输出失败
    #[error("写入统计摘要失败: {0}")]
    Summary(#[source] std::io::Error),
}

// ========== 便捷构造函数 ==========

impl OutputError {
    pub fn write_failed(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        OutputError::WriteFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
