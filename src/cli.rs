//! 命令行参数

use crate::config::Config;
use crate::error::ValidationError;
use crate::services::combo_analysis::DEFAULT_MIN_COMBO_SIZE;
use crate::services::top_upsells::DEFAULT_TOP_N;
use crate::services::{AnalysisMode, ComboAnalyzer, TopUpsellsAnalyzer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 订单追加销售统计
#[derive(Parser, Debug)]
#[command(name = "upsell-stats")]
#[command(version)]
#[command(about = "Upsell attach-rate statistics from an order-line CSV", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Order-line CSV file (default: products.csv)
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Directory for the result CSV files (default: current directory)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upsell count per main product
    Products,
    /// Main category × upsell category cross-tab
    Categories,
    /// Upsells per combination of main categories
    Combos {
        /// Smallest combination size (at least 2)
        #[arg(default_value_t = DEFAULT_MIN_COMBO_SIZE)]
        min_size: usize,
        /// Largest combination size (default: unbounded)
        max_size: Option<usize>,
    },
    /// Top upsold products within each category
    Top {
        /// Products per category (at least 1)
        #[arg(default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
    /// Run every analysis with default parameters
    All,
}

impl Command {
    /// 校验参数范围，必须在读取输入文件之前调用
    pub fn into_mode(self) -> Result<AnalysisMode, ValidationError> {
        Ok(match self {
            Command::Products => AnalysisMode::Products,
            Command::Categories => AnalysisMode::Categories,
            Command::Combos { min_size, max_size } => {
                AnalysisMode::Combos(ComboAnalyzer::new(min_size, max_size)?)
            }
            Command::Top { top_n } => AnalysisMode::Top(TopUpsellsAnalyzer::new(top_n)?),
            Command::All => AnalysisMode::All,
        })
    }
}

impl Cli {
    /// 命令行参数覆盖配置
    pub fn apply(&self, config: Config) -> Config {
        Config {
            input_path: self.input.clone().unwrap_or(config.input_path),
            output_dir: self.output_dir.clone().unwrap_or(config.output_dir),
            verbose_logging: self.verbose || config.verbose_logging,
            ..config
        }
    }
}
