//! # Upsell Stats
//!
//! 根据订单明细统计追加销售（допродажа）的搭配情况
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 订单行、订单拆分、商品类别、类别组合
//! - `models::loaders` - 从 CSV 读取并按订单号分组
//!
//! ### ② 统计层（Services）
//! - `services/` - 四种统计方式，共用同一份数据，互不依赖
//!
//! ### ③ 输出层（Reporting）
//! - `reporting/` - 写 CSV、打印排行摘要
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 加载数据，依次执行选定的统计
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod reporting;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, InputError, OutputError, ValidationError};
pub use models::{Category, CategoryCombo, Dataset, Order, OrderLine};
pub use orchestrator::App;
pub use reporting::{Report, ReportWriter};
pub use services::{AnalysisMode, Analyzer};
