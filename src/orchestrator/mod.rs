//! 编排层（Orchestration Layer）
//!
//! ```text
//! cli (解析参数、校验)
//!     ↓
//! orchestrator::App (加载一次数据，依次执行统计)
//!     ↓
//! services (四种统计方式)
//!     ↓
//! reporting (CSV 文件 + 控制台摘要)
//! ```

pub mod app;

pub use app::App;
