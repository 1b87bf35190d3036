// ==========================================
// 车辆维修报价引擎 - 核心库
// ==========================================
// 系统定位: 服务/套餐报价区间计算 + 可审计明细
// 调用方: 网站报价表单、后台 CRM（均不在本库范围内）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 服务目录与规则目录
pub mod config;

// 引擎层 - 报价计算
pub mod engine;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Amount, BreakdownStep, CatalogEntry, IncompleteQuote, IncompleteReason, MissingAxis,
    PriceRange, Quote, QuoteKind, QuoteOutcome, QuoteRequest, StepEffect,
};

// 配置
pub use config::{CatalogBundle, CatalogError, CatalogLoader, CatalogResult, RuleCatalog, ServiceCatalog};

// 引擎
pub use engine::{compute_quote, BreakdownFormatter, QuoteCalculator, QuoteEngine, RuleResolver};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车辆维修报价引擎";
