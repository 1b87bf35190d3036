// ==========================================
// 车辆维修报价引擎 - 领域层
// ==========================================
// 职责: 实体与值类型,无行为依赖
// ==========================================

pub mod catalog;
pub mod quote;
pub mod types;

// 重导出核心类型
pub use catalog::CatalogEntry;
pub use quote::{
    BreakdownStep, IncompleteQuote, IncompleteReason, MissingAxis, Quote, QuoteOutcome,
    QuoteRequest, StepEffect,
};
pub use types::{Amount, PriceRange, QuoteKind};
