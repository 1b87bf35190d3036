// ==========================================
// 车辆维修报价引擎 - 引擎层
// ==========================================
// 职责: 规则解析、报价计算、明细格式化
// 红线: 纯计算,无 I/O,无跨调用可变状态
// 红线: 每一步都必须进入明细轨迹
// ==========================================

pub mod calculator;
pub mod formatter;
pub mod quote_engine;
pub mod resolver;

// 重导出核心引擎
pub use calculator::{compute_quote, QuoteCalculator};
pub use formatter::BreakdownFormatter;
pub use quote_engine::QuoteEngine;
pub use resolver::{Resolution, RuleResolver, RuleTable};
