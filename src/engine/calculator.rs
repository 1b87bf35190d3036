// ==========================================
// 车辆维修报价引擎 - 报价计算器
// ==========================================
// 红线: 阶段顺序固定: 乘法 → 附加费 → 固定费用 → 取整
// 红线: 中间值保持全精度,只在末尾取整一次
// 红线: 必选项缺失时返回"未完成",不给出看似确定的数字
// ==========================================
// 职责: 服务报价与套餐报价共用的单一管线
// 输入: 目录条目 + 报价请求 + 规则目录
// 输出: QuoteOutcome (Computed / Incomplete)
// ==========================================

mod core;
mod guard;
mod rounding;


pub use self::core::{QuoteCalculator, FLAT_FEE_AXIS};

use crate::config::rule_catalog::RuleCatalog;
use crate::domain::catalog::CatalogEntry;
use crate::domain::quote::{QuoteOutcome, QuoteRequest};

/// 纯函数入口
pub fn compute_quote(
    entry: Option<&CatalogEntry>,
    request: &QuoteRequest,
    rules: &RuleCatalog,
) -> QuoteOutcome {
    QuoteCalculator::new().compute(entry, request, rules)
}
