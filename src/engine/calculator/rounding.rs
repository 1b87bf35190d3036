use crate::config::validate::MAX_QUOTE_TOTAL;
use crate::domain::types::Amount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 四舍五入到整数货币单位（half-up）
///
/// 输入恒为非负,MidpointAwayFromZero 即 half-up。
/// 整个管线只在末尾调用一次。
/// 目录加载期已保证结果 ≤ MAX_QUOTE_TOTAL,clamp 后必可转为 i64。
pub(super) fn round_half_up(value: Amount) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, MAX_QUOTE_TOTAL)
        .to_i64()
        .unwrap_or_default()
}
