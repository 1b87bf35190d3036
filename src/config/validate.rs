// ==========================================
// 车辆维修报价引擎 - 目录校验
// ==========================================
// 职责: 加载期一次性校验,校验通过的目录在请求期无需再检查
// ==========================================

use crate::config::error::{CatalogError, CatalogResult};
use crate::domain::types::{Amount, PriceRange};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// 单个金额上限（防止乘法结果溢出 i64）
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// 单个系数上限
pub const MAX_COEFFICIENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// 系数轴数量上限
pub const MAX_COEFFICIENT_AXES: usize = 8;

/// 整条管线结果的上限,取整后必然落在 i64 内
pub const MAX_QUOTE_TOTAL: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// 校验价格区间: 非负、有上限、min ≤ max
pub fn validate_range(section: &str, id: &str, range: &PriceRange) -> CatalogResult<()> {
    for value in [range.min, range.max] {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CatalogError::NegativeAmount {
                section: section.to_string(),
                id: id.to_string(),
                value,
            });
        }
        if value > MAX_AMOUNT {
            return Err(CatalogError::AmountTooLarge {
                section: section.to_string(),
                id: id.to_string(),
                value,
                limit: MAX_AMOUNT,
            });
        }
    }

    if range.min > range.max {
        return Err(CatalogError::InvertedRange {
            section: section.to_string(),
            id: id.to_string(),
            min: range.min,
            max: range.max,
        });
    }

    Ok(())
}

/// 校验乘法系数: 0 < value ≤ MAX_COEFFICIENT
pub fn validate_coefficient(axis: &str, key: &str, value: Amount) -> CatalogResult<()> {
    if value <= Decimal::ZERO {
        return Err(CatalogError::NonPositiveCoefficient {
            axis: axis.to_string(),
            key: key.to_string(),
            value,
        });
    }
    if value > MAX_COEFFICIENT {
        return Err(CatalogError::CoefficientTooLarge {
            axis: axis.to_string(),
            key: key.to_string(),
            value,
            limit: MAX_COEFFICIENT,
        });
    }
    Ok(())
}

/// 校验规则组合后的最高报价（None 表示计算溢出）
pub fn validate_quote_bound(worst_case: Option<Amount>) -> CatalogResult<()> {
    match worst_case {
        Some(bound) if bound <= MAX_QUOTE_TOTAL => Ok(()),
        Some(bound) => Err(CatalogError::QuoteBoundTooLarge {
            bound: bound.normalize().to_string(),
            limit: MAX_QUOTE_TOTAL,
        }),
        None => Err(CatalogError::QuoteBoundTooLarge {
            bound: "overflow".to_string(),
            limit: MAX_QUOTE_TOTAL,
        }),
    }
}

/// 校验规则表 key 非空（表内唯一性由反序列化保证）
pub fn ensure_non_empty_keys<'a>(
    section: &str,
    keys: impl IntoIterator<Item = &'a str>,
) -> CatalogResult<()> {
    if keys.into_iter().any(|key| key.trim().is_empty()) {
        return Err(CatalogError::EmptyId {
            section: section.to_string(),
        });
    }
    Ok(())
}

/// 校验 ID 非空且唯一
pub fn ensure_unique_ids<'a>(
    section: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId {
                section: section.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                section: section.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
