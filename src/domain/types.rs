// ==========================================
// 车辆维修报价引擎 - 领域类型定义
// ==========================================
// 红线: 金额一律使用 Decimal,禁止二进制浮点参与计算
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 金额（币种由调用方决定,引擎不做换算）
pub type Amount = Decimal;

// ==========================================
// 价格区间 (Price Range)
// ==========================================
// 用途: 基础价、附加费、固定费用统一使用同一结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Amount,
    pub max: Amount,
}

impl PriceRange {
    /// 中性区间 {0, 0}
    pub const ZERO: PriceRange = PriceRange {
        min: Decimal::ZERO,
        max: Decimal::ZERO,
    };

    pub fn new(min: impl Into<Amount>, max: impl Into<Amount>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// 两端同时乘以系数
    pub fn scale(&self, factor: Amount) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// 两端分别相加
    pub fn add(&self, other: &PriceRange) -> Self {
        Self {
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::ZERO
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}-${}", self.min.normalize(), self.max.normalize())
    }
}

// ==========================================
// 报价类型 (Quote Kind)
// ==========================================
// 单项服务与组合套餐共用同一条计算管线,
// 区别仅在于哪些系数轴适用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    Service, // 单项服务
    Package, // 组合套餐
}

impl QuoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteKind::Service => "service",
            QuoteKind::Package => "package",
        }
    }
}

impl Default for QuoteKind {
    fn default() -> Self {
        QuoteKind::Service
    }
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "service" | "services" => Ok(QuoteKind::Service),
            "package" | "packages" | "bundle" => Ok(QuoteKind::Package),
            other => Err(format!("未知报价类型: {}", other)),
        }
    }
}
