// ==========================================
// 车辆维修报价引擎 - 规则解析器
// ==========================================
// 职责: key + 规则表 → 生效的系数/附加费
// 红线: 未知 key 一律解析为中性值（系数 1.0 / 区间 {0,0}）,只记日志,不报错
// ==========================================

use crate::config::rule_catalog::{CoefficientTable, SurchargeTable};
use crate::domain::types::{Amount, PriceRange};
use rust_decimal::Decimal;
use tracing::{debug, warn};

// ==========================================
// RuleTable - 系数表/附加费表的统一查询接口
// ==========================================
pub trait RuleTable {
    type Value: Copy;

    /// 中性值
    fn neutral() -> Self::Value;

    fn lookup(&self, key: &str) -> Option<Self::Value>;
}

impl RuleTable for CoefficientTable {
    type Value = Amount;

    fn neutral() -> Amount {
        Decimal::ONE
    }

    fn lookup(&self, key: &str) -> Option<Amount> {
        self.get(key)
    }
}

impl RuleTable for SurchargeTable {
    type Value = PriceRange;

    fn neutral() -> PriceRange {
        PriceRange::ZERO
    }

    fn lookup(&self, key: &str) -> Option<PriceRange> {
        self.get(key)
    }
}

/// 解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<T> {
    pub value: T,
    /// false = key 缺失或未知,value 为中性值
    pub known: bool,
}

// ==========================================
// RuleResolver - 无状态解析器
// ==========================================
pub struct RuleResolver;

impl RuleResolver {
    /// 解析 key
    ///
    /// - key 为 None: 中性值（调用方尚未选择）
    /// - key 不在表中: 中性值 + warn 日志（配置两侧可能不同步）
    pub fn resolve<T: RuleTable>(axis_id: &str, table: &T, key: Option<&str>) -> Resolution<T::Value> {
        let Some(key) = key else {
            debug!(target: "quote::resolver", axis = axis_id, "未选择,按中性值处理");
            return Resolution {
                value: T::neutral(),
                known: false,
            };
        };

        match table.lookup(key) {
            Some(value) => Resolution { value, known: true },
            None => {
                warn!(
                    target: "quote::resolver",
                    axis = axis_id,
                    key = key,
                    "未知规则 key,按中性值处理"
                );
                Resolution {
                    value: T::neutral(),
                    known: false,
                }
            }
        }
    }
}
