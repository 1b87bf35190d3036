// ==========================================
// 车辆维修报价引擎 - 规则目录
// ==========================================
// 职责: 系数表（乘法）与附加费表（加法）,纯数据
// 红线: 未知 key 解析为中性值由 RuleResolver 负责,此处只存储
// ==========================================

use crate::config::error::{CatalogError, CatalogResult};
use crate::config::validate::{
    ensure_non_empty_keys, ensure_unique_ids, validate_coefficient, validate_quote_bound,
    validate_range, MAX_AMOUNT, MAX_COEFFICIENT_AXES,
};
use crate::domain::types::{Amount, PriceRange, QuoteKind};
use serde::de::{self, MapAccess, Visitor};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

// ==========================================
// 规则表反序列化: 同一张表内 key 重复即报错
// ==========================================
// serde 默认对 JSON 重复 key 后者覆盖前者,配置错误会被静默吞掉
fn deserialize_unique_keys<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a rule table with unique keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut table = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                if table.contains_key(&key) {
                    return Err(de::Error::custom(format!("规则表中 key 重复: {}", key)));
                }
                table.insert(key, value);
            }
            Ok(table)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

// ==========================================
// CoefficientTable - key -> 乘法系数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoefficientTable(BTreeMap<String, Amount>);

impl<'de> Deserialize<'de> for CoefficientTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_unique_keys(deserializer).map(Self)
    }
}

impl CoefficientTable {
    pub fn get(&self, key: &str) -> Option<Amount> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Amount)> for CoefficientTable {
    fn from_iter<I: IntoIterator<Item = (K, Amount)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ==========================================
// SurchargeTable - key -> 附加费区间
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SurchargeTable(BTreeMap<String, PriceRange>);

impl<'de> Deserialize<'de> for SurchargeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_unique_keys(deserializer).map(Self)
    }
}

impl SurchargeTable {
    pub fn get(&self, key: &str) -> Option<PriceRange> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PriceRange)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, PriceRange)> for SurchargeTable {
    fn from_iter<I: IntoIterator<Item = (K, PriceRange)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ==========================================
// CoefficientAxis - 单选系数轴
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientAxis {
    /// 轴 ID,如 "vehicle"
    pub id: String,

    /// 展示标签,如 "Vehicle"
    pub label: String,

    /// 必选轴未选择时报价为"未完成"
    #[serde(default = "default_required")]
    pub required: bool,

    /// 适用的报价类型（为空表示全部适用）
    #[serde(default)]
    pub applies_to: Vec<QuoteKind>,

    pub table: CoefficientTable,
}

fn default_required() -> bool {
    true
}

impl CoefficientAxis {
    pub fn is_applicable(&self, kind: QuoteKind) -> bool {
        self.applies_to.is_empty() || self.applies_to.contains(&kind)
    }
}

// ==========================================
// SurchargeAxis - 多选附加费轴
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeAxis {
    pub id: String,
    pub label: String,
    pub table: SurchargeTable,
}

// ==========================================
// FlatFee - 可选固定费用（如上门服务费）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFee {
    pub id: String,
    pub label: String,
    pub range: PriceRange,
}

// ==========================================
// RuleCatalog - 校验后的不可变规则目录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCatalog {
    coefficient_axes: Vec<CoefficientAxis>,
    surcharge_axes: Vec<SurchargeAxis>,
    flat_fees: Vec<FlatFee>,
}

impl RuleCatalog {
    /// 构造并校验
    ///
    /// 系数轴的声明顺序即乘法阶段的应用顺序
    pub fn new(
        coefficient_axes: Vec<CoefficientAxis>,
        surcharge_axes: Vec<SurchargeAxis>,
        flat_fees: Vec<FlatFee>,
    ) -> CatalogResult<Self> {
        if coefficient_axes.len() > MAX_COEFFICIENT_AXES {
            return Err(CatalogError::TooManyAxes {
                count: coefficient_axes.len(),
                limit: MAX_COEFFICIENT_AXES,
            });
        }
        ensure_unique_ids(
            "coefficient_axes",
            coefficient_axes.iter().map(|a| a.id.as_str()),
        )?;
        for axis in &coefficient_axes {
            if axis.table.is_empty() {
                return Err(CatalogError::EmptyTable {
                    section: "coefficient_axes".to_string(),
                    id: axis.id.clone(),
                });
            }
            ensure_non_empty_keys(&axis.id, axis.table.keys())?;
            for (key, factor) in axis.table.iter() {
                validate_coefficient(&axis.id, key, factor)?;
            }
        }

        ensure_unique_ids(
            "surcharge_axes",
            surcharge_axes.iter().map(|a| a.id.as_str()),
        )?;
        for axis in &surcharge_axes {
            if axis.table.is_empty() {
                return Err(CatalogError::EmptyTable {
                    section: "surcharge_axes".to_string(),
                    id: axis.id.clone(),
                });
            }
            ensure_non_empty_keys(&axis.id, axis.table.keys())?;
            for (key, range) in axis.table.iter() {
                validate_range(&axis.id, key, &range)?;
            }
        }

        ensure_unique_ids("flat_fees", flat_fees.iter().map(|f| f.id.as_str()))?;
        for fee in &flat_fees {
            validate_range("flat_fees", &fee.id, &fee.range)?;
        }

        validate_quote_bound(Self::worst_case_total(
            &coefficient_axes,
            &surcharge_axes,
            &flat_fees,
        ))?;

        Ok(Self {
            coefficient_axes,
            surcharge_axes,
            flat_fees,
        })
    }

    /// 任一合法条目在本目录下可能得到的最高报价
    ///
    /// 基础价取 MAX_AMOUNT,每轴取最大系数（不足 1 按 1 计）,
    /// 所有附加费与固定费用全选。溢出时返回 None。
    fn worst_case_total(
        coefficient_axes: &[CoefficientAxis],
        surcharge_axes: &[SurchargeAxis],
        flat_fees: &[FlatFee],
    ) -> Option<Amount> {
        let mut total = MAX_AMOUNT;
        for axis in coefficient_axes {
            let factor = axis
                .table
                .iter()
                .map(|(_, factor)| factor)
                .fold(Decimal::ONE, Decimal::max);
            total = total.checked_mul(factor)?;
        }
        for axis in surcharge_axes {
            for (_, range) in axis.table.iter() {
                total = total.checked_add(range.max)?;
            }
        }
        for fee in flat_fees {
            total = total.checked_add(fee.range.max)?;
        }
        Some(total)
    }

    pub fn coefficient_axes(&self) -> &[CoefficientAxis] {
        &self.coefficient_axes
    }

    pub fn surcharge_axes(&self) -> &[SurchargeAxis] {
        &self.surcharge_axes
    }

    pub fn flat_fees(&self) -> &[FlatFee] {
        &self.flat_fees
    }

    pub fn coefficient_axis(&self, axis_id: &str) -> Option<&CoefficientAxis> {
        self.coefficient_axes.iter().find(|a| a.id == axis_id)
    }

    pub fn surcharge_axis(&self, axis_id: &str) -> Option<&SurchargeAxis> {
        self.surcharge_axes.iter().find(|a| a.id == axis_id)
    }

    pub fn flat_fee(&self, fee_id: &str) -> Option<&FlatFee> {
        self.flat_fees.iter().find(|f| f.id == fee_id)
    }

    /// 对某报价类型适用的系数轴（保持声明顺序）
    pub fn axes_for(&self, kind: QuoteKind) -> impl Iterator<Item = &CoefficientAxis> {
        self.coefficient_axes
            .iter()
            .filter(move |axis| axis.is_applicable(kind))
    }
}
