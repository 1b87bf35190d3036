// ==========================================
// 车辆维修报价引擎 - 报价请求与结果模型
// ==========================================
// 红线: 报价结果只有两种形态: 已计算 / 未完成
// 红线: 明细按实际应用顺序记录,可审计
// ==========================================

use crate::domain::types::{Amount, PriceRange};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// QuoteRequest - 调用方组装的报价请求
// ==========================================
// 单选系数轴: axis_id -> key（每轴至多一个）
// 多选附加费轴: axis_id -> {key...}（集合,选择顺序无关）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// 目录条目 ID（未选择时为 None）
    #[serde(default)]
    pub entry_id: Option<String>,

    /// 单选系数轴选择
    #[serde(default)]
    pub coefficients: BTreeMap<String, String>,

    /// 多选附加费轴选择
    #[serde(default)]
    pub surcharges: BTreeMap<String, BTreeSet<String>>,

    /// 固定附加费用（如上门服务费）
    #[serde(default)]
    pub flat_fees: BTreeSet<String>,

    /// 调用方显式声明"尚未就绪",需要中性默认值下的预估数
    #[serde(default)]
    pub provisional: bool,
}

impl QuoteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_entry(entry_id: &str) -> Self {
        Self {
            entry_id: Some(entry_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_axis(mut self, axis_id: &str, key: &str) -> Self {
        self.coefficients
            .insert(axis_id.to_string(), key.to_string());
        self
    }

    pub fn with_surcharge(mut self, axis_id: &str, key: &str) -> Self {
        self.surcharges
            .entry(axis_id.to_string())
            .or_default()
            .insert(key.to_string());
        self
    }

    pub fn with_fee(mut self, fee_id: &str) -> Self {
        self.flat_fees.insert(fee_id.to_string());
        self
    }

    pub fn provisional(mut self) -> Self {
        self.provisional = true;
        self
    }

    /// 某单选轴的已选 key
    pub fn axis_key(&self, axis_id: &str) -> Option<&str> {
        self.coefficients.get(axis_id).map(|s| s.as_str())
    }
}

// ==========================================
// StepEffect - 单步效果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEffect {
    Multiplier { factor: Amount },
    Surcharge { range: PriceRange },
    FlatFee { range: PriceRange },
}

// ==========================================
// BreakdownStep - 明细轨迹中的一步
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub axis_id: String, // 轴 ID（固定费用为 fee ID）
    pub label: String,   // 展示标签,如 "Vehicle"
    pub key: String,     // 所选 key
    pub effect: StepEffect,
    pub resolved: bool, // false = 未知 key,已按中性值处理
}

// ==========================================
// Quote - 已计算报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub entry_id: String,
    pub base: PriceRange,
    pub min: i64,
    pub max: i64,
    pub breakdown: Vec<BreakdownStep>,

    /// 取整前的全精度区间
    pub unrounded: PriceRange,
}

impl Quote {
    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// 审计用 JSON（所有步骤必须输出原因）
    pub fn audit_json(&self) -> serde_json::Value {
        json!({
            "entry_id": self.entry_id,
            "base": {
                "min": self.base.min.normalize().to_string(),
                "max": self.base.max.normalize().to_string(),
            },
            "steps": self.breakdown,
            "unrounded": {
                "min": self.unrounded.min.normalize().to_string(),
                "max": self.unrounded.max.normalize().to_string(),
            },
            "min": self.min,
            "max": self.max,
        })
    }
}

// ==========================================
// 未完成报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncompleteReason {
    MissingEntry,                      // 未选择目录条目
    UnknownEntry { entry_id: String }, // 条目 ID 不在目录中
    MissingSelections,                 // 必选系数轴未选择
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAxis {
    pub axis_id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteQuote {
    pub reason: IncompleteReason,
    pub missing_axes: Vec<MissingAxis>,

    /// 仅当请求 provisional=true 时给出（缺失轴按中性值计算）
    pub provisional: Option<Quote>,
}

// ==========================================
// QuoteOutcome - 引擎对外唯一返回形态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum QuoteOutcome {
    Computed(Quote),
    Incomplete(IncompleteQuote),
}

impl QuoteOutcome {
    pub fn is_computed(&self) -> bool {
        matches!(self, QuoteOutcome::Computed(_))
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteOutcome::Computed(quote) => Some(quote),
            QuoteOutcome::Incomplete(_) => None,
        }
    }

    pub fn incomplete(&self) -> Option<&IncompleteQuote> {
        match self {
            QuoteOutcome::Computed(_) => None,
            QuoteOutcome::Incomplete(incomplete) => Some(incomplete),
        }
    }

    pub fn range(&self) -> Option<(i64, i64)> {
        self.quote().map(Quote::range)
    }
}
