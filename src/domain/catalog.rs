// ==========================================
// 车辆维修报价引擎 - 服务目录条目
// ==========================================
// 用途: 配置层写入,引擎层只读
// 红线: base_price 加载后不可变更
// ==========================================

use crate::domain::types::{PriceRange, QuoteKind};
use serde::{Deserialize, Serialize};

// ==========================================
// CatalogEntry - 可报价条目（服务或套餐）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    // ===== 主键 =====
    pub id: String, // 稳定唯一键,如 "oil-change"

    // ===== 展示信息 =====
    pub title: String,    // 显示名称
    pub category: String, // 分组标签（仅用于展示/筛选,不参与计算）

    // ===== 计算维度 =====
    #[serde(default)]
    pub kind: QuoteKind, // 决定适用的系数轴
    pub base_price: PriceRange, // 未调整的人工费区间
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        kind: QuoteKind,
        base_price: PriceRange,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            kind,
            base_price,
        }
    }
}
