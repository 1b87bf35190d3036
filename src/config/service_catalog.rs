// ==========================================
// 车辆维修报价引擎 - 服务目录
// ==========================================
// 职责: 可报价条目（服务/套餐）的只读索引
// ==========================================

use crate::config::error::CatalogResult;
use crate::config::validate::{ensure_unique_ids, validate_range};
use crate::domain::catalog::CatalogEntry;
use crate::domain::types::QuoteKind;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// 构造并校验（ID 唯一、基础价区间合法）
    pub fn new(entries: Vec<CatalogEntry>) -> CatalogResult<Self> {
        ensure_unique_ids("services", entries.iter().map(|e| e.id.as_str()))?;
        for entry in &entries {
            validate_range("services", &entry.id, &entry.base_price)?;
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.id.clone(), i))
            .collect();

        Ok(Self { entries, index })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// 全部条目（保持声明顺序）
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn by_kind(&self, kind: QuoteKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.category.eq_ignore_ascii_case(category))
    }

    /// 去重后的分类列表（保持首次出现顺序）
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.category.as_str()) {
                out.push(entry.category.as_str());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
