use crate::config::rule_catalog::RuleCatalog;
use crate::domain::catalog::CatalogEntry;
use crate::domain::quote::{MissingAxis, QuoteRequest};
use tracing::debug;

/// 必选且适用、但请求中未选择的系数轴（保持声明顺序）
pub(super) fn missing_required_axes(
    entry: &CatalogEntry,
    request: &QuoteRequest,
    rules: &RuleCatalog,
) -> Vec<MissingAxis> {
    rules
        .axes_for(entry.kind)
        .filter(|axis| axis.required)
        .filter(|axis| {
            request
                .axis_key(&axis.id)
                .map(|key| key.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|axis| MissingAxis {
            axis_id: axis.id.clone(),
            label: axis.label.clone(),
        })
        .collect()
}

/// 记录请求中被忽略的选择（轴不存在或不适用于该条目类型）
pub(super) fn log_ignored_selections(
    entry: &CatalogEntry,
    request: &QuoteRequest,
    rules: &RuleCatalog,
) {
    for axis_id in request.coefficients.keys() {
        match rules.coefficient_axis(axis_id) {
            None => debug!(
                target: "quote::calculator",
                axis = %axis_id,
                "未知系数轴,已忽略"
            ),
            Some(axis) if !axis.is_applicable(entry.kind) => debug!(
                target: "quote::calculator",
                axis = %axis_id,
                kind = %entry.kind,
                "系数轴不适用于该报价类型,已忽略"
            ),
            Some(_) => {}
        }
    }
}
