use super::guard::{log_ignored_selections, missing_required_axes};
use super::rounding::round_half_up;
use crate::config::rule_catalog::RuleCatalog;
use crate::domain::catalog::CatalogEntry;
use crate::domain::quote::{
    BreakdownStep, IncompleteQuote, IncompleteReason, Quote, QuoteOutcome, QuoteRequest,
    StepEffect,
};
use crate::domain::types::PriceRange;
use crate::engine::resolver::RuleResolver;
use crate::perf;
use tracing::{debug, instrument, warn};

/// 固定费用步骤的轴 ID
pub const FLAT_FEE_AXIS: &str = "flat_fee";

// ==========================================
// QuoteCalculator - 报价计算器
// ==========================================
pub struct QuoteCalculator {
    // 无状态引擎,不需要注入依赖
}

impl QuoteCalculator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算一次报价
    ///
    /// 顺序:
    /// 1) 未选择条目 → Incomplete(MissingEntry)
    /// 2) 必选系数轴缺失 → Incomplete(MissingSelections),provisional 时附带预估
    /// 3) 其他 → Computed
    #[instrument(
        skip(self, entry, request, rules),
        fields(entry_id = entry.map(|e| e.id.as_str()).unwrap_or("-"))
    )]
    pub fn compute(
        &self,
        entry: Option<&CatalogEntry>,
        request: &QuoteRequest,
        rules: &RuleCatalog,
    ) -> QuoteOutcome {
        let Some(entry) = entry else {
            perf::record_quote(false);
            return QuoteOutcome::Incomplete(IncompleteQuote {
                reason: IncompleteReason::MissingEntry,
                missing_axes: Vec::new(),
                provisional: None,
            });
        };

        if let Some(requested) = request.entry_id.as_deref() {
            if requested != entry.id {
                debug!(
                    requested,
                    actual = %entry.id,
                    "请求中的 entry_id 与传入条目不一致,以传入条目为准"
                );
            }
        }

        let missing = missing_required_axes(entry, request, rules);
        if !missing.is_empty() {
            debug!(missing = missing.len(), "必选系数轴未选择,报价未完成");
            perf::record_quote(false);
            let provisional = request
                .provisional
                .then(|| self.run_pipeline(entry, request, rules));
            return QuoteOutcome::Incomplete(IncompleteQuote {
                reason: IncompleteReason::MissingSelections,
                missing_axes: missing,
                provisional,
            });
        }

        perf::record_quote(true);
        QuoteOutcome::Computed(self.run_pipeline(entry, request, rules))
    }

    /// 完整管线（不做完整性判断,缺失轴按中性值跳过）
    fn run_pipeline(
        &self,
        entry: &CatalogEntry,
        request: &QuoteRequest,
        rules: &RuleCatalog,
    ) -> Quote {
        log_ignored_selections(entry, request, rules);

        let mut running = entry.base_price;
        let mut breakdown = Vec::new();

        // ===== 1. 乘法阶段: 按声明顺序逐轴相乘 =====
        for axis in rules.axes_for(entry.kind) {
            let Some(key) = request
                .axis_key(&axis.id)
                .filter(|key| !key.trim().is_empty())
            else {
                continue;
            };
            let res = RuleResolver::resolve(&axis.id, &axis.table, Some(key));
            running = running.scale(res.value);
            breakdown.push(BreakdownStep {
                axis_id: axis.id.clone(),
                label: axis.label.clone(),
                key: key.to_string(),
                effect: StepEffect::Multiplier { factor: res.value },
                resolved: res.known,
            });
        }

        // ===== 2. 加法阶段: 全部附加费先求和,再一次性相加 =====
        let mut surcharge_total = PriceRange::ZERO;
        for axis in rules.surcharge_axes() {
            let Some(keys) = request.surcharges.get(&axis.id) else {
                continue;
            };
            for key in keys {
                let res = RuleResolver::resolve(&axis.id, &axis.table, Some(key.as_str()));
                surcharge_total = surcharge_total.add(&res.value);
                breakdown.push(BreakdownStep {
                    axis_id: axis.id.clone(),
                    label: axis.label.clone(),
                    key: key.clone(),
                    effect: StepEffect::Surcharge { range: res.value },
                    resolved: res.known,
                });
            }
        }
        for axis_id in request.surcharges.keys() {
            if rules.surcharge_axis(axis_id).is_none() {
                warn!(
                    target: "quote::resolver",
                    axis = %axis_id,
                    "未知附加费轴,按中性值处理"
                );
            }
        }
        running = running.add(&surcharge_total);

        // ===== 3. 固定费用阶段 =====
        let mut fee_total = PriceRange::ZERO;
        for fee in rules.flat_fees() {
            if !request.flat_fees.contains(&fee.id) {
                continue;
            }
            fee_total = fee_total.add(&fee.range);
            breakdown.push(BreakdownStep {
                axis_id: FLAT_FEE_AXIS.to_string(),
                label: fee.label.clone(),
                key: fee.id.clone(),
                effect: StepEffect::FlatFee { range: fee.range },
                resolved: true,
            });
        }
        for fee_id in &request.flat_fees {
            if rules.flat_fee(fee_id).is_none() {
                warn!(
                    target: "quote::resolver",
                    fee = %fee_id,
                    "未知固定费用,按中性值处理"
                );
                breakdown.push(BreakdownStep {
                    axis_id: FLAT_FEE_AXIS.to_string(),
                    label: fee_id.clone(),
                    key: fee_id.clone(),
                    effect: StepEffect::FlatFee {
                        range: PriceRange::ZERO,
                    },
                    resolved: false,
                });
            }
        }
        running = running.add(&fee_total);

        // ===== 4. 取整: 只在末尾做一次 =====
        Quote {
            entry_id: entry.id.clone(),
            base: entry.base_price,
            min: round_half_up(running.min),
            max: round_half_up(running.max),
            breakdown,
            unrounded: running,
        }
    }
}

impl Default for QuoteCalculator {
    fn default() -> Self {
        Self::new()
    }
}
