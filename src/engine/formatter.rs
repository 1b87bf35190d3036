// ==========================================
// 车辆维修报价引擎 - 明细格式化
// ==========================================
// 红线: 只做字符串化,不做任何数值计算
// 红线: 保持计算器给出的步骤顺序
// ==========================================

use crate::domain::quote::{
    BreakdownStep, IncompleteQuote, IncompleteReason, Quote, QuoteOutcome, StepEffect,
};
use crate::domain::types::Amount;

const SEPARATOR: &str = " | ";

pub struct BreakdownFormatter;

impl BreakdownFormatter {
    /// "Base: $60-$120 | Vehicle (suv): ×1.10 | ..."
    pub fn format(quote: &Quote) -> String {
        let mut segments = Vec::with_capacity(quote.breakdown.len() + 1);
        segments.push(format!("Base: {}", quote.base));
        segments.extend(quote.breakdown.iter().map(Self::format_step));
        segments.join(SEPARATOR)
    }

    /// 在明细末尾追加 "Total: $min-$max"
    pub fn format_with_total(quote: &Quote) -> String {
        format!(
            "{}{}Total: ${}-${}",
            Self::format(quote),
            SEPARATOR,
            quote.min,
            quote.max
        )
    }

    pub fn format_step(step: &BreakdownStep) -> String {
        let mut text = match &step.effect {
            StepEffect::Multiplier { factor } => {
                format!("{} ({}): ×{}", step.label, step.key, Self::format_factor(*factor))
            }
            StepEffect::Surcharge { range } => format!("{} ({}): +{}", step.label, step.key, range),
            StepEffect::FlatFee { range } => format!("{}: +{}", step.label, range),
        };
        if !step.resolved {
            text.push_str(" [unknown]");
        }
        text
    }

    pub fn format_incomplete(incomplete: &IncompleteQuote) -> String {
        let mut text = match &incomplete.reason {
            IncompleteReason::MissingEntry => "Incomplete: no service selected".to_string(),
            IncompleteReason::UnknownEntry { entry_id } => {
                format!("Incomplete: unknown service '{}'", entry_id)
            }
            IncompleteReason::MissingSelections => {
                let labels: Vec<&str> = incomplete
                    .missing_axes
                    .iter()
                    .map(|m| m.label.as_str())
                    .collect();
                format!("Incomplete: missing {}", labels.join(", "))
            }
        };
        if let Some(provisional) = &incomplete.provisional {
            text.push_str(&format!(
                "{}Provisional: ${}-${}",
                SEPARATOR, provisional.min, provisional.max
            ));
        }
        text
    }

    pub fn format_outcome(outcome: &QuoteOutcome) -> String {
        match outcome {
            QuoteOutcome::Computed(quote) => Self::format_with_total(quote),
            QuoteOutcome::Incomplete(incomplete) => Self::format_incomplete(incomplete),
        }
    }

    /// 系数按实际精度输出,至少两位小数: 1.1 → "1.10", 1.125 → "1.125"
    fn format_factor(factor: Amount) -> String {
        let mut shown = factor.normalize();
        if shown.scale() < 2 {
            shown.rescale(2);
        }
        shown.to_string()
    }
}
