// ==========================================
// 车辆维修报价引擎 - 引擎门面
// ==========================================
// 职责: 持有校验后的目录,按 entry_id 查找条目并调用计算器
// 并发: 目录只读,引擎可放在 Arc 中跨线程共享
// ==========================================

use crate::config::error::CatalogResult;
use crate::config::loader::{CatalogBundle, CatalogLoader};
use crate::config::rule_catalog::RuleCatalog;
use crate::config::service_catalog::ServiceCatalog;
use crate::domain::quote::{IncompleteQuote, IncompleteReason, QuoteOutcome, QuoteRequest};
use crate::engine::calculator::QuoteCalculator;
use crate::engine::formatter::BreakdownFormatter;
use crate::perf::PerfGuard;
use tracing::{info, instrument, warn};

pub struct QuoteEngine {
    services: ServiceCatalog,
    rules: RuleCatalog,
    calculator: QuoteCalculator,
}

impl QuoteEngine {
    pub fn new(services: ServiceCatalog, rules: RuleCatalog) -> Self {
        Self {
            services,
            rules,
            calculator: QuoteCalculator::new(),
        }
    }

    pub fn from_bundle(bundle: CatalogBundle) -> Self {
        info!(
            source = %bundle.source,
            services = bundle.services.len(),
            "报价引擎初始化"
        );
        Self::new(bundle.services, bundle.rules)
    }

    /// 使用内置默认目录
    pub fn with_embedded_catalog() -> CatalogResult<Self> {
        Ok(Self::from_bundle(CatalogLoader::embedded()?))
    }

    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按 request.entry_id 查找条目后计算
    ///
    /// - entry_id 为空 → Incomplete(MissingEntry)
    /// - entry_id 不在目录中 → Incomplete(UnknownEntry)
    #[instrument(skip(self, request), fields(entry_id = request.entry_id.as_deref().unwrap_or("-")))]
    pub fn quote(&self, request: &QuoteRequest) -> QuoteOutcome {
        let entry_id = request
            .entry_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match entry_id {
            None => self.calculator.compute(None, request, &self.rules),
            Some(id) => match self.services.get(id) {
                Some(entry) => self.calculator.compute(Some(entry), request, &self.rules),
                None => {
                    warn!(entry_id = id, "目录中不存在该条目");
                    crate::perf::record_quote(false);
                    QuoteOutcome::Incomplete(IncompleteQuote {
                        reason: IncompleteReason::UnknownEntry {
                            entry_id: id.to_string(),
                        },
                        missing_axes: Vec::new(),
                        provisional: None,
                    })
                }
            },
        }
    }

    /// 批量报价（推荐用于列表页/比价）
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub fn compute_batch(&self, requests: &[QuoteRequest]) -> Vec<QuoteOutcome> {
        let _perf = PerfGuard::new("compute_batch");
        requests.iter().map(|request| self.quote(request)).collect()
    }

    /// 报价 + 审计字符串
    pub fn quote_with_summary(&self, request: &QuoteRequest) -> (QuoteOutcome, String) {
        let outcome = self.quote(request);
        let summary = BreakdownFormatter::format_outcome(&outcome);
        (outcome, summary)
    }
}
