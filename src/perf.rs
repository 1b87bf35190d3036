use crate::config::config_keys;
use std::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

static PERF_ENABLED: OnceLock<bool> = OnceLock::new();

thread_local! {
    static QUOTE_COUNT: Cell<u64> = Cell::new(0);
    static INCOMPLETE_COUNT: Cell<u64> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 性能日志开关
///
/// - Debug 默认开启；Release 默认关闭
/// - `REPAIR_QUOTE_PERF=1` 强制开启 / `=0` 强制关闭
pub fn perf_enabled() -> bool {
    *PERF_ENABLED.get_or_init(|| match std::env::var(config_keys::PERF_ENV) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    })
}

/// 记录一次报价计算（由计算器调用）
pub fn record_quote(computed: bool) {
    QUOTE_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    if !computed {
        INCOMPLETE_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 当前线程累计报价次数
pub fn quote_count() -> u64 {
    QUOTE_COUNT.with(|c| c.get())
}

/// 性能统计 Guard：记录 elapsed_ms + 报价次数 + 未完成次数
///
/// 使用方式：
/// ```ignore
/// let _perf = repair_quote::perf::PerfGuard::new("compute_batch");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    quote_start: u64,
    incomplete_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            quote_start: QUOTE_COUNT.with(|c| c.get()),
            incomplete_start: INCOMPLETE_COUNT.with(|c| c.get()),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !perf_enabled() {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let quote_count = QUOTE_COUNT
            .with(|c| c.get())
            .saturating_sub(self.quote_start);
        let incomplete_count = INCOMPLETE_COUNT
            .with(|c| c.get())
            .saturating_sub(self.incomplete_start);

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            quote_count,
            incomplete_count,
            "done"
        );
    }
}
