// ==========================================
// 车辆维修报价引擎 - 命令行入口
// ==========================================
// 职责: 运维/客服查询报价的薄适配层,核心逻辑全部在库中
// 退出码: 0 已计算 / 2 未完成 / 1 配置错误
// ==========================================

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use repair_quote::config::CatalogLoader;
use repair_quote::{logging, BreakdownFormatter, QuoteEngine, QuoteKind, QuoteOutcome, QuoteRequest};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "repair-quote", version, about = "车辆维修报价引擎")]
struct Cli {
    /// 目录 JSON 文件（默认: $REPAIR_QUOTE_CATALOG → 用户配置目录 → 内置目录）
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON 格式日志
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出服务目录与规则轴
    List {
        /// 仅列出某类条目（service / package）
        #[arg(long)]
        kind: Option<QuoteKind>,
    },

    /// 计算报价
    Quote(QuoteArgs),
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// 目录条目 ID,如 oil-change
    entry_id: Option<String>,

    /// 系数轴选择: axis=key（可重复）
    #[arg(long = "axis", value_parser = parse_pair)]
    axes: Vec<(String, String)>,

    /// 附加费选择: axis=key（可重复）
    #[arg(long = "surcharge", value_parser = parse_pair)]
    surcharges: Vec<(String, String)>,

    /// 固定费用 ID（可重复）
    #[arg(long = "fee")]
    fees: Vec<String>,

    /// 未完成时给出中性默认值下的预估
    #[arg(long)]
    provisional: bool,

    /// 输出审计 JSON
    #[arg(long)]
    json: bool,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (axis, key) = raw
        .split_once('=')
        .ok_or_else(|| format!("格式应为 axis=key: {}", raw))?;
    Ok((axis.trim().to_string(), key.trim().to_string()))
}

impl QuoteArgs {
    fn to_request(&self) -> QuoteRequest {
        let mut request = QuoteRequest::new();
        request.entry_id = self.entry_id.clone();
        request.provisional = self.provisional;
        for (axis, key) in &self.axes {
            request = request.with_axis(axis, key);
        }
        for (axis, key) in &self.surcharges {
            request = request.with_surcharge(axis, key);
        }
        for fee in &self.fees {
            request = request.with_fee(fee);
        }
        request
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("错误: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let bundle = CatalogLoader::resolve(cli.catalog.as_deref()).context("目录加载失败")?;
    let engine = QuoteEngine::from_bundle(bundle);

    match cli.command {
        Command::List { kind } => {
            print_catalog(&engine, kind);
            Ok(ExitCode::SUCCESS)
        }
        Command::Quote(args) => {
            let outcome = engine.quote(&args.to_request());
            if args.json {
                let value = match &outcome {
                    QuoteOutcome::Computed(quote) => quote.audit_json(),
                    QuoteOutcome::Incomplete(_) => serde_json::to_value(&outcome)?,
                };
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", BreakdownFormatter::format_outcome(&outcome));
            }

            Ok(if outcome.is_computed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
    }
}

fn print_catalog(engine: &QuoteEngine, kind: Option<QuoteKind>) {
    println!("{} v{}", repair_quote::APP_NAME, repair_quote::VERSION);
    println!();

    for entry in engine.services().entries() {
        if kind.map_or(false, |k| k != entry.kind) {
            continue;
        }
        println!(
            "  {:<30} {:<8} {:<12} {}",
            entry.id,
            entry.kind.as_str(),
            entry.category,
            entry.base_price
        );
    }

    println!();
    for axis in engine.rules().coefficient_axes() {
        let keys: Vec<&str> = axis.table.keys().collect();
        println!(
            "  [{}] {}{}: {}",
            axis.id,
            axis.label,
            if axis.required { " (required)" } else { "" },
            keys.join(", ")
        );
    }
    for axis in engine.rules().surcharge_axes() {
        let keys: Vec<&str> = axis.table.keys().collect();
        println!("  [{}] {} (multi): {}", axis.id, axis.label, keys.join(", "));
    }
    for fee in engine.rules().flat_fees() {
        println!("  [fee] {} ({}): +{}", fee.label, fee.id, fee.range);
    }
}
