// ==========================================
// QuoteEngine 引擎集成测试
// ==========================================
// 测试目标: 验证报价管线的阶段顺序、取整、未完成判定
// 覆盖范围: 示例场景 / 套餐报价 / 未知 key / 性质
// ==========================================


use repair_quote::{BreakdownFormatter, IncompleteReason, QuoteRequest, StepEffect};
use rust_decimal::Decimal;
use test_helpers::{embedded_engine, engine_from_json, MINIMAL_CATALOG};

// ==========================================
// 测试用例 1: 机油更换 + SUV + 六缸 + 上门服务费
// ==========================================

#[test]
fn test_oil_change_with_service_call() {
    println!("\n=== 测试：机油更换 SUV 六缸 + 上门服务费 ===");

    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("oil-change")
        .with_axis("vehicle", "suv")
        .with_axis("engine", "6-cylinder")
        .with_fee("service-call");

    let outcome = engine.quote(&request);
    println!("  - {}", BreakdownFormatter::format_outcome(&outcome));

    assert_eq!(outcome.range(), Some((166, 352)), "报价区间应为 $166-$352");

    println!("=== 测试通过 ===\n");
}

// ==========================================
// 测试用例 2: 全套刹车 + 皮卡 + 八缸 + 两项附加费
// ==========================================

#[test]
fn test_full_brake_service_with_surcharges() {
    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("full-brake-service")
        .with_axis("vehicle", "truck2500")
        .with_axis("engine", "8-cylinder")
        .with_surcharge("complexity", "european")
        .with_surcharge("complexity", "older-vehicle");

    let outcome = engine.quote(&request);
    assert_eq!(outcome.range(), Some((678, 1105)), "报价区间应为 $678-$1105");

    let summary = BreakdownFormatter::format_outcome(&outcome);
    assert_eq!(
        summary,
        "Base: $380-$600 | Vehicle (truck2500): ×1.30 | Engine (8-cylinder): ×1.25 \
         | Complexity (european): +$40-$80 | Complexity (older-vehicle): +$20-$50 \
         | Total: $678-$1105"
    );
}

// ==========================================
// 测试用例 3: 发动机未选择 → 未完成
// ==========================================

#[test]
fn test_missing_engine_selection_is_incomplete() {
    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("oil-change").with_axis("vehicle", "suv");

    let outcome = engine.quote(&request);
    assert!(outcome.range().is_none(), "未完成请求不得给出数字");

    let incomplete = outcome.incomplete().expect("应为未完成");
    assert_eq!(incomplete.reason, IncompleteReason::MissingSelections);
    assert_eq!(
        BreakdownFormatter::format_outcome(&outcome),
        "Incomplete: missing Engine"
    );
}

// ==========================================
// 测试用例 4: 未知发动机 key 等同于四缸
// ==========================================

#[test]
fn test_unknown_engine_key_is_neutral() {
    let engine = embedded_engine();
    let base = QuoteRequest::for_entry("spark-plugs").with_axis("vehicle", "truck1500");

    let typo = engine.quote(&base.clone().with_axis("engine", "8-cyl"));
    let four = engine.quote(&base.with_axis("engine", "4-cylinder"));

    assert_eq!(typo.range(), four.range());
    assert_eq!(typo.range(), Some((144, 360)));
}

// ==========================================
// 套餐报价
// ==========================================

#[test]
fn test_package_quote_is_pure_multiplicative() {
    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("seasonal-readiness-package")
        .with_axis("vehicle", "truck2500")
        .with_axis("vehicle-age", "6-10");

    let quote = engine.quote(&request).quote().cloned().expect("套餐报价应已计算");

    // 200×1.30×1.10 = 286, 350×1.30×1.10 = 500.5 → 501
    assert_eq!(quote.range(), (286, 501));
    assert!(quote
        .breakdown
        .iter()
        .all(|s| matches!(s.effect, StepEffect::Multiplier { .. })));
}

#[test]
fn test_provisional_incomplete_quote() {
    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("premium-maintenance-package")
        .with_axis("vehicle", "suv")
        .provisional();

    let outcome = engine.quote(&request);
    assert!(!outcome.is_computed(), "预估不等于已计算报价");

    let provisional = outcome
        .incomplete()
        .and_then(|i| i.provisional.as_ref())
        .expect("声明 provisional 时应附带预估");
    assert_eq!(provisional.range(), (330, 550));
    assert_eq!(
        BreakdownFormatter::format_outcome(&outcome),
        "Incomplete: missing Vehicle Age | Provisional: $330-$550"
    );
}

// ==========================================
// 自定义目录: 可选轴 / 小数附加费
// ==========================================

#[test]
fn test_optional_axis_may_be_left_unset() {
    let (_file, engine) = engine_from_json(MINIMAL_CATALOG).unwrap();

    let without_drive = engine.quote(
        &QuoteRequest::for_entry("wheel-alignment")
            .with_axis("vehicle", "sedan")
            .with_axis("engine", "4-cylinder"),
    );
    assert_eq!(without_drive.range(), Some((80, 150)));

    let with_drive = engine.quote(
        &QuoteRequest::for_entry("wheel-alignment")
            .with_axis("vehicle", "sedan")
            .with_axis("engine", "4-cylinder")
            .with_axis("drive", "awd"),
    );
    // 80×1.05 = 84, 150×1.05 = 157.5 → 158
    assert_eq!(with_drive.range(), Some((84, 158)));
}

#[test]
fn test_fractional_surcharge_rounds_once() {
    let (_file, engine) = engine_from_json(MINIMAL_CATALOG).unwrap();
    let request = QuoteRequest::for_entry("wheel-alignment")
        .with_axis("vehicle", "suv")
        .with_axis("engine", "6-cylinder")
        .with_surcharge("complexity", "lifted")
        .with_fee("mobile");

    let quote = engine.quote(&request).quote().cloned().unwrap();

    // min: 80×1.1×1.15 + 25.5 + 50 = 101.2 + 75.5 = 176.7 → 177
    // max: 150×1.1×1.15 + 40 + 75 = 189.75 + 115 = 304.75 → 305
    assert_eq!(quote.unrounded.min, Decimal::new(1767, 1));
    assert_eq!(quote.unrounded.max, Decimal::new(30475, 2));
    assert_eq!(quote.range(), (177, 305));
}

// ==========================================
// 性质
// ==========================================

#[test]
fn test_every_entry_yields_ordered_non_negative_range() {
    let engine = embedded_engine();

    for entry in engine.services().entries() {
        let request = QuoteRequest::for_entry(&entry.id)
            .with_axis("vehicle", "truck2500")
            .with_axis("engine", "diesel")
            .with_axis("vehicle-age", "16+")
            .with_surcharge("complexity", "hybrid-drivetrain")
            .with_surcharge("complexity", "rust-hard-access")
            .with_fee("service-call");

        let (min, max) = engine.quote(&request).range().expect("所有必选项已选择");
        assert!(min >= 0);
        assert!(min <= max, "{}: {} > {}", entry.id, min, max);
    }
}

#[test]
fn test_duplicate_surcharge_selection_counts_once() {
    let engine = embedded_engine();
    let base = QuoteRequest::for_entry("coolant-flush")
        .with_axis("vehicle", "sedan")
        .with_axis("engine", "4-cylinder");

    let once = engine.quote(&base.clone().with_surcharge("complexity", "awd"));
    let twice = engine.quote(
        &base
            .with_surcharge("complexity", "awd")
            .with_surcharge("complexity", "awd"),
    );

    assert_eq!(once, twice);
    assert_eq!(once.range(), Some((125, 260)));
}

#[test]
fn test_audit_json_contains_every_step() {
    let engine = embedded_engine();
    let request = QuoteRequest::for_entry("oil-change")
        .with_axis("vehicle", "suv")
        .with_axis("engine", "6-cylinder")
        .with_fee("service-call");

    let quote = engine.quote(&request).quote().cloned().unwrap();
    let audit = quote.audit_json();

    assert_eq!(audit["entry_id"], "oil-change");
    assert_eq!(audit["min"], 166);
    assert_eq!(audit["max"], 352);
    assert_eq!(audit["steps"].as_array().map(|s| s.len()), Some(3));
    assert_eq!(audit["unrounded"]["min"], "165.9");
}

#[test]
fn test_breakdown_shows_exact_three_decimal_coefficient() {
    let (_file, engine) = engine_from_json(
        r#"{
          "services": [
            { "id": "detailing", "title": "Detailing", "category": "Care", "base_price": { "min": 100, "max": 200 } }
          ],
          "coefficient_axes": [
            { "id": "vehicle", "label": "Vehicle", "table": { "sedan": 1.0, "suv": 1.125 } }
          ]
        }"#,
    )
    .unwrap();

    let outcome = engine.quote(&QuoteRequest::for_entry("detailing").with_axis("vehicle", "suv"));

    // 100×1.125 = 112.5 → 113, 200×1.125 = 225
    assert_eq!(
        BreakdownFormatter::format_outcome(&outcome),
        "Base: $100-$200 | Vehicle (suv): ×1.125 | Total: $113-$225",
        "明细中的系数必须与实际参与计算的系数一致"
    );
}
