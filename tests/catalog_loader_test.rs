// ==========================================
// 目录加载集成测试
// ==========================================
// 测试目标: 目录文件加载、来源优先级、加载期校验
// 红线: 非法目录必须在加载期失败,不能带进请求期
// ==========================================


use repair_quote::config::{CatalogLoader, CatalogSource};
use repair_quote::{CatalogError, QuoteKind};
use std::path::Path;
use test_helpers::{write_catalog_file, MINIMAL_CATALOG};

// ==========================================
// 正常加载
// ==========================================

#[test]
fn test_load_minimal_catalog_from_file() {
    println!("\n=== 测试：从文件加载最小目录 ===");

    let file = write_catalog_file(MINIMAL_CATALOG).unwrap();
    let bundle = CatalogLoader::from_path(file.path()).unwrap();

    assert_eq!(bundle.source, CatalogSource::File(file.path().to_path_buf()));
    assert_eq!(bundle.services.len(), 2);
    assert_eq!(bundle.services.by_kind(QuoteKind::Package).count(), 1);

    let drive = bundle.rules.coefficient_axis("drive").expect("drive 轴应存在");
    assert!(!drive.required, "drive 轴声明为可选");

    let vehicle = bundle.rules.coefficient_axis("vehicle").unwrap();
    assert!(vehicle.required, "required 默认为 true");
    assert!(vehicle.is_applicable(QuoteKind::Service));
    assert!(vehicle.is_applicable(QuoteKind::Package));

    println!("  ✓ 服务 {} 项,系数轴 {} 个", bundle.services.len(), bundle.rules.coefficient_axes().len());
    println!("=== 测试通过 ===\n");
}

#[test]
fn test_resolve_with_prefers_explicit_path() {
    let explicit = write_catalog_file(MINIMAL_CATALOG).unwrap();
    let env = write_catalog_file(r#"{ "services": [] }"#).unwrap();

    let bundle =
        CatalogLoader::resolve_with(Some(explicit.path()), Some(env.path()), None).unwrap();
    assert_eq!(bundle.services.len(), 2, "显式路径优先于环境变量");

    let bundle = CatalogLoader::resolve_with(None, Some(env.path()), None).unwrap();
    assert!(bundle.services.is_empty(), "无显式路径时使用环境变量");
}

#[test]
fn test_resolve_with_uses_existing_user_file() {
    let user = write_catalog_file(MINIMAL_CATALOG).unwrap();
    let bundle = CatalogLoader::resolve_with(None, None, Some(user.path())).unwrap();
    assert_eq!(bundle.source, CatalogSource::File(user.path().to_path_buf()));
}

#[test]
fn test_env_path_that_does_not_exist_is_error() {
    let missing = Path::new("/nonexistent/repair-quote/env-catalog.json");
    let err = CatalogLoader::resolve_with(None, Some(missing), None).unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound(_)));
}

// ==========================================
// 加载期校验
// ==========================================

fn load_err(json: &str) -> CatalogError {
    let file = write_catalog_file(json).unwrap();
    CatalogLoader::from_path(file.path()).expect_err("非法目录应加载失败")
}

#[test]
fn test_inverted_base_price_is_rejected() {
    let err = load_err(
        r#"{ "services": [
            { "id": "x", "title": "X", "category": "C", "base_price": { "min": 200, "max": 100 } }
        ] }"#,
    );
    assert!(matches!(err, CatalogError::InvertedRange { .. }), "{}", err);
}

#[test]
fn test_negative_surcharge_is_rejected() {
    let err = load_err(
        r#"{ "surcharge_axes": [
            { "id": "complexity", "label": "Complexity", "table": { "discount": { "min": -10, "max": 0 } } }
        ] }"#,
    );
    assert!(matches!(err, CatalogError::NegativeAmount { .. }), "{}", err);
}

#[test]
fn test_zero_coefficient_is_rejected() {
    let err = load_err(
        r#"{ "coefficient_axes": [
            { "id": "vehicle", "label": "Vehicle", "table": { "free": 0 } }
        ] }"#,
    );
    match err {
        CatalogError::NonPositiveCoefficient { axis, key, .. } => {
            assert_eq!(axis, "vehicle");
            assert_eq!(key, "free");
        }
        other => panic!("错误类型不符: {}", other),
    }
}

#[test]
fn test_duplicate_service_id_is_rejected() {
    let err = load_err(
        r#"{ "services": [
            { "id": "oil-change", "title": "A", "category": "C", "base_price": { "min": 1, "max": 2 } },
            { "id": "oil-change", "title": "B", "category": "C", "base_price": { "min": 1, "max": 2 } }
        ] }"#,
    );
    assert!(
        matches!(err, CatalogError::DuplicateId { ref id, .. } if id == "oil-change"),
        "{}",
        err
    );
}

#[test]
fn test_empty_coefficient_table_is_rejected() {
    let err = load_err(
        r#"{ "coefficient_axes": [ { "id": "vehicle", "label": "Vehicle", "table": {} } ] }"#,
    );
    assert!(matches!(err, CatalogError::EmptyTable { .. }), "{}", err);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = load_err(r#"{ "services": [ { "id": "x" "#);
    assert!(matches!(err, CatalogError::ParseError(_)), "{}", err);
}

#[test]
fn test_unknown_quote_kind_is_parse_error() {
    let err = load_err(
        r#"{ "services": [
            { "id": "x", "title": "X", "category": "C", "kind": "subscription", "base_price": { "min": 1, "max": 2 } }
        ] }"#,
    );
    assert!(matches!(err, CatalogError::ParseError(_)), "{}", err);
}

#[test]
fn test_duplicate_table_key_is_parse_error() {
    let err = load_err(
        r#"{ "coefficient_axes": [
            { "id": "vehicle", "label": "Vehicle", "table": { "suv": 1.1, "suv": 1.5 } }
        ] }"#,
    );
    match err {
        CatalogError::ParseError(message) => assert!(message.contains("suv"), "{}", message),
        other => panic!("错误类型不符: {}", other),
    }
}

#[test]
fn test_stacked_coefficients_beyond_quote_limit_are_rejected() {
    let axes: Vec<String> = (0..8)
        .map(|i| {
            format!(
                r#"{{ "id": "axis-{}", "label": "Axis {}", "table": {{ "max": 100 }} }}"#,
                i, i
            )
        })
        .collect();
    let json = format!(
        r#"{{
          "services": [
            {{ "id": "engine-rebuild", "title": "Engine Rebuild", "category": "Engine", "base_price": {{ "min": 999999, "max": 1000000 }} }}
          ],
          "coefficient_axes": [ {} ]
        }}"#,
        axes.join(", ")
    );

    let err = load_err(&json);
    assert!(matches!(err, CatalogError::QuoteBoundTooLarge { .. }), "{}", err);
}
