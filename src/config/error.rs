// ==========================================
// 车辆维修报价引擎 - 目录配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 配置错误只在加载期出现,不得流入请求期
// ==========================================

use rust_decimal::Decimal;
use thiserror::Error;

/// 目录加载/校验错误
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== 文件相关错误 =====
    #[error("目录文件不存在: {0}")]
    FileNotFound(String),

    #[error("目录文件读取失败: {0}")]
    FileReadError(String),

    #[error("目录 JSON 解析失败: {0}")]
    ParseError(String),

    // ===== 标识错误 =====
    #[error("{section} 中存在空 ID")]
    EmptyId { section: String },

    #[error("{section} 中 ID 重复: {id}")]
    DuplicateId { section: String, id: String },

    // ===== 数值错误 =====
    #[error("{section}/{id} 区间倒置: min={min} > max={max}")]
    InvertedRange {
        section: String,
        id: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("{section}/{id} 金额为负: {value}")]
    NegativeAmount {
        section: String,
        id: String,
        value: Decimal,
    },

    #[error("{section}/{id} 金额超出上限: {value} > {limit}")]
    AmountTooLarge {
        section: String,
        id: String,
        value: Decimal,
        limit: Decimal,
    },

    #[error("系数轴 {axis} 的 {key} 系数必须为正: {value}")]
    NonPositiveCoefficient {
        axis: String,
        key: String,
        value: Decimal,
    },

    #[error("系数轴 {axis} 的 {key} 系数超出上限: {value} > {limit}")]
    CoefficientTooLarge {
        axis: String,
        key: String,
        value: Decimal,
        limit: Decimal,
    },

    #[error("{section}/{id} 规则表为空")]
    EmptyTable { section: String, id: String },

    #[error("系数轴数量超出上限: {count} > {limit}")]
    TooManyAxes { count: usize, limit: usize },

    #[error("规则组合后的最高报价超出上限: {bound} > {limit}")]
    QuoteBoundTooLarge { bound: String, limit: Decimal },
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type CatalogResult<T> = Result<T, CatalogError>;
