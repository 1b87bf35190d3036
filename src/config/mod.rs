// ==========================================
// 车辆维修报价引擎 - 配置层
// ==========================================
// 职责: 服务目录与规则目录的加载、校验
// 存储: JSON 文档（内置默认 / 文件覆写）
// ==========================================

pub mod error;
pub mod loader;
pub mod rule_catalog;
pub mod service_catalog;
pub mod validate;

// 重导出核心配置类型
pub use error::{CatalogError, CatalogResult};
pub use loader::{config_keys, CatalogBundle, CatalogDocument, CatalogLoader, CatalogSource};
pub use rule_catalog::{
    CoefficientAxis, CoefficientTable, FlatFee, RuleCatalog, SurchargeAxis, SurchargeTable,
};
pub use service_catalog::ServiceCatalog;
