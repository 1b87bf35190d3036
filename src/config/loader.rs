// ==========================================
// 车辆维修报价引擎 - 目录加载器
// ==========================================
// 职责: 读取 JSON 目录文档 → 校验 → 不可变目录
// 来源优先级: 显式路径 > 环境变量 > 用户配置目录 > 内置默认目录
// 红线: 加载失败即启动失败,不回落到半有效目录
// ==========================================

use crate::config::error::{CatalogError, CatalogResult};
use crate::config::rule_catalog::{CoefficientAxis, FlatFee, RuleCatalog, SurchargeAxis};
use crate::config::service_catalog::ServiceCatalog;
use crate::domain::catalog::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// 内置默认目录（编译期嵌入）
const EMBEDDED_CATALOG: &str = include_str!("default_catalog.json");

// ==========================================
// config_keys - 配置键常量
// ==========================================
pub mod config_keys {
    // 目录文件路径覆写
    pub const CATALOG_PATH_ENV: &str = "REPAIR_QUOTE_CATALOG";

    // 用户配置目录下的子目录与文件名
    pub const CONFIG_DIR_NAME: &str = "repair-quote";
    pub const CATALOG_FILE_NAME: &str = "catalog.json";

    // 性能日志开关
    pub const PERF_ENV: &str = "REPAIR_QUOTE_PERF";
}

// ==========================================
// CatalogDocument - 目录文档（未校验）
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub services: Vec<CatalogEntry>,

    #[serde(default)]
    pub coefficient_axes: Vec<CoefficientAxis>,

    #[serde(default)]
    pub surcharge_axes: Vec<SurchargeAxis>,

    #[serde(default)]
    pub flat_fees: Vec<FlatFee>,
}

/// 目录来源（用于启动日志）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Embedded => write!(f, "embedded"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ==========================================
// CatalogBundle - 校验后的服务目录 + 规则目录
// ==========================================
#[derive(Debug, Clone)]
pub struct CatalogBundle {
    pub services: ServiceCatalog,
    pub rules: RuleCatalog,
    pub source: CatalogSource,
}

impl CatalogBundle {
    pub fn from_document(doc: CatalogDocument, source: CatalogSource) -> CatalogResult<Self> {
        let services = ServiceCatalog::new(doc.services)?;
        let rules = RuleCatalog::new(doc.coefficient_axes, doc.surcharge_axes, doc.flat_fees)?;
        Ok(Self {
            services,
            rules,
            source,
        })
    }
}

// ==========================================
// CatalogLoader - 目录加载器
// ==========================================
pub struct CatalogLoader;

impl CatalogLoader {
    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str, source: CatalogSource) -> CatalogResult<CatalogBundle> {
        let doc: CatalogDocument = serde_json::from_str(raw)?;
        CatalogBundle::from_document(doc, source)
    }

    /// 从 JSON 文件加载
    #[instrument]
    pub fn from_path(path: &Path) -> CatalogResult<CatalogBundle> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        let bundle = Self::from_json_str(&raw, CatalogSource::File(path.to_path_buf()))?;
        info!(
            services = bundle.services.len(),
            coefficient_axes = bundle.rules.coefficient_axes().len(),
            surcharge_axes = bundle.rules.surcharge_axes().len(),
            "目录文件加载完成"
        );
        Ok(bundle)
    }

    /// 内置默认目录
    pub fn embedded() -> CatalogResult<CatalogBundle> {
        Self::from_json_str(EMBEDDED_CATALOG, CatalogSource::Embedded)
    }

    /// 用户配置目录下的默认目录文件路径
    pub fn user_catalog_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CATALOG_FILE_NAME)
        })
    }

    /// 按优先级解析目录来源并加载
    ///
    /// 1) explicit（命令行指定,不存在即报错）
    /// 2) REPAIR_QUOTE_CATALOG 环境变量（不存在即报错）
    /// 3) <config_dir>/repair-quote/catalog.json（存在才使用）
    /// 4) 内置默认目录
    pub fn resolve(explicit: Option<&Path>) -> CatalogResult<CatalogBundle> {
        let env_path = std::env::var(config_keys::CATALOG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self::resolve_with(explicit, env_path.as_deref(), Self::user_catalog_path().as_deref())
    }

    /// resolve 的可测试版本（不读取进程环境）
    pub fn resolve_with(
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        user_path: Option<&Path>,
    ) -> CatalogResult<CatalogBundle> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "使用命令行指定的目录文件");
            return Self::from_path(path);
        }

        if let Some(path) = env_path {
            debug!(
                path = %path.display(),
                env = config_keys::CATALOG_PATH_ENV,
                "使用环境变量指定的目录文件"
            );
            return Self::from_path(path);
        }

        if let Some(path) = user_path.filter(|p| p.exists()) {
            debug!(path = %path.display(), "使用用户配置目录中的目录文件");
            return Self::from_path(path);
        }

        debug!("使用内置默认目录");
        Self::embedded()
    }
}
