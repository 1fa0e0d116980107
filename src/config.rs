use crate::model::{BrandId, ConfigError};
use crate::query::{QueryParams, SortOrder, TypeFilter};
use reqwest::Url;
use serde::Deserialize;
use std::fs;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "SHOWROOM_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct BrandConfig {
    pub id: BrandId,
    pub primary: String,
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Initial UI selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub brand: Option<BrandId>,
    #[serde(default, rename = "type")]
    pub type_filter: TypeFilter,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ViewConfig {
    pub fn params(&self) -> QueryParams {
        QueryParams {
            type_filter: self.type_filter,
            query: self.query.clone(),
            sort: self.sort,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    #[serde(default = "default_brands")]
    pub brands: Vec<BrandConfig>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// No timeout when absent: a hung request hangs the load.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub view: ViewConfig,
}

/// A brand with its document locations resolved to absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSource {
    pub id: BrandId,
    pub primary: String,
    pub fallback: Option<String>,
}

impl BrandSource {
    pub fn new(id: impl Into<BrandId>, primary: impl Into<String>, fallback: Option<String>) -> Self {
        Self {
            id: id.into(),
            primary: primary.into(),
            fallback,
        }
    }
}

fn brand(id: &str, primary: &str, fallback: Option<&str>) -> BrandConfig {
    BrandConfig {
        id: id.to_string(),
        primary: primary.to_string(),
        fallback: fallback.map(str::to_string),
    }
}

/// The seven showroom brands; only the second one has a legacy fallback document.
pub fn default_brands() -> Vec<BrandConfig> {
    vec![
        brand("hero", "/data/hero.json", None),
        brand("honda", "/data/honda.json", Some("/data/honda-legacy.json")),
        brand("tvs", "/data/tvs.json", None),
        brand("bajaj", "/data/bajaj.json", None),
        brand("yamaha", "/data/yamaha.json", None),
        brand("suzuki", "/data/suzuki.json", None),
        brand("royal-enfield", "/data/royal-enfield.json", None),
    ]
}

impl AppConfig {
    /// Resolves every brand path against `base_url`. Absolute URLs pass through.
    pub fn resolve_brands(&self) -> Result<Vec<BrandSource>, ConfigError> {
        if self.brands.is_empty() {
            return Err(ConfigError::NoBrands);
        }
        let base = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        self.brands
            .iter()
            .map(|b| -> Result<BrandSource, ConfigError> {
                let primary = join_url(&base, &b.primary)?;
                let fallback = b
                    .fallback
                    .as_deref()
                    .map(|f| join_url(&base, f))
                    .transpose()?;
                Ok(BrandSource::new(b.id.clone(), primary, fallback))
            })
            .collect()
    }
}

fn join_url(base: &Url, path: &str) -> Result<String, ConfigError> {
    base.join(path)
        .map(String::from)
        .map_err(|e| ConfigError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.resolve_brands()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_config(&content)
}
