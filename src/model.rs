// Core structs: CanonicalProduct, Catalogue, and the error enums
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type BrandId = String;

/// Fixed category set every product is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Motorcycles,
    Scooters,
    Ev,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Motorcycles,
        ProductType::Scooters,
        ProductType::Ev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Motorcycles => "motorcycles",
            ProductType::Scooters => "scooters",
            ProductType::Ev => "ev",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub ex_showroom: Option<String>,
    pub on_road_example: Option<String>,
}

/// Vendor-independent listing. Never mutated after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    pub model: String,
    pub engine: Option<String>,
    pub power: Option<String>,
    pub mileage: Option<String>,
    /// Empty string means "no image".
    pub image_url: String,
    pub variants: Vec<Variant>,
    pub product_url: Option<String>,
    pub price: Option<Price>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

/// Which document a brand's list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandOutcome {
    Primary,
    Fallback,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueStatus {
    Available,
    Unavailable,
}

/// Result of one page load: exactly one entry per declared brand, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub brands: IndexMap<BrandId, Vec<CanonicalProduct>>,
    pub outcomes: IndexMap<BrandId, BrandOutcome>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalogue {
    pub fn products(&self, brand: &str) -> &[CanonicalProduct] {
        self.brands.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unavailable only when no brand produced a usable document at all.
    pub fn status(&self) -> CatalogueStatus {
        if self.outcomes.values().all(|o| *o == BrandOutcome::Failed) {
            CatalogueStatus::Unavailable
        } else {
            CatalogueStatus::Available
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("config declares no brands")]
    NoBrands,
}
