// Filtered + sorted projection of one brand's products
use crate::model::{CanonicalProduct, ProductType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(ProductType),
}

impl TypeFilter {
    pub fn matches(&self, product: &CanonicalProduct) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => product.product_type == *t,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TypeFilter::All),
            "motorcycles" => Ok(TypeFilter::Only(ProductType::Motorcycles)),
            "scooters" => Ok(TypeFilter::Only(ProductType::Scooters)),
            "ev" => Ok(TypeFilter::Only(ProductType::Ev)),
            other => Err(format!("unknown type filter \"{other}\"")),
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Immutable selection passed into [`project`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub type_filter: TypeFilter,
    pub query: String,
    pub sort: SortOrder,
}

/// Lower-cased text a query is matched against.
pub fn haystack(product: &CanonicalProduct) -> String {
    let mut parts: Vec<&str> = vec![product.model.as_str()];
    parts.extend(
        [&product.engine, &product.power, &product.mileage]
            .into_iter()
            .filter_map(|field| field.as_deref()),
    );
    for variant in &product.variants {
        parts.push(&variant.name);
        parts.push(&variant.details);
    }
    parts.join(" ").to_lowercase()
}

/// Primary-strength collation key: decomposed, accents dropped, lower-cased.
fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Strings that differ only by case or accents compare equal.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(collation_key(b))
}

pub fn project(all: &[CanonicalProduct], params: &QueryParams) -> Vec<CanonicalProduct> {
    let needle = params.query.to_lowercase();

    let mut result: Vec<CanonicalProduct> = all
        .iter()
        .filter(|p| params.type_filter.matches(p))
        .filter(|p| needle.is_empty() || haystack(p).contains(&needle))
        .cloned()
        .collect();

    // Stable, so equal models keep source order; descending is the reverse of that.
    result.sort_by(|a, b| locale_compare(&a.model, &b.model));
    if params.sort == SortOrder::Desc {
        result.reverse();
    }
    result
}
