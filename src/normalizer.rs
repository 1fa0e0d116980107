//! Maps vendor catalogue documents onto [`CanonicalProduct`] records.
//!
//! A document's layout is detected once ([`RawDocument::detect`]) and each
//! layout is mapped by its own function. Field lookups are defensive: missing
//! keys, wrong types and alternate spellings fall back to empty values and
//! never produce an error.

use crate::model::{CanonicalProduct, Price, ProductType, Variant};
use serde_json::{Map, Value};
use tracing::debug;

const MODEL_KEYS: &[&str] = &["model", "name", "title"];
const TYPE_KEYS: &[&str] = &["type", "category", "segment"];
const ENGINE_KEYS: &[&str] = &["engine", "displacement", "engineCapacity", "engine_cc"];
const POWER_KEYS: &[&str] = &["power", "maxPower", "max_power"];
const MILEAGE_KEYS: &[&str] = &["mileage", "range", "fuelEfficiency"];
const IMAGE_KEYS: &[&str] = &["imageUrl", "image_url", "image", "img"];
const PRODUCT_URL_KEYS: &[&str] = &["productUrl", "product_url", "url", "link"];
const EX_SHOWROOM_KEYS: &[&str] = &[
    "exShowroom",
    "ex_showroom",
    "exShowroomPrice",
    "ex_showroom_price",
    "price",
];
const ON_ROAD_KEYS: &[&str] = &[
    "onRoadExample",
    "on_road_example",
    "onRoad",
    "onRoadPrice",
    "on_road_price",
];
const VARIANT_NAME_KEYS: &[&str] = &["name", "variant", "title"];
const VARIANT_DETAIL_KEYS: &[&str] = &["details", "description", "spec"];

/// Legacy documents carry exactly these two top-level groups.
const LEGACY_GROUPS: [(&str, ProductType); 2] = [
    ("motorcycles", ProductType::Motorcycles),
    ("scooters", ProductType::Scooters),
];

/// The three recognised document layouts.
#[derive(Debug, Clone, Copy)]
pub enum RawDocument<'a> {
    /// `{ "products": { "<group>": [..], .. } }`
    Grouped(&'a Value),
    /// `[ { .., "type": "<free text>" }, .. ]`
    FlatArray(&'a [Value]),
    /// `{ "motorcycles": [..], "scooters": [..] }`; `None` for payloads that are not objects.
    Legacy(Option<&'a Map<String, Value>>),
}

impl<'a> RawDocument<'a> {
    /// Checked in order: `products` field, then bare array, then legacy fields.
    pub fn detect(payload: &'a Value) -> Self {
        if let Some(products) = payload.get("products") {
            return RawDocument::Grouped(products);
        }
        match payload {
            Value::Array(items) => RawDocument::FlatArray(items),
            Value::Object(map) => RawDocument::Legacy(Some(map)),
            _ => RawDocument::Legacy(None),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawDocument::Grouped(_) => "grouped",
            RawDocument::FlatArray(_) => "flat-array",
            RawDocument::Legacy(_) => "legacy",
        }
    }
}

pub fn normalize(payload: &Value) -> Vec<CanonicalProduct> {
    let document = RawDocument::detect(payload);
    let products = match document {
        RawDocument::Grouped(products) => normalize_grouped(products),
        RawDocument::FlatArray(items) => normalize_flat(items),
        RawDocument::Legacy(fields) => normalize_legacy(fields),
    };
    debug!("Normalized {} products from {} document", products.len(), document.kind());
    products
}

fn normalize_grouped(products: &Value) -> Vec<CanonicalProduct> {
    match products {
        Value::Object(groups) => groups
            .iter()
            .filter_map(|(group, items)| match group_type(group) {
                Some(product_type) => Some((items, product_type)),
                None => {
                    debug!("Skipping unknown product group {}", group);
                    None
                }
            })
            .flat_map(|(items, product_type)| normalize_group(items, product_type))
            .collect(),
        // Some vendors put the flat record list under `products`.
        Value::Array(items) => normalize_flat(items),
        _ => Vec::new(),
    }
}

fn normalize_legacy(fields: Option<&Map<String, Value>>) -> Vec<CanonicalProduct> {
    let Some(fields) = fields else {
        return Vec::new();
    };
    LEGACY_GROUPS
        .iter()
        .filter_map(|(key, product_type)| fields.get(*key).map(|items| (items, *product_type)))
        .flat_map(|(items, product_type)| normalize_group(items, product_type))
        .collect()
}

fn normalize_flat(items: &[Value]) -> Vec<CanonicalProduct> {
    items
        .iter()
        .filter_map(|raw| {
            let raw_type = first_text(raw, TYPE_KEYS).unwrap_or_default();
            normalize_record(raw, classify_type(&raw_type))
        })
        .collect()
}

fn normalize_group(items: &Value, product_type: ProductType) -> Vec<CanonicalProduct> {
    items
        .as_array()
        .map(|records| {
            records
                .iter()
                .filter_map(|raw| normalize_record(raw, product_type))
                .collect()
        })
        .unwrap_or_default()
}

/// Free-text category to the fixed set. Electric cues (`ev`, `electric`) are
/// substring matches checked before `scoot`, so "Electric Scooter" is `ev`.
pub fn classify_type(raw: &str) -> ProductType {
    let lower = raw.to_lowercase();
    if lower.contains("ev") || lower.contains("electric") {
        ProductType::Ev
    } else if lower.contains("scoot") {
        ProductType::Scooters
    } else {
        ProductType::Motorcycles
    }
}

/// Group names under `products`; anything else is not a vehicle group.
fn group_type(group: &str) -> Option<ProductType> {
    match group.trim().to_lowercase().as_str() {
        "motorcycles" | "motorcycle" | "motorbikes" | "bikes" => Some(ProductType::Motorcycles),
        "scooters" | "scooter" => Some(ProductType::Scooters),
        "ev" | "evs" | "electric" => Some(ProductType::Ev),
        _ => None,
    }
}

/// Returns `None` for records without a usable model name.
pub fn normalize_record(raw: &Value, product_type: ProductType) -> Option<CanonicalProduct> {
    if !raw.is_object() {
        debug!("Skipping non-object catalogue record");
        return None;
    }
    let Some(model) = first_text(raw, MODEL_KEYS) else {
        debug!("Skipping catalogue record without a model name");
        return None;
    };

    Some(CanonicalProduct {
        model,
        engine: engine_text(raw),
        power: first_text(raw, POWER_KEYS),
        mileage: first_text(raw, MILEAGE_KEYS),
        image_url: first_text(raw, IMAGE_KEYS).unwrap_or_default(),
        variants: normalize_variants(raw.get("variants")),
        product_url: first_text(raw, PRODUCT_URL_KEYS),
        price: normalize_price(raw),
        product_type,
    })
}

fn normalize_variants(raw: Option<&Value>) -> Vec<Variant> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let (name, details) = match entry {
                Value::String(_) => (text_of(entry).unwrap_or_default(), String::new()),
                Value::Object(_) => (
                    first_text(entry, VARIANT_NAME_KEYS).unwrap_or_default(),
                    first_text(entry, VARIANT_DETAIL_KEYS).unwrap_or_default(),
                ),
                _ => return None,
            };
            if name.is_empty() && details.is_empty() {
                return None;
            }
            Some(Variant { name, details })
        })
        .collect()
}

/// Keys are looked up inside a nested `price` object first, then on the record.
fn normalize_price(raw: &Value) -> Option<Price> {
    let nested = raw.get("price").filter(|p| p.is_object());
    let lookup = |keys: &[&str]| {
        nested
            .and_then(|p| first_text(p, keys))
            .or_else(|| first_text(raw, keys))
    };

    let price = Price {
        ex_showroom: lookup(EX_SHOWROOM_KEYS),
        on_road_example: lookup(ON_ROAD_KEYS),
    };
    if price.ex_showroom.is_none() && price.on_road_example.is_none() {
        None
    } else {
        Some(price)
    }
}

/// Numeric displacement gets a `cc` suffix; strings are kept as written.
fn engine_text(raw: &Value) -> Option<String> {
    ENGINE_KEYS.iter().find_map(|key| match raw.get(*key)? {
        Value::Number(n) => Some(format!("{n} cc")),
        other => text_of(other),
    })
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| raw.get(*key).and_then(text_of))
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(products: &[CanonicalProduct]) -> Vec<ProductType> {
        products.iter().map(|p| p.product_type).collect()
    }

    #[test]
    fn detects_grouped_before_array_and_legacy() {
        let grouped = json!({ "products": {}, "motorcycles": [] });
        assert!(matches!(RawDocument::detect(&grouped), RawDocument::Grouped(_)));

        let flat = json!([{ "model": "Splendor", "type": "bike" }]);
        assert!(matches!(RawDocument::detect(&flat), RawDocument::FlatArray(_)));

        let legacy = json!({ "motorcycles": [] });
        assert!(matches!(RawDocument::detect(&legacy), RawDocument::Legacy(Some(_))));

        assert!(matches!(RawDocument::detect(&json!("oops")), RawDocument::Legacy(None)));
    }

    #[test]
    fn grouped_document_assigns_type_by_group() {
        let doc = json!({
            "products": {
                "motorcycles": [{ "model": "Xtreme 160R" }],
                "scooters": [{ "model": "Destini 125" }],
                "ev": [{ "model": "Vida V1" }]
            }
        });
        let products = normalize(&doc);

        assert_eq!(products.len(), 3);
        assert_eq!(
            types(&products),
            vec![ProductType::Motorcycles, ProductType::Scooters, ProductType::Ev]
        );
        assert_eq!(products[2].model, "Vida V1");
    }

    #[test]
    fn grouped_document_with_array_products_reads_type_field() {
        let doc = json!({ "products": [{ "model": "iQube", "type": "Electric" }] });
        let products = normalize(&doc);
        assert_eq!(types(&products), vec![ProductType::Ev]);
    }

    #[test]
    fn legacy_document_maps_both_groups() {
        let doc = json!({
            "motorcycles": [{ "model": "Shine" }],
            "scooters": [{ "model": "Activa 6G" }],
            "unrelated": [{ "model": "ignored" }]
        });
        let products = normalize(&doc);

        assert_eq!(products.len(), 2);
        assert_eq!(types(&products), vec![ProductType::Motorcycles, ProductType::Scooters]);
    }

    #[test]
    fn flat_array_is_never_read_as_legacy() {
        let doc = json!([
            { "model": "Jupiter", "type": "Scooter" },
            { "model": "Apache RTR 160", "type": "Street Bike" }
        ]);
        let products = normalize(&doc);
        assert_eq!(types(&products), vec![ProductType::Scooters, ProductType::Motorcycles]);
    }

    #[test]
    fn electric_scooter_is_ev() {
        let doc = json!([{ "model": "Chetak", "type": "Electric Scooter" }]);
        let products = normalize(&doc);
        assert_eq!(types(&products), vec![ProductType::Ev]);
    }

    #[test]
    fn classify_type_covers_cues() {
        assert_eq!(classify_type("EV"), ProductType::Ev);
        assert_eq!(classify_type("ev-scooter"), ProductType::Ev);
        assert_eq!(classify_type("EVScooter"), ProductType::Ev);
        assert_eq!(classify_type("eScooter EV2"), ProductType::Ev);
        assert_eq!(classify_type("Everyday Scooter"), ProductType::Ev);
        assert_eq!(classify_type("Scooty"), ProductType::Scooters);
        assert_eq!(classify_type("cruiser"), ProductType::Motorcycles);
        assert_eq!(classify_type(""), ProductType::Motorcycles);
    }

    #[test]
    fn type_is_always_from_fixed_set() {
        let docs = [
            json!({ "products": { "bikes": [{ "model": "A" }], "Scooter": [{ "model": "B" }] } }),
            json!({ "motorcycles": [{ "model": "C" }], "scooters": [{ "model": "D" }] }),
            json!([{ "model": "E", "type": 42 }, { "model": "F" }, { "model": "G", "type": "EV" }]),
        ];
        for doc in &docs {
            for product in normalize(doc) {
                assert!(ProductType::ALL.contains(&product.product_type));
                assert!(!product.model.is_empty());
            }
        }
    }

    #[test]
    fn bare_string_variant_equals_object_variant() {
        let doc = json!([{
            "model": "Pulsar N160",
            "variants": ["Dual Channel ABS", { "name": "Dual Channel ABS", "details": "" }]
        }]);
        let products = normalize(&doc);
        let variants = &products[0].variants;

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0], variants[1]);
        assert_eq!(variants[0].details, "");
    }

    #[test]
    fn variants_default_to_empty_and_skip_junk() {
        let doc = json!([
            { "model": "No Variants" },
            { "model": "Junk Variants", "variants": [null, 7, {}, "  ", { "variant": "Disc", "description": "Front disc" }] }
        ]);
        let products = normalize(&doc);

        assert!(products[0].variants.is_empty());
        assert_eq!(
            products[1].variants,
            vec![Variant { name: "Disc".into(), details: "Front disc".into() }]
        );
    }

    #[test]
    fn numeric_engine_gets_unit_suffix_only_for_engine() {
        let doc = json!([{ "model": "R15 V4", "engine": 155, "power": 18.4, "mileage": 45 }]);
        let product = &normalize(&doc)[0];

        assert_eq!(product.engine.as_deref(), Some("155 cc"));
        assert_eq!(product.power.as_deref(), Some("18.4"));
        assert_eq!(product.mileage.as_deref(), Some("45"));
    }

    #[test]
    fn string_engine_is_kept_verbatim() {
        let doc = json!([{ "model": "Classic 350", "displacement": "349.34 cc" }]);
        assert_eq!(normalize(&doc)[0].engine.as_deref(), Some("349.34 cc"));
    }

    #[test]
    fn price_prefers_first_present_key() {
        let doc = json!([{
            "model": "Gixxer",
            "ex_showroom": "₹1,40,000",
            "exShowroomPrice": "ignored",
            "price": { "onRoad": "₹1,65,000" }
        }]);
        let price = normalize(&doc)[0].price.clone().unwrap();

        assert_eq!(price.ex_showroom.as_deref(), Some("₹1,40,000"));
        assert_eq!(price.on_road_example.as_deref(), Some("₹1,65,000"));
    }

    #[test]
    fn nested_price_object_wins_over_top_level() {
        let doc = json!([{
            "model": "Access 125",
            "exShowroom": "top level",
            "price": { "exShowroom": "nested" }
        }]);
        let price = normalize(&doc)[0].price.clone().unwrap();
        assert_eq!(price.ex_showroom.as_deref(), Some("nested"));
        assert_eq!(price.on_road_example, None);
    }

    #[test]
    fn scalar_price_is_ex_showroom() {
        let doc = json!([{ "model": "Ronin", "price": 149000 }]);
        let price = normalize(&doc)[0].price.clone().unwrap();
        assert_eq!(price.ex_showroom.as_deref(), Some("149000"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let doc = json!([{ "name": "Plain" }]);
        let product = &normalize(&doc)[0];

        assert_eq!(product.model, "Plain");
        assert_eq!(product.image_url, "");
        assert_eq!(product.engine, None);
        assert_eq!(product.product_url, None);
        assert_eq!(product.price, None);
    }

    #[test]
    fn records_without_model_are_dropped() {
        let doc = json!({ "motorcycles": [{ "engine": 100 }, { "model": "  " }, "string", { "model": "Kept" }] });
        let products = normalize(&doc);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].model, "Kept");
    }

    #[test]
    fn unknown_product_groups_are_skipped() {
        let doc = json!({
            "products": {
                "accessories": [{ "model": "Helmet" }],
                "spareParts": [{ "model": "Chain Kit" }],
                "motorcycle": [{ "model": "Passion Pro" }],
                "EVs": [{ "model": "Vida V1 Pro" }]
            }
        });
        let products = normalize(&doc);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].model, "Passion Pro");
        assert_eq!(types(&products), vec![ProductType::Motorcycles, ProductType::Ev]);
    }

    #[test]
    fn wrongly_typed_groups_yield_nothing() {
        assert!(normalize(&json!({ "products": null })).is_empty());
        assert!(normalize(&json!({ "products": { "ev": "none" } })).is_empty());
        assert!(normalize(&json!({ "motorcycles": {} })).is_empty());
        assert!(normalize(&json!(12)).is_empty());
    }
}
