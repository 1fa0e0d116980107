// Plain-text product cards
use crate::model::CanonicalProduct;
use std::fmt::Write;

pub fn render_card(product: &CanonicalProduct) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "┌ {} [{}]", product.model, product.product_type);

    let specs: Vec<String> = [
        ("Engine", &product.engine),
        ("Power", &product.power),
        ("Mileage", &product.mileage),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_deref().map(|v| format!("{label}: {v}")))
    .collect();
    if !specs.is_empty() {
        let _ = writeln!(out, "│ {}", specs.join(" | "));
    }

    for variant in &product.variants {
        if variant.details.is_empty() {
            let _ = writeln!(out, "│ • {}", variant.name);
        } else {
            let _ = writeln!(out, "│ • {} ({})", variant.name, variant.details);
        }
    }

    if let Some(price) = &product.price {
        if let Some(ex) = &price.ex_showroom {
            let _ = writeln!(out, "│ Ex-showroom: {ex}");
        }
        if let Some(on_road) = &price.on_road_example {
            let _ = writeln!(out, "│ On-road (example): {on_road}");
        }
    }
    if !product.image_url.is_empty() {
        let _ = writeln!(out, "│ Image: {}", product.image_url);
    }
    if let Some(url) = &product.product_url {
        let _ = writeln!(out, "│ Details: {url}");
    }
    out.push('└');
    out
}

/// Pure function of the projection.
pub fn render_cards(products: &[CanonicalProduct]) -> String {
    if products.is_empty() {
        return "No products match the current selection.".to_string();
    }
    products
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}
