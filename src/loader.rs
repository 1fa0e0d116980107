use crate::config::BrandSource;
use crate::fetcher::DocumentFetcher;
use crate::model::{BrandOutcome, Catalogue, CatalogueStatus};
use crate::normalizer::normalize;

use chrono::Utc;
use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

/// Fetches every declared document concurrently and waits for all of them to settle.
///
/// Each brand resolves independently: its primary document if that fetch was
/// fulfilled, else its fallback if one is declared and fulfilled, else an empty
/// list. A failing brand never affects the others and never surfaces as an error;
/// see [`Catalogue::status`] for the all-brands-failed signal.
pub async fn load_catalogue(fetcher: &dyn DocumentFetcher, brands: &[BrandSource]) -> Catalogue {
    info!("Loading catalogue for {} brands...", brands.len());

    let primaries = join_all(brands.iter().map(|b| fetch_settled(fetcher, &b.primary)));
    let fallbacks = join_all(brands.iter().map(|b| async move {
        match &b.fallback {
            Some(url) => fetch_settled(fetcher, url).await,
            None => None,
        }
    }));
    let (primary_docs, fallback_docs) = futures::join!(primaries, fallbacks);

    let mut catalogue = Catalogue {
        brands: IndexMap::with_capacity(brands.len()),
        outcomes: IndexMap::with_capacity(brands.len()),
        loaded_at: Utc::now(),
    };

    for ((brand, primary), fallback) in brands.iter().zip(primary_docs).zip(fallback_docs) {
        let (outcome, products) = match (primary, fallback) {
            (Some(doc), _) => (BrandOutcome::Primary, normalize(&doc)),
            (None, Some(doc)) => {
                info!("Brand {}: primary failed, using fallback document", brand.id);
                (BrandOutcome::Fallback, normalize(&doc))
            }
            (None, None) => {
                warn!("Brand {}: no usable document, showing no products", brand.id);
                (BrandOutcome::Failed, Vec::new())
            }
        };
        info!("Brand {}: {} products ({:?})", brand.id, products.len(), outcome);
        catalogue.brands.insert(brand.id.clone(), products);
        catalogue.outcomes.insert(brand.id.clone(), outcome);
    }

    if catalogue.status() == CatalogueStatus::Unavailable {
        warn!("Catalogue unavailable: every brand failed to load");
    } else {
        info!("Catalogue loaded at {}", catalogue.loaded_at.to_rfc3339());
    }
    catalogue
}

/// Any failure (transport, status, JSON) settles as `None`.
async fn fetch_settled(fetcher: &dyn DocumentFetcher, url: &str) -> Option<Value> {
    match fetcher.fetch_json(url).await {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("Fetch failed: {}", e);
            None
        }
    }
}
