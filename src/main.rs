use showroom_catalogue::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, load_config};
use showroom_catalogue::fetcher::{DocumentFetcher, HttpFetcher};
use showroom_catalogue::render::render_cards;
use showroom_catalogue::view::{CatalogueView, spawn_load};

use std::env;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    let brands = match config.resolve_brands() {
        Ok(b) => b,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher: Arc<dyn DocumentFetcher> = match HttpFetcher::from_config(&config) {
        Ok(f) => Arc::new(f),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let view = Arc::new(Mutex::new(CatalogueView::from_config(&config.view)));
    info!("Loading catalogue from {}...", config.base_url);
    if let Err(e) = spawn_load(view.clone(), fetcher, brands).await {
        warn!("Catalogue load task failed: {}", e);
    }

    let view = view.lock().await;
    if let Some(message) = view.message() {
        println!("{message}");
        return;
    }

    let brands = view.available_brands();
    let listed: Vec<String> = brands
        .iter()
        .map(|(id, has_products)| if *has_products { id.clone() } else { format!("{id} (unavailable)") })
        .collect();
    println!("Brands: {}", listed.join(", "));

    let selection = &view.selection;
    println!(
        "Showing {} | type={} | query=\"{}\" | sort={:?}",
        selection.brand.as_deref().unwrap_or("-"),
        selection.params.type_filter,
        selection.params.query,
        selection.params.sort,
    );
    println!("{}", render_cards(&view.projection()));
}
