// UI-side state: selections, load status, and the retirement flag for in-flight loads
use crate::config::{BrandSource, ViewConfig};
use crate::fetcher::DocumentFetcher;
use crate::loader::load_catalogue;
use crate::model::{BrandId, CanonicalProduct, Catalogue, CatalogueStatus};
use crate::query::{QueryParams, SortOrder, TypeFilter, project};

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const UNAVAILABLE_MESSAGE: &str = "Catalogue is currently unavailable. Please try again later.";

#[derive(Debug, Clone)]
pub enum LoadStatus {
    Loading,
    Loaded(Catalogue),
    Unavailable,
}

/// The four independent selections. Switching brand leaves the query params alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub brand: Option<BrandId>,
    pub params: QueryParams,
}

#[derive(Debug)]
pub struct CatalogueView {
    pub status: LoadStatus,
    pub selection: Selection,
    retired: bool,
}

impl CatalogueView {
    pub fn new(selection: Selection) -> Self {
        Self {
            status: LoadStatus::Loading,
            selection,
            retired: false,
        }
    }

    pub fn from_config(view: &ViewConfig) -> Self {
        Self::new(Selection {
            brand: view.brand.clone(),
            params: view.params(),
        })
    }

    /// Tears the view down; a load still in flight will not be applied.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Replaces the status wholesale. Returns `false` if the view was retired.
    pub fn apply(&mut self, catalogue: Catalogue) -> bool {
        if self.retired {
            debug!("View retired before load finished, discarding catalogue");
            return false;
        }
        self.status = match catalogue.status() {
            CatalogueStatus::Available => {
                if self.selection.brand.is_none() {
                    self.selection.brand = first_non_empty_brand(&catalogue);
                }
                LoadStatus::Loaded(catalogue)
            }
            CatalogueStatus::Unavailable => LoadStatus::Unavailable,
        };
        true
    }

    pub fn select_brand(&mut self, brand: impl Into<BrandId>) {
        self.selection.brand = Some(brand.into());
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.selection.params.type_filter = type_filter;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.selection.params.query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.selection.params.sort = sort;
    }

    pub fn toggle_sort(&mut self) {
        self.selection.params.sort = self.selection.params.sort.toggled();
    }

    /// Brands paired with whether they have anything to show.
    pub fn available_brands(&self) -> Vec<(BrandId, bool)> {
        match &self.status {
            LoadStatus::Loaded(catalogue) => catalogue
                .brands
                .iter()
                .map(|(id, products)| (id.clone(), !products.is_empty()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Projection of the selected brand; empty while loading or unavailable.
    pub fn projection(&self) -> Vec<CanonicalProduct> {
        match (&self.status, &self.selection.brand) {
            (LoadStatus::Loaded(catalogue), Some(brand)) => {
                project(catalogue.products(brand), &self.selection.params)
            }
            _ => Vec::new(),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            LoadStatus::Unavailable => Some(UNAVAILABLE_MESSAGE),
            _ => None,
        }
    }
}

fn first_non_empty_brand(catalogue: &Catalogue) -> Option<BrandId> {
    catalogue
        .brands
        .iter()
        .find(|(_, products)| !products.is_empty())
        .or_else(|| catalogue.brands.first())
        .map(|(id, _)| id.clone())
}

/// Runs one page load in the background and applies it unless the view was retired meanwhile.
pub fn spawn_load(
    view: Arc<Mutex<CatalogueView>>,
    fetcher: Arc<dyn DocumentFetcher>,
    brands: Vec<BrandSource>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        view.lock().await.status = LoadStatus::Loading;
        let catalogue = load_catalogue(fetcher.as_ref(), &brands).await;
        if view.lock().await.apply(catalogue) {
            info!("Catalogue applied to view.");
        }
    })
}
