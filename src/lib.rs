pub mod config;
pub mod fetcher;
pub mod loader;
pub mod model;
pub mod normalizer;
pub mod query;
pub mod render;
pub mod view;

pub use fetcher::{DocumentFetcher, HttpFetcher};
pub use loader::load_catalogue;
pub use model::{CanonicalProduct, Catalogue, ProductType};
pub use normalizer::normalize;
pub use query::{QueryParams, SortOrder, TypeFilter, project};
