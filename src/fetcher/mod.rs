// Document fetching: the trait seam and its reqwest-backed implementation

pub mod http;
pub mod traits;

pub use http::HttpFetcher;
pub use traits::DocumentFetcher;
