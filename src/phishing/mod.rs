pub mod extractor;
pub mod fetcher;
pub mod lexical;
pub mod predictor;

pub use extractor::extract_features;
pub use fetcher::{FetchedPage, PageFetcher};
pub use predictor::PhishingPredictor;
