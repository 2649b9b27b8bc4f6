pub mod normalizer;
pub mod predictor;

pub use normalizer::normalize_text;
pub use predictor::SpamPredictor;
