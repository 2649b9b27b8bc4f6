pub mod error;
pub mod features;
pub mod types;

pub use error::PredictError;
pub use features::{FeatureName, FeatureRecord};
pub use types::{PhishingLabel, SpamLabel};
