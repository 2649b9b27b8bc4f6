use crate::{
    config::ModelConfig,
    domain::{features::FEATURE_COUNT, FeatureName, FeatureRecord, PhishingLabel, PredictError},
    models::{self, Classifier, FeatureVector, ModelError},
};

use super::{extractor, PageFetcher};

pub struct PhishingPredictor {
    classifier: Box<dyn Classifier>,
    fetcher: PageFetcher,
}

impl PhishingPredictor {
    /// Rejects classifiers whose column layout differs from [`FeatureName::ALL`].
    pub fn new(classifier: Box<dyn Classifier>, fetcher: PageFetcher) -> Result<Self, ModelError> {
        if classifier.n_features() != FEATURE_COUNT {
            return Err(ModelError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: classifier.n_features(),
            });
        }
        if let Some(names) = classifier.feature_names() {
            for (column, (expected, actual)) in FeatureName::ALL.iter().zip(names).enumerate() {
                if expected.as_str() != actual {
                    return Err(ModelError::Inconsistent(format!(
                        "phishing model column {column} is {actual:?}, expected {expected}"
                    )));
                }
            }
        }
        Ok(Self {
            classifier,
            fetcher,
        })
    }

    pub fn load(config: &ModelConfig, fetcher: PageFetcher) -> Result<Self, ModelError> {
        let classifier = models::load_classifier(&config.phishing_model_path())?;
        tracing::info!(target: "models", "phishing classifier loaded");
        Self::new(Box::new(classifier), fetcher)
    }

    /// Fetches the page once and builds its feature record.
    pub async fn extract_features(&self, url: &str) -> Result<FeatureRecord, PredictError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PredictError::MalformedInput("url is empty"));
        }
        let page = self.fetcher.fetch(url).await;
        Ok(extractor::extract_features(url, page.as_ref()))
    }

    pub fn predict_record(&self, record: &FeatureRecord) -> Result<PhishingLabel, PredictError> {
        let row = FeatureVector::Dense(record.to_row());
        let class = self.classifier.predict(&row)?;
        Ok(PhishingLabel::from_class(class))
    }

    pub async fn predict_phishing(&self, url: &str) -> Result<PhishingLabel, PredictError> {
        let record = self.extract_features(url).await?;
        let label = self.predict_record(&record)?;
        tracing::info!(target: "phishing", url = url.trim(), label = %label, "url classified");
        Ok(label)
    }
}
