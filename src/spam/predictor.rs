use crate::{
    config::ModelConfig,
    domain::{PredictError, SpamLabel},
    models::{self, Classifier, ModelError, TextVectorizer},
};

use super::normalize_text;

pub struct SpamPredictor {
    vectorizer: Box<dyn TextVectorizer>,
    classifier: Box<dyn Classifier>,
}

impl SpamPredictor {
    pub fn new(
        vectorizer: Box<dyn TextVectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ModelError> {
        if vectorizer.dim() != classifier.n_features() {
            return Err(ModelError::Inconsistent(format!(
                "spam vectorizer yields {} columns but classifier expects {}",
                vectorizer.dim(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Loads both spam artifacts; either one missing aborts construction.
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let vectorizer = models::load_vectorizer(&config.spam_vectorizer_path())?;
        let classifier = models::load_classifier(&config.spam_model_path())?;
        tracing::info!(
            target: "models",
            vocabulary = vectorizer.dim(),
            "spam vectorizer and classifier loaded"
        );
        Self::new(Box::new(vectorizer), Box::new(classifier))
    }

    pub fn predict_text(&self, text: &str) -> Result<SpamLabel, PredictError> {
        if text.trim().is_empty() {
            return Err(PredictError::MalformedInput("mail text is empty"));
        }
        let normalized = normalize_text(text);
        let features = self.vectorizer.transform(&normalized);
        let class = self.classifier.predict(&features)?;
        let label = SpamLabel::from_class(class);
        tracing::debug!(target: "spam", class, label = %label, chars = normalized.len(), "mail classified");
        Ok(label)
    }

    pub fn predict_mail(&self, text: &str) -> Result<bool, PredictError> {
        self.predict_text(text).map(SpamLabel::is_spam)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, fs};

    use super::*;
    use crate::models::{linear::LinearModel, ClassifierArtifact, ClassifierModel, TfidfVectorizer};

    const SPAM_WORDS: [&str; 4] = ["free", "won", "claim", "iphone"];
    const HAM_WORDS: [&str; 3] = ["meeting", "tomorrow", "agenda"];

    fn fixture() -> SpamPredictor {
        let vocabulary: HashMap<String, usize> = SPAM_WORDS
            .iter()
            .chain(HAM_WORDS.iter())
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
        let width = vocabulary.len();
        let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0; width]);

        // class 0 is spam, class 1 is ham
        let spam_row: Vec<f64> = (0..width).map(|i| if i < 4 { -0.5 } else { -4.0 }).collect();
        let ham_row: Vec<f64> = (0..width).map(|i| if i < 4 { -4.0 } else { -0.5 }).collect();
        let classifier = ClassifierArtifact {
            model: ClassifierModel::Linear(LinearModel {
                classes: vec![0, 1],
                intercept: vec![(0.3f64).ln(), (0.7f64).ln()],
                coef: vec![spam_row, ham_row],
            }),
            feature_names: None,
        };
        SpamPredictor::new(Box::new(vectorizer), Box::new(classifier)).unwrap()
    }

    #[test]
    fn class_zero_maps_to_spam() {
        let predictor = fixture();
        let text = "Congratulations! You've won a free iPhone. Click here to claim now.";
        assert!(predictor.predict_mail(text).unwrap());
        assert_eq!(predictor.predict_text(text).unwrap().as_str(), "spam");
    }

    #[test]
    fn ham_is_not_spam() {
        let predictor = fixture();
        let label = predictor
            .predict_text("Agenda for the meeting tomorrow is attached.")
            .unwrap();
        assert_eq!(label, SpamLabel::NotSpam);
        assert_eq!(label.to_string(), "not spam");
    }

    #[test]
    fn casing_and_punctuation_do_not_change_label() {
        let predictor = fixture();
        let variants = [
            "Congratulations! You've won a free iPhone. Click here to claim now.",
            "CONGRATULATIONS!!! you've WON a FREE iphone... click here to claim now",
            "congratulations youve won a free iphone click here to claim now https://win.example/now",
        ];
        let labels: Vec<_> = variants
            .iter()
            .map(|text| predictor.predict_text(text).unwrap())
            .collect();
        assert!(labels.iter().all(|label| *label == labels[0]));
    }

    #[test]
    fn empty_text_is_malformed() {
        let predictor = fixture();
        assert!(matches!(
            predictor.predict_mail("  \n\t"),
            Err(PredictError::MalformedInput(_))
        ));
    }

    #[test]
    fn load_fails_when_vectorizer_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("spam_model.json"),
            r#"{"kind": "linear", "classes": [0, 1], "intercept": [0.0], "coef": [[1.0]]}"#,
        )
        .unwrap();
        let config = ModelConfig {
            models_dir: dir.path().to_string_lossy().into_owned(),
            spam_model_file: "spam_model.json".into(),
            spam_vectorizer_file: "spam_vectorizer.json".into(),
            phishing_model_file: "phishing_model.json".into(),
        };

        let err = SpamPredictor::load(&config).err().expect("load must fail");
        assert!(matches!(err, ModelError::Unavailable { .. }));
    }

    #[test]
    fn load_rejects_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vec.json"),
            r#"{"vocabulary": {"free": 0, "prize": 1}, "idf": [1.0, 1.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("nb.json"),
            r#"{"kind": "linear", "classes": [0, 1], "intercept": [0.0], "coef": [[1.0, 1.0, 1.0]]}"#,
        )
        .unwrap();
        let config = ModelConfig {
            models_dir: dir.path().to_string_lossy().into_owned(),
            spam_model_file: "nb.json".into(),
            spam_vectorizer_file: "vec.json".into(),
            phishing_model_file: "unused.json".into(),
        };

        assert!(matches!(
            SpamPredictor::load(&config),
            Err(ModelError::Inconsistent(_))
        ));
    }
}
