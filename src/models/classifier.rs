use serde::Deserialize;

use super::{linear::LinearModel, tree::TreeEnsemble, FeatureVector, ModelError};

pub trait Classifier: Send + Sync {
    /// Class code predicted for a single sample.
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError>;

    fn n_features(&self) -> usize;

    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

/// A classifier artifact as exported by the training toolchain.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierArtifact {
    #[serde(flatten)]
    pub model: ClassifierModel,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl ClassifierArtifact {
    pub fn validate(&self) -> Result<(), ModelError> {
        match &self.model {
            ClassifierModel::Linear(model) => model.validate()?,
            ClassifierModel::TreeEnsemble(model) => model.validate()?,
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features() {
                return Err(ModelError::Inconsistent(format!(
                    "{} feature names for a model over {} features",
                    names.len(),
                    self.n_features()
                )));
            }
        }
        Ok(())
    }
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        let expected = self.n_features();
        if features.dim() != expected {
            return Err(ModelError::DimensionMismatch {
                expected,
                actual: features.dim(),
            });
        }
        Ok(match &self.model {
            ClassifierModel::Linear(model) => model.predict(features),
            ClassifierModel::TreeEnsemble(model) => model.predict(features),
        })
    }

    fn n_features(&self) -> usize {
        match &self.model {
            ClassifierModel::Linear(model) => model.n_features(),
            ClassifierModel::TreeEnsemble(model) => model.n_features,
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_linear_artifact() {
        let artifact: ClassifierArtifact = serde_json::from_str(
            r#"{"kind": "linear", "classes": [0, 1], "intercept": [0.5], "coef": [[1.0, -1.0]],
                "feature_names": ["a", "b"]}"#,
        )
        .unwrap();
        artifact.validate().unwrap();
        assert_eq!(artifact.n_features(), 2);
        assert_eq!(artifact.feature_names().unwrap(), ["a", "b"]);
        assert_eq!(
            artifact.predict(&FeatureVector::Dense(vec![0.0, 0.0])).unwrap(),
            1
        );
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let artifact: ClassifierArtifact = serde_json::from_str(
            r#"{"kind": "linear", "classes": [0, 1], "intercept": [0.0], "coef": [[1.0]]}"#,
        )
        .unwrap();
        let err = artifact
            .predict(&FeatureVector::Dense(vec![1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let parsed = serde_json::from_str::<ClassifierArtifact>(r#"{"kind": "svm_rbf"}"#);
        assert!(parsed.is_err());
    }
}
