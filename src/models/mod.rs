//! Adapters over externally trained model artifacts.
//!
//! Artifacts are JSON exports of fitted parameters. They are read once, validated,
//! and then only ever used through [`TextVectorizer`] and [`Classifier`].

pub mod classifier;
mod error;
pub mod linear;
pub mod tree;
mod vector;
mod vectorizer;

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

pub use classifier::{Classifier, ClassifierArtifact, ClassifierModel};
pub use error::ModelError;
pub use vector::FeatureVector;
pub use vectorizer::{TextVectorizer, TfidfVectorizer};

pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = fs::read(path).map_err(|source| ModelError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = serde_json::from_slice(&raw).map_err(|source| ModelError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(target: "models", path = %path.display(), bytes = raw.len(), "artifact loaded");
    Ok(artifact)
}

pub fn load_classifier(path: &Path) -> Result<ClassifierArtifact, ModelError> {
    let artifact: ClassifierArtifact = load_artifact(path)?;
    artifact.validate()?;
    Ok(artifact)
}

pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, ModelError> {
    let vectorizer: TfidfVectorizer = load_artifact(path)?;
    vectorizer.validate()?;
    Ok(vectorizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_classifier(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::Unavailable { .. }));
        assert!(err.to_string().starts_with("model unavailable"));
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"\x80\x04\x95 pickle bytes").unwrap();
        let err = load_vectorizer(&path).unwrap_err();
        assert!(matches!(err, ModelError::Corrupt { .. }));
    }

    #[test]
    fn inconsistent_artifact_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(
            &path,
            r#"{"kind": "tree_ensemble", "classes": [0, 1], "n_features": 3, "trees": []}"#,
        )
        .unwrap();
        assert!(matches!(
            load_classifier(&path),
            Err(ModelError::Inconsistent(_))
        ));
    }
}
