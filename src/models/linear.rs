use serde::Deserialize;

use super::{FeatureVector, ModelError};

/// Linear decision function `intercept[k] + coef[k] · x`.
///
/// A single coefficient row is a binary model whose positive side is `classes[1]`;
/// with one row per class the highest score wins. Multinomial naive Bayes exports
/// into the multi-row form (log priors as intercepts, log likelihoods as rows).
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<i64>,
    pub intercept: Vec<f64>,
    pub coef: Vec<Vec<f64>>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coef.is_empty() {
            return Err(ModelError::Inconsistent("linear model has no coefficients".into()));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ModelError::Inconsistent(format!(
                "linear model has {} coefficient rows but {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let width = self.n_features();
        if self.coef.iter().any(|row| row.len() != width) {
            return Err(ModelError::Inconsistent("ragged coefficient matrix".into()));
        }
        let expected_classes = if self.coef.len() == 1 { 2 } else { self.coef.len() };
        if self.classes.len() != expected_classes {
            return Err(ModelError::Inconsistent(format!(
                "linear model with {} rows needs {expected_classes} classes, got {}",
                self.coef.len(),
                self.classes.len()
            )));
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> i64 {
        if self.coef.len() == 1 {
            let score = self.intercept[0] + features.dot(&self.coef[0]);
            return if score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, (row, bias)) in self.coef.iter().zip(&self.intercept).enumerate() {
            let score = bias + features.dot(row);
            if score > best_score {
                best = idx;
                best_score = score;
            }
        }
        self.classes[best]
    }
}
