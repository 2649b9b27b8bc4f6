use serde::Deserialize;

use super::{FeatureVector, ModelError};

#[derive(Debug, Clone, Deserialize)]
pub struct TreeNode {
    /// Split column; absent on leaves.
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: Option<usize>,
    #[serde(default)]
    pub right: Option<usize>,
    /// Class weights at this node, aligned with the ensemble's `classes`.
    #[serde(default)]
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn leaf(&self, features: &FeatureVector) -> &TreeNode {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            match (node.feature, node.left, node.right) {
                (Some(feature), Some(left), Some(right)) => {
                    idx = if features.get(feature) <= node.threshold {
                        left
                    } else {
                        right
                    };
                }
                _ => return node,
            }
        }
    }
}

/// Averaged class distribution over a forest of axis-aligned trees.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() || self.trees.is_empty() {
            return Err(ModelError::Inconsistent(
                "tree ensemble needs at least one class and one tree".into(),
            ));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Inconsistent(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                match (node.feature, node.left, node.right) {
                    (Some(feature), Some(left), Some(right)) => {
                        // children must point forward so traversal terminates
                        if feature >= self.n_features
                            || left <= n
                            || right <= n
                            || left >= tree.nodes.len()
                            || right >= tree.nodes.len()
                        {
                            return Err(ModelError::Inconsistent(format!(
                                "tree {t} node {n} has an invalid split"
                            )));
                        }
                    }
                    (None, None, None) => {
                        if node.value.len() != self.classes.len() {
                            return Err(ModelError::Inconsistent(format!(
                                "tree {t} leaf {n} has {} class weights, expected {}",
                                node.value.len(),
                                self.classes.len()
                            )));
                        }
                    }
                    _ => {
                        return Err(ModelError::Inconsistent(format!(
                            "tree {t} node {n} is a partial split"
                        )))
                    }
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> i64 {
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let value = &tree.leaf(features).value;
            let sum: f64 = value.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, weight) in totals.iter_mut().zip(value) {
                *total += weight / sum;
            }
        }

        let mut best = 0;
        for (idx, total) in totals.iter().enumerate() {
            if *total > totals[best] {
                best = idx;
            }
        }
        self.classes[best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        serde_json::from_value(serde_json::json!({
            "nodes": [
                {"feature": feature, "threshold": threshold, "left": 1, "right": 2},
                {"value": left},
                {"value": right}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn forest_votes_by_averaged_distribution() {
        let forest = TreeEnsemble {
            classes: vec![0, 1],
            n_features: 2,
            trees: vec![
                stump(0, 0.5, vec![10.0, 0.0], vec![0.0, 10.0]),
                stump(1, 50.0, vec![3.0, 1.0], vec![1.0, 3.0]),
                stump(1, 50.0, vec![4.0, 0.0], vec![2.0, 2.0]),
            ],
        };
        forest.validate().unwrap();
        assert_eq!(forest.predict(&FeatureVector::Dense(vec![0.0, 10.0])), 0);
        assert_eq!(forest.predict(&FeatureVector::Dense(vec![1.0, 90.0])), 1);
    }

    #[test]
    fn threshold_goes_left_on_equality() {
        let forest = TreeEnsemble {
            classes: vec![0, 1],
            n_features: 1,
            trees: vec![stump(0, 1.0, vec![1.0, 0.0], vec![0.0, 1.0])],
        };
        assert_eq!(forest.predict(&FeatureVector::Dense(vec![1.0])), 0);
    }

    #[test]
    fn rejects_backward_edges() {
        let tree: DecisionTree = serde_json::from_value(serde_json::json!({
            "nodes": [
                {"feature": 0, "threshold": 0.0, "left": 0, "right": 1},
                {"value": [1.0, 0.0]}
            ]
        }))
        .unwrap();
        let forest = TreeEnsemble {
            classes: vec![0, 1],
            n_features: 1,
            trees: vec![tree],
        };
        assert!(forest.validate().is_err());
    }
}
