/// Input handed to a [`super::Classifier`]: dense rows from the tabular path,
/// sparse term weights from the text path.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureVector {
    Dense(Vec<f64>),
    Sparse {
        dim: usize,
        /// `(column, value)` pairs sorted by column, no duplicates.
        entries: Vec<(usize, f64)>,
    },
}

impl FeatureVector {
    pub fn dim(&self) -> usize {
        match self {
            Self::Dense(values) => values.len(),
            Self::Sparse { dim, .. } => *dim,
        }
    }

    pub fn get(&self, column: usize) -> f64 {
        match self {
            Self::Dense(values) => values.get(column).copied().unwrap_or(0.0),
            Self::Sparse { entries, .. } => entries
                .binary_search_by_key(&column, |(idx, _)| *idx)
                .map(|pos| entries[pos].1)
                .unwrap_or(0.0),
        }
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        match self {
            Self::Dense(values) => values.iter().zip(weights).map(|(x, w)| x * w).sum(),
            Self::Sparse { entries, .. } => entries
                .iter()
                .filter_map(|(idx, value)| weights.get(*idx).map(|w| w * value))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_lookup_and_dot() {
        let v = FeatureVector::Sparse {
            dim: 5,
            entries: vec![(1, 2.0), (4, 0.5)],
        };
        assert_eq!(v.get(1), 2.0);
        assert_eq!(v.get(2), 0.0);
        assert_eq!(v.dot(&[1.0, 1.0, 1.0, 1.0, 4.0]), 4.0);
        assert_eq!(v.dim(), 5);
    }

    #[test]
    fn dense_out_of_range_reads_zero() {
        let v = FeatureVector::Dense(vec![1.0, 2.0]);
        assert_eq!(v.get(9), 0.0);
        assert_eq!(v.dot(&[3.0, 4.0]), 11.0);
    }
}
