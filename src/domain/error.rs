use thiserror::Error;

use crate::models::ModelError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    #[error(transparent)]
    Model(#[from] ModelError),
}
