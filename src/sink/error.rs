use std::error::Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("metrics backend rejected the payload: {0}")]
    Rejected(String),

    // Allows wrapping any transport error the backend client produces
    #[error(transparent)]
    Dynamic(#[from] Box<dyn Error + Send + Sync>),
}

impl From<std::io::Error> for SinkError {
    fn from(value: std::io::Error) -> Self {
        SinkError::Dynamic(Box::new(value))
    }
}
