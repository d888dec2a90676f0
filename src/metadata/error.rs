use std::error::Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("unable to determine the instance id for metric dimensions")]
    MissingInstanceId,

    // Allows wrapping any error the deployment metadata client produces
    #[error(transparent)]
    Dynamic(#[from] Box<dyn Error + Send + Sync>),
}
