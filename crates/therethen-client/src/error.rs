use thiserror::Error;

use therethen_net::{ApiError, StreamError};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    /// An area was requested from the drawing before anything was drawn.
    #[error("No area has been drawn")]
    NoDrawnArea,

    #[error("Not signed in")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, ClientError>;
