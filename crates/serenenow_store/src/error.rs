use serenenow_common::CoreError;
use thiserror::Error;

/// Errors raised by the local persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted payload could not be (de)serialized
    #[error("Store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Storage(err.to_string())
    }
}
