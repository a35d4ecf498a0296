use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    /// A required input is missing or malformed. The user corrects it and retries.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The order store rejected the write. Cart and form are left untouched.
    #[error("Submission error: {0}")]
    Submission(String),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    /// The order store could not be read.
    #[error("Load error: {0}")]
    Load(String),
    #[error("Geocode error: {0}")]
    Geocode(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
