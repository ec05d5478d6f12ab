#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect: {0}")]
    Connect(String),

    #[error("ping failed: {0}")]
    Ping(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{op} failed: {message}")]
    Operation { op: &'static str, message: String },
}

impl StoreError {
    pub fn operation(op: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Operation {
            op,
            message: err.to_string(),
        }
    }
}
