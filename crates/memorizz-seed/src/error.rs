use memorizz_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MONGODB_URI not found in environment variables.")]
    MissingUri,

    #[error("invalid {key} {value:?}: {source}")]
    InvalidCount {
        key: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
