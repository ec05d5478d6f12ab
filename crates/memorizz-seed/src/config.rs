use crate::error::ConfigError;

pub const URI_VAR: &str = "MONGODB_URI";
pub const DATABASE_VAR: &str = "MEMORIZZ_DATABASE";
pub const COLLECTION_VAR: &str = "MEMORIZZ_COLLECTION";
pub const COUNT_VAR: &str = "MEMORIZZ_DOCUMENT_COUNT";

pub const DEFAULT_DATABASE: &str = "memorizz";
pub const DEFAULT_COLLECTION: &str = "paragraphs";
pub const DEFAULT_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub count: usize,
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. An empty URI counts
    /// as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let uri = lookup(URI_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingUri)?;

        let database = lookup(DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.into());
        let collection = lookup(COLLECTION_VAR).unwrap_or_else(|| DEFAULT_COLLECTION.into());

        let count = match lookup(COUNT_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidCount {
                    key: COUNT_VAR,
                    value,
                    source,
                })?,
            None => DEFAULT_COUNT,
        };

        Ok(Self {
            uri,
            database,
            collection,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = SeedConfig::from_lookup(lookup(&[(URI_VAR, "mongodb://db:27017")])).unwrap();
        assert_eq!(
            config,
            SeedConfig {
                uri: "mongodb://db:27017".into(),
                database: "memorizz".into(),
                collection: "paragraphs".into(),
                count: 50,
            }
        );
    }

    #[test]
    fn overrides_apply() {
        let config = SeedConfig::from_lookup(lookup(&[
            (URI_VAR, "mongodb://db:27017"),
            (DATABASE_VAR, "scratch"),
            (COLLECTION_VAR, "paras"),
            (COUNT_VAR, " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.database, "scratch");
        assert_eq!(config.collection, "paras");
        assert_eq!(config.count, 7);
    }

    #[test]
    fn missing_or_blank_uri() {
        let err = SeedConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingUri));

        let err = SeedConfig::from_lookup(lookup(&[(URI_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingUri));
    }

    #[test]
    fn invalid_count() {
        let err = SeedConfig::from_lookup(lookup(&[
            (URI_VAR, "mongodb://db:27017"),
            (COUNT_VAR, "fifty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCount { .. }));
        assert!(err.to_string().starts_with("invalid MEMORIZZ_DOCUMENT_COUNT \"fifty\""));
    }
}
