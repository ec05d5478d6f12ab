pub mod config;
pub mod error;
pub mod populate;
pub mod report;

pub use config::SeedConfig;
pub use error::{ConfigError, SeedError};
pub use populate::{populate, run, run_with};
pub use report::SeedReport;
