use std::process::ExitCode;

use memorizz_seed::{ConfigError, SeedError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is fine; the variables may already be exported.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match memorizz_seed::run() {
        Ok(report) => {
            tracing::info!(total = report.total, "seeding complete");
            ExitCode::SUCCESS
        }
        Err(SeedError::Config(ConfigError::MissingUri)) => {
            println!("Error: MONGODB_URI not found in environment variables.");
            println!("Please create a .env file with your MongoDB Atlas connection string.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "seeding failed");
            println!("Error: {e}");
            println!("Please check your MongoDB URI and network connection.");
            ExitCode::FAILURE
        }
    }
}
