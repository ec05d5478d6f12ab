use memorizz_datagen::{Emotion, ParagraphDocument, ParagraphGenerator};
use memorizz_store::{MongoStore, ParagraphStore, StoreError};
use rand::Rng;
use tracing::info;

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::report::SeedReport;

/// Replaces the contents of `store` with `count` freshly generated documents
/// and reads back the collection statistics.
///
/// Steps run in order and the first failure aborts the rest. Nothing makes
/// the delete and insert atomic.
pub fn populate<S, R>(
    store: &mut S,
    generator: &mut ParagraphGenerator<R>,
    count: usize,
) -> Result<SeedReport, StoreError>
where
    S: ParagraphStore + ?Sized,
    R: Rng,
{
    store.ping()?;
    info!("connected");
    reseed(store, generator, count)
}

/// Everything `populate` does after the ping.
fn reseed<S, R>(
    store: &mut S,
    generator: &mut ParagraphGenerator<R>,
    count: usize,
) -> Result<SeedReport, StoreError>
where
    S: ParagraphStore + ?Sized,
    R: Rng,
{
    let deleted = store.clear()?;
    info!(deleted, "cleared existing documents");

    let docs: Vec<bson::Document> = generator
        .generate(count)
        .iter()
        .map(ParagraphDocument::to_document)
        .collect();
    info!(count = docs.len(), date = %generator.date(), "generated documents");

    let inserted = store.insert_many(docs)?;
    info!(inserted, "inserted documents");

    let total = store.count(None)?;
    let unique_personas = store.distinct_personas()?.len();
    let mut emotions = Vec::with_capacity(Emotion::ALL.len());
    for emotion in Emotion::ALL {
        emotions.push((emotion, store.count(Some(emotion))?));
    }

    Ok(SeedReport {
        deleted,
        inserted,
        total,
        unique_personas,
        emotions,
    })
}

/// Seeds the configured MongoDB collection using the process environment.
pub fn run() -> Result<SeedReport, SeedError> {
    run_with(
        |key| std::env::var(key).ok(),
        |config| MongoStore::connect(&config.uri, &config.database, &config.collection),
    )
}

/// Reads config from `lookup`, opens a store with `connect`, and populates it.
///
/// `connect` is never called when the config is invalid. Once it returns a
/// store, that store is dropped before this function returns on every path.
pub fn run_with<L, S, F>(lookup: L, connect: F) -> Result<SeedReport, SeedError>
where
    L: Fn(&str) -> Option<String>,
    S: ParagraphStore,
    F: FnOnce(&SeedConfig) -> Result<S, StoreError>,
{
    let config = SeedConfig::from_lookup(lookup)?;

    println!("Connecting to MongoDB...");
    let mut store = connect(&config)?;
    let result = seed_connected(&mut store, &config);

    drop(store);
    println!("\nConnection closed.");

    Ok(result?)
}

fn seed_connected<S: ParagraphStore>(
    store: &mut S,
    config: &SeedConfig,
) -> Result<SeedReport, StoreError> {
    store.ping()?;
    println!("Successfully connected to MongoDB!");
    println!("Using database: {}", config.database);
    info!(
        database = %config.database,
        collection = %config.collection,
        count = config.count,
        "populating collection"
    );

    let report = reseed(store, &mut ParagraphGenerator::new(), config.count)?;
    print!("{report}");
    Ok(report)
}
