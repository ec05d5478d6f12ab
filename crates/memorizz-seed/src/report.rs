use std::fmt;

use memorizz_datagen::{BOOK, Emotion};

/// Outcome of one populate run, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub deleted: u64,
    pub inserted: usize,
    pub total: u64,
    pub unique_personas: usize,
    /// Per-emotion counts in `Emotion::ALL` order.
    pub emotions: Vec<(Emotion, u64)>,
}

impl SeedReport {
    pub fn emotion_count(&self, emotion: Emotion) -> u64 {
        self.emotions
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} existing documents.", self.deleted)?;
        writeln!(f, "Successfully inserted {} documents!", self.inserted)?;
        writeln!(f)?;
        writeln!(f, "Collection statistics:")?;
        writeln!(f, "Total documents: {}", self.total)?;
        writeln!(f, "Unique personas: {}", self.unique_personas)?;
        writeln!(f, "Book: {BOOK}")?;
        writeln!(f, "Emotion distribution:")?;
        for (emotion, count) in &self.emotions {
            writeln!(f, "  - {emotion}: {count} documents")?;
        }
        Ok(())
    }
}
