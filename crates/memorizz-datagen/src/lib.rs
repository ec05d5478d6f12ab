mod vocab;

pub use vocab::{BOOK, Emotion, PARAGRAPHS, Persona, UnknownEmotion};

use bson::doc;
use chrono::{Local, NaiveDate};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const EMOTION_FIELD: &str = "emotion";
pub const PERSONA_NAME_FIELD: &str = "persona_name";
pub const BOOK_FIELD: &str = "book";
pub const PARAGRAPH_INDEX_FIELD: &str = "paragraph_index";

/// One synthetic paragraph with its emotional annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphDocument {
    pub id: String,
    pub persona_name: String,
    pub persona_id: String,
    pub book: String,
    pub paragraph_index: i32,
    pub paragraph: String,
    pub emotion: Emotion,
    pub emotion_level: i32,
    pub justification: String,
}

impl ParagraphDocument {
    /// The `_id` is left for the store to assign.
    pub fn to_document(&self) -> bson::Document {
        doc! {
            "id": self.id.as_str(),
            PERSONA_NAME_FIELD: self.persona_name.as_str(),
            "persona_id": self.persona_id.as_str(),
            BOOK_FIELD: self.book.as_str(),
            PARAGRAPH_INDEX_FIELD: self.paragraph_index,
            "paragraph": self.paragraph.as_str(),
            EMOTION_FIELD: self.emotion.as_str(),
            "emotion_level": self.emotion_level,
            "justification": self.justification.as_str(),
        }
    }
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

pub fn justification<R: Rng + ?Sized>(rng: &mut R, emotion: Emotion, level: i32) -> String {
    let templates = emotion.templates();
    pick(rng, &templates).replace("{level}", &level.to_string())
}

/// Builds the `seq`-th document of a batch stamped with `date`.
pub fn generate_document<R: Rng + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    seq: usize,
) -> ParagraphDocument {
    let persona = *pick(rng, &Persona::ALL);
    let suffix: u32 = rng.gen_range(1000..=9999);
    let emotion = *pick(rng, &Emotion::ALL);
    let emotion_level = rng.gen_range(1..=10);

    ParagraphDocument {
        id: format!("para_{}_{:04}", date.format("%Y%m%d"), seq),
        persona_name: persona.name().to_string(),
        persona_id: format!("persona_{}_{}", persona.slug(), suffix),
        book: BOOK.to_string(),
        paragraph_index: rng.gen_range(1..=100),
        paragraph: pick(rng, &PARAGRAPHS).to_string(),
        emotion,
        emotion_level,
        justification: justification(rng, emotion, emotion_level),
    }
}

pub fn generate_documents<R: Rng + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    count: usize,
) -> Vec<ParagraphDocument> {
    (0..count)
        .map(|seq| generate_document(rng, date, seq))
        .collect()
}

/// Owns the random source and batch date for one seeding run.
pub struct ParagraphGenerator<R = ThreadRng> {
    rng: R,
    date: NaiveDate,
}

impl ParagraphGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng(), Local::now().date_naive())
    }
}

impl Default for ParagraphGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphGenerator<StdRng> {
    pub fn seeded(seed: u64, date: NaiveDate) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), date)
    }
}

impl<R: Rng> ParagraphGenerator<R> {
    pub fn with_rng(rng: R, date: NaiveDate) -> Self {
        Self { rng, date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn generate(&mut self, count: usize) -> Vec<ParagraphDocument> {
        generate_documents(&mut self.rng, self.date, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn generates_requested_count() {
        let mut generator = ParagraphGenerator::seeded(7, date());
        assert_eq!(generator.generate(50).len(), 50);
        assert!(generator.generate(0).is_empty());
    }

    #[test]
    fn ids_are_date_and_sequence() {
        let docs = ParagraphGenerator::seeded(1, date()).generate(12);
        assert_eq!(docs[0].id, "para_20240309_0000");
        assert_eq!(docs[11].id, "para_20240309_0011");
    }

    #[test]
    fn fields_stay_in_range() {
        let docs = ParagraphGenerator::seeded(42, date()).generate(500);
        for doc in &docs {
            assert!((1..=10).contains(&doc.emotion_level), "{doc:?}");
            assert!((1..=100).contains(&doc.paragraph_index), "{doc:?}");
            assert!(Emotion::ALL.contains(&doc.emotion));
            assert!(PARAGRAPHS.contains(&doc.paragraph.as_str()));
            assert_eq!(doc.book, "LOTR");
        }
    }

    #[test]
    fn persona_id_contains_normalized_name() {
        let docs = ParagraphGenerator::seeded(3, date()).generate(200);
        for doc in &docs {
            let persona = Persona::from_name(&doc.persona_name)
                .unwrap_or_else(|| panic!("unexpected persona: {}", doc.persona_name));
            let prefix = format!("persona_{}_", persona.slug());
            assert!(doc.persona_id.starts_with(&prefix), "{}", doc.persona_id);

            let suffix: u32 = doc.persona_id[prefix.len()..].parse().unwrap();
            assert!((1000..=9999).contains(&suffix));
        }
    }

    #[test]
    fn justification_mentions_level() {
        let docs = ParagraphGenerator::seeded(11, date()).generate(200);
        for doc in &docs {
            assert!(
                doc.justification.contains(&doc.emotion_level.to_string()),
                "{doc:?}"
            );
            let rendered: Vec<String> = doc
                .emotion
                .templates()
                .iter()
                .map(|t| t.replace("{level}", &doc.emotion_level.to_string()))
                .collect();
            assert!(rendered.contains(&doc.justification));
        }
    }

    #[test]
    fn seeded_generators_are_deterministic() {
        let a = ParagraphGenerator::seeded(99, date()).generate(20);
        let b = ParagraphGenerator::seeded(99, date()).generate(20);
        assert_eq!(a, b);
    }

    #[test]
    fn document_has_expected_fields() {
        let doc = ParagraphGenerator::seeded(5, date()).generate(1).remove(0);
        let bson_doc = doc.to_document();

        assert!(!bson_doc.contains_key("_id"));
        assert_eq!(bson_doc.get_str("id").unwrap(), "para_20240309_0000");
        assert_eq!(bson_doc.get_str("persona_name").unwrap(), doc.persona_name);
        assert_eq!(bson_doc.get_str("book").unwrap(), "LOTR");
        assert_eq!(bson_doc.get_str("emotion").unwrap(), doc.emotion.as_str());
        assert_eq!(bson_doc.get_i32("emotion_level").unwrap(), doc.emotion_level);
        assert_eq!(
            bson_doc.get_i32("paragraph_index").unwrap(),
            doc.paragraph_index
        );

        for field in [
            EMOTION_FIELD,
            PERSONA_NAME_FIELD,
            BOOK_FIELD,
            PARAGRAPH_INDEX_FIELD,
        ] {
            assert!(bson_doc.contains_key(field), "missing {field}");
        }

        let back: ParagraphDocument = bson::from_document(bson_doc).unwrap();
        assert_eq!(back, doc);
    }
}
