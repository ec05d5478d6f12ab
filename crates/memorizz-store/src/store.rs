use bson::{Bson, DateTime, Document, oid::ObjectId};
use memorizz_datagen::{BOOK_FIELD, EMOTION_FIELD, Emotion, PARAGRAPH_INDEX_FIELD, PERSONA_NAME_FIELD};

use crate::error::StoreError;

pub const DEFAULT_FIND_LIMIT: usize = 10;

/// Fields a hand-added paragraph must carry with a non-empty, non-zero value.
pub const REQUIRED_FIELDS: [&str; 5] = [
    BOOK_FIELD,
    PARAGRAPH_INDEX_FIELD,
    "paragraph",
    EMOTION_FIELD,
    "emotion_level",
];

/// Read-side filter. Results are ordered by ascending `paragraph_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphQuery {
    pub book: Option<String>,
    pub persona_name: Option<String>,
    /// Zero means unlimited.
    pub limit: usize,
}

impl Default for ParagraphQuery {
    fn default() -> Self {
        Self {
            book: None,
            persona_name: None,
            limit: DEFAULT_FIND_LIMIT,
        }
    }
}

impl ParagraphQuery {
    pub fn book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    pub fn persona(mut self, name: impl Into<String>) -> Self {
        self.persona_name = Some(name.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(book) = &self.book {
            filter.insert(BOOK_FIELD, book.as_str());
        }
        if let Some(name) = &self.persona_name {
            filter.insert(PERSONA_NAME_FIELD, name.as_str());
        }
        filter
    }
}

/// A single collection of paragraph documents.
///
/// Delete and insert are independent calls; nothing ties them into a
/// transaction, so a failure between `clear` and `insert_many` leaves the
/// collection empty.
pub trait ParagraphStore {
    /// Round-trips to the server without touching the collection.
    fn ping(&mut self) -> Result<(), StoreError>;

    /// Deletes every document, returning how many were removed.
    fn clear(&mut self) -> Result<u64, StoreError>;

    /// Inserts all documents in one batch, returning the number of ids assigned.
    fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize, StoreError>;

    /// Inserts one document, returning its `_id` as a string.
    fn insert_one(&mut self, doc: Document) -> Result<String, StoreError>;

    /// Counts documents, optionally restricted to one emotion.
    fn count(&mut self, emotion: Option<Emotion>) -> Result<u64, StoreError>;

    /// Non-blank persona names, sorted.
    fn distinct_personas(&mut self) -> Result<Vec<String>, StoreError>;

    fn find(&mut self, query: &ParagraphQuery) -> Result<Vec<Document>, StoreError>;
}

impl<S: ParagraphStore + ?Sized> ParagraphStore for &mut S {
    fn ping(&mut self) -> Result<(), StoreError> {
        (**self).ping()
    }

    fn clear(&mut self) -> Result<u64, StoreError> {
        (**self).clear()
    }

    fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize, StoreError> {
        (**self).insert_many(docs)
    }

    fn insert_one(&mut self, doc: Document) -> Result<String, StoreError> {
        (**self).insert_one(doc)
    }

    fn count(&mut self, emotion: Option<Emotion>) -> Result<u64, StoreError> {
        (**self).count(emotion)
    }

    fn distinct_personas(&mut self) -> Result<Vec<String>, StoreError> {
        (**self).distinct_personas()
    }

    fn find(&mut self, query: &ParagraphQuery) -> Result<Vec<Document>, StoreError> {
        (**self).find(query)
    }
}

pub(crate) fn persona_names(values: impl IntoIterator<Item = Bson>) -> Vec<String> {
    let mut names: Vec<String> = values
        .into_iter()
        .filter_map(|v| match v {
            Bson::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect();
    names.sort();
    names.dedup();
    names
}

pub(crate) fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: Option<&Bson>) -> bool {
    match value {
        None | Some(Bson::Null) => true,
        Some(Bson::String(s)) => s.is_empty(),
        Some(Bson::Int32(n)) => *n == 0,
        Some(Bson::Int64(n)) => *n == 0,
        Some(Bson::Double(n)) => *n == 0.0,
        Some(Bson::Boolean(b)) => !b,
        Some(_) => false,
    }
}

/// Validates a hand-written paragraph, fills optional fields, stamps
/// `created_at`, and inserts it.
pub fn add_paragraph<S: ParagraphStore + ?Sized>(
    store: &mut S,
    mut doc: Document,
) -> Result<String, StoreError> {
    if let Some(field) = REQUIRED_FIELDS.into_iter().find(|f| is_blank(doc.get(*f))) {
        return Err(StoreError::MissingField(field));
    }

    let now = DateTime::now();
    if is_blank(doc.get("id")) {
        let suffix = ObjectId::new().to_hex();
        doc.insert(
            "id",
            format!("para_{}_{}", now.timestamp_millis(), &suffix[15..]),
        );
    }
    for field in [PERSONA_NAME_FIELD, "persona_id", "justification"] {
        if is_blank(doc.get(field)) {
            doc.insert(field, "");
        }
    }
    doc.insert("created_at", now);

    store.insert_one(doc)
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn persona_names_drop_blanks_and_sort() {
        let values = vec![
            Bson::String("Legolas".into()),
            Bson::String("  ".into()),
            Bson::Null,
            Bson::String("Aragorn".into()),
            Bson::Int32(4),
            Bson::String("".into()),
            Bson::String("Gimli".into()),
        ];
        assert_eq!(persona_names(values), vec!["Aragorn", "Gimli", "Legolas"]);
    }

    #[test]
    fn query_filter_only_includes_set_fields() {
        assert_eq!(ParagraphQuery::default().filter(), doc! {});
        assert_eq!(ParagraphQuery::default().limit, 10);

        let query = ParagraphQuery::default().book("LOTR").persona("Gimli").limit(3);
        assert_eq!(
            query.filter(),
            doc! { "book": "LOTR", "persona_name": "Gimli" }
        );
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Bson::String(String::new()))));
        assert!(is_blank(Some(&Bson::Int32(0))));
        assert!(!is_blank(Some(&Bson::Int32(7))));
        assert!(!is_blank(Some(&Bson::String("x".into()))));
    }
}
