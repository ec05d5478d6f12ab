use bson::{Bson, Document, oid::ObjectId};
use memorizz_datagen::{EMOTION_FIELD, Emotion, PARAGRAPH_INDEX_FIELD, PERSONA_NAME_FIELD};

use crate::error::StoreError;
use crate::store::{ParagraphQuery, ParagraphStore, id_string, persona_names};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Ping,
    Clear,
    InsertMany,
    InsertOne,
    Count,
    Distinct,
    Find,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Op::Ping => "ping",
            Op::Clear => "delete_many",
            Op::InsertMany => "insert_many",
            Op::InsertOne => "insert_one",
            Op::Count => "count_documents",
            Op::Distinct => "distinct",
            Op::Find => "find",
        }
    }
}

/// In-process store that records every call made against it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Vec<Document>,
    ops: Vec<Op>,
    fail_on: Option<Op>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call of `op` fail.
    pub fn failing_on(op: Op) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    pub fn with_documents(mut self, docs: Vec<Document>) -> Self {
        self.docs = docs;
        self
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn operations(&self) -> &[Op] {
        &self.ops
    }

    fn push(&mut self, mut doc: Document) -> String {
        if !doc.contains_key("_id") {
            doc.insert("_id", ObjectId::new());
        }
        let id = doc.get("_id").map(id_string).unwrap_or_default();
        self.docs.push(doc);
        id
    }

    fn record(&mut self, op: Op) -> Result<(), StoreError> {
        self.ops.push(op);
        if self.fail_on == Some(op) {
            let message = "injected failure";
            return Err(match op {
                Op::Ping => StoreError::Ping(message.into()),
                _ => StoreError::operation(op.name(), message),
            });
        }
        Ok(())
    }
}

impl ParagraphStore for MemoryStore {
    fn ping(&mut self) -> Result<(), StoreError> {
        self.record(Op::Ping)
    }

    fn clear(&mut self) -> Result<u64, StoreError> {
        self.record(Op::Clear)?;
        let deleted = self.docs.len() as u64;
        self.docs.clear();
        Ok(deleted)
    }

    fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize, StoreError> {
        self.record(Op::InsertMany)?;
        let inserted = docs.len();
        for doc in docs {
            self.push(doc);
        }
        Ok(inserted)
    }

    fn insert_one(&mut self, doc: Document) -> Result<String, StoreError> {
        self.record(Op::InsertOne)?;
        Ok(self.push(doc))
    }

    fn count(&mut self, emotion: Option<Emotion>) -> Result<u64, StoreError> {
        self.record(Op::Count)?;
        let n = match emotion {
            Some(e) => self
                .docs
                .iter()
                .filter(|d| d.get_str(EMOTION_FIELD).ok() == Some(e.as_str()))
                .count(),
            None => self.docs.len(),
        };
        Ok(n as u64)
    }

    fn distinct_personas(&mut self) -> Result<Vec<String>, StoreError> {
        self.record(Op::Distinct)?;
        Ok(persona_names(
            self.docs.iter().filter_map(|d| d.get(PERSONA_NAME_FIELD).cloned()),
        ))
    }

    fn find(&mut self, query: &ParagraphQuery) -> Result<Vec<Document>, StoreError> {
        self.record(Op::Find)?;
        let filter = query.filter();
        let mut found: Vec<&Document> = self
            .docs
            .iter()
            .filter(|d| filter.iter().all(|(k, v)| d.get(k) == Some(v)))
            .collect();
        // Stable, so ties keep insertion order.
        found.sort_by_key(|d| match d.get(PARAGRAPH_INDEX_FIELD) {
            Some(Bson::Int32(n)) => i64::from(*n),
            Some(Bson::Int64(n)) => *n,
            _ => i64::MAX,
        });
        let limit = if query.limit == 0 { found.len() } else { query.limit };
        Ok(found.into_iter().take(limit).cloned().collect())
    }
}
