use bson::{Document, doc};
use memorizz_datagen::{EMOTION_FIELD, Emotion, PARAGRAPH_INDEX_FIELD, PERSONA_NAME_FIELD};
use mongodb::sync::{Client, Collection};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{ParagraphQuery, ParagraphStore, id_string, persona_names};

/// MongoDB-backed store for one `database.collection` namespace.
///
/// Dropping the store shuts the client down, so every exit path of a caller
/// that owns a `MongoStore` closes the connection.
pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
    namespace: String,
}

impl MongoStore {
    /// Parses the URI and builds a client. The driver connects lazily; use
    /// [`ParagraphStore::ping`] to verify the server is reachable.
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).map_err(|e| StoreError::Connect(e.to_string()))?;
        let collection = client.database(database).collection::<Document>(collection);
        let namespace = format!("{database}.{}", collection.name());
        debug!(namespace = %namespace, "mongodb client created");

        Ok(Self {
            client,
            collection,
            namespace,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl ParagraphStore for MongoStore {
    fn ping(&mut self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .run()
            .map_err(|e| StoreError::Ping(e.to_string()))?;
        info!(namespace = %self.namespace, "ping ok");
        Ok(())
    }

    fn clear(&mut self) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_many(doc! {})
            .run()
            .map_err(|e| StoreError::operation("delete_many", e))?;
        Ok(result.deleted_count)
    }

    fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize, StoreError> {
        // The server rejects an empty batch.
        if docs.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .insert_many(docs)
            .run()
            .map_err(|e| StoreError::operation("insert_many", e))?;
        Ok(result.inserted_ids.len())
    }

    fn count(&mut self, emotion: Option<Emotion>) -> Result<u64, StoreError> {
        let filter = match emotion {
            Some(e) => doc! { EMOTION_FIELD: e.as_str() },
            None => doc! {},
        };
        self.collection
            .count_documents(filter)
            .run()
            .map_err(|e| StoreError::operation("count_documents", e))
    }

    fn insert_one(&mut self, doc: Document) -> Result<String, StoreError> {
        let result = self
            .collection
            .insert_one(doc)
            .run()
            .map_err(|e| StoreError::operation("insert_one", e))?;
        Ok(id_string(&result.inserted_id))
    }

    fn distinct_personas(&mut self) -> Result<Vec<String>, StoreError> {
        let values = self
            .collection
            .distinct(PERSONA_NAME_FIELD, doc! {})
            .run()
            .map_err(|e| StoreError::operation("distinct", e))?;
        Ok(persona_names(values))
    }

    fn find(&mut self, query: &ParagraphQuery) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection
            .find(query.filter())
            .sort(doc! { PARAGRAPH_INDEX_FIELD: 1 })
            .limit(query.limit as i64)
            .run()
            .map_err(|e| StoreError::operation("find", e))?;
        cursor
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::operation("find", e))
    }
}

impl Drop for MongoStore {
    fn drop(&mut self) {
        // Dropping the client alone does not reliably stop its background
        // tasks or close pooled connections.
        self.client.clone().shutdown().run();
        debug!(namespace = %self.namespace, "mongodb client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_rejects_malformed_uri() {
        let err = MongoStore::connect("http://localhost:27017", "memorizz", "paragraphs")
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::Connect(_)), "{err}");
    }

    #[test]
    fn drop_shuts_down_unused_client() {
        let store = MongoStore::connect(
            "mongodb://localhost:27017/?serverSelectionTimeoutMS=200",
            "memorizz",
            "paragraphs",
        )
        .unwrap();
        drop(store);
    }

    #[test]
    fn namespace_joins_database_and_collection() {
        let store =
            MongoStore::connect("mongodb://localhost:27017", "memorizz", "paragraphs").unwrap();
        assert_eq!(store.namespace(), "memorizz.paragraphs");
    }
}
