mod error;
mod mongo;
mod store;

pub use error::StoreError;
pub use mongo::MongoStore;
pub use store::{
    DEFAULT_FIND_LIMIT, ParagraphQuery, ParagraphStore, REQUIRED_FIELDS, add_paragraph,
};

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::{MemoryStore, Op};
