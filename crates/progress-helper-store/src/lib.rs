//! # Progress Helper Store
//!
//! Small key-value persistence used to remember the last spec a user ran.

pub mod error;
pub mod last_spec;
pub mod store;

pub use error::StoreError;
pub use last_spec::LastSpec;
pub use store::{FileStore, KeyValueStore, MemoryStore};
