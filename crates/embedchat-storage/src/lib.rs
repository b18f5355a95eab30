//! Conversation key/value storage.
//!
//! The chat page keeps small pieces of conversation state (ids, cursors,
//! drafts) through the bridge. `KeyValueStore` holds them per agent in one
//! of three modes; in disk mode every write is mirrored to a
//! [`DurableStore`], by default the JSON-file backed [`FileStore`].

pub mod durable;
pub mod paths;
pub mod store;

pub use durable::{DurableStore, FileStore};
pub use store::{storage_namespace, KeyValueStore, SharedStore, STORAGE_PREFIX};
