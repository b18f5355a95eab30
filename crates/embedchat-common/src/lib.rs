pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, EmbedChatError, SessionError, StorageError};
pub use id::{new_id, SessionId};
pub use types::{Appearance, Color, LanguageTag, PersistenceMode};

pub type Result<T> = std::result::Result<T, EmbedChatError>;
