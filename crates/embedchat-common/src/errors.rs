use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("disk persistence requested without a durable store")]
    MissingDurableStore,

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("storage path error: {0}")]
    PathError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("unknown bridge method: {0}")]
    UnknownMethod(String),

    #[error("invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("malformed bridge payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("disk persistence requires a durable store, none was supplied")]
    MissingDurableStore,

    #[error("invalid session configuration: {0}")]
    InvalidConfig(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::MissingDurableStore => Self::MissingDurableStore,
            other => Self::InvalidConfig(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedChatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
