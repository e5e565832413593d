use std::path::PathBuf;

use thiserror::Error;

use crate::model::EntityId;

/// Errors raised by world construction, lookups and config loading.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("entity id {0} is already registered")]
    DuplicateEntity(EntityId),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("invalid input script: {0}")]
    InvalidScript(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Read a RON file and deserialize it, tagging failures with the path.
pub(crate) fn read_ron<T, P>(path: P) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| GameError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
