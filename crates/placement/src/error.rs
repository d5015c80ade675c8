use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacementError>;

#[derive(Error, Debug)]
pub enum PlacementError {
    /// Empty or unparseable snippet, bad configuration or selection
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// Patch target missing at write time
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PlacementError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
