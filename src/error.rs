//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FixSuggestion for CanvasError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            CanvasError::Terminal(_) => {
                Some("Run from an interactive terminal that supports raw mode")
            }
            CanvasError::Serialize(_) => None,
        }
    }
}
