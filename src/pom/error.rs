use std::fmt;

use crate::model::error::ModelError;

#[derive(Debug)]
pub enum GenerationError {
    /// Hierarchy text is not well-formed markup
    MalformedHierarchy { position: usize, message: String },

    /// Extraction produced no locator records (fatal for the model-assisted path only)
    NoLocatorsFound,

    /// Generative model call failed or returned something unusable
    Model(ModelError),

    /// Mode name did not match any generation mode
    UnsupportedMode(String),

    /// Strategy name did not match any strategy
    UnsupportedStrategy(String),

    /// Reading a hierarchy file or writing generated output failed
    Io { context: String, source: std::io::Error },
}

impl GenerationError {
    pub fn malformed(position: usize, message: impl Into<String>) -> Self {
        GenerationError::MalformedHierarchy {
            position,
            message: message.into(),
        }
    }

    /// Failures the fallback coordinator recovers from by switching to rule-based synthesis.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GenerationError::NoLocatorsFound | GenerationError::Model(_))
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MalformedHierarchy { position, message } => {
                write!(f, "Malformed hierarchy at byte {}: {}", position, message)
            }
            GenerationError::NoLocatorsFound => {
                write!(f, "No elements with usable locators found in hierarchy")
            }
            GenerationError::Model(e) => write!(f, "Model generation failed: {}", e),
            GenerationError::UnsupportedMode(mode) => {
                write!(f, "Unsupported generation mode '{}'", mode)
            }
            GenerationError::UnsupportedStrategy(strategy) => {
                write!(f, "Unsupported generation strategy '{}'", strategy)
            }
            GenerationError::Io { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Model(e) => Some(e),
            GenerationError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ModelError> for GenerationError {
    fn from(e: ModelError) -> Self {
        GenerationError::Model(e)
    }
}
