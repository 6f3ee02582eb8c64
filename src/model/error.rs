use std::fmt;

#[derive(Debug)]
pub enum ModelError {
    /// HTTP transport failed (connect, timeout, body read)
    Transport(reqwest::Error),

    /// Endpoint answered with a non-success status and no structured error
    Status { code: u16, body: String },

    /// Endpoint reported an error message in its response body
    Api(String),

    /// Response body did not have the expected shape
    UnexpectedResponse(String),

    /// Model answered but the extracted code was empty
    EmptyCode,

    /// Model opened a code fence and never closed it (truncated answer)
    UnterminatedFence,

    /// No model is configured for this generator
    Unavailable(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Transport(e) => write!(f, "transport error: {}", e),
            ModelError::Status { code, body } => {
                write!(f, "endpoint returned HTTP {}: {}", code, truncate(body, 200))
            }
            ModelError::Api(msg) => write!(f, "LLM error: {}", msg),
            ModelError::UnexpectedResponse(msg) => write!(f, "unexpected LLM response: {}", msg),
            ModelError::EmptyCode => write!(f, "LLM response contained no code"),
            ModelError::UnterminatedFence => write!(f, "LLM response has an unterminated code block"),
            ModelError::Unavailable(reason) => write!(f, "model unavailable: {}", reason),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        ModelError::Transport(e)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
