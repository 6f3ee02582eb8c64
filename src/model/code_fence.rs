use crate::model::error::ModelError;

const FENCE: &str = "```";

/// Result of looking for a fenced code block in a model answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceExtraction {
    /// Contents of a closed fenced block (a `java` block wins over others)
    Extracted(String),
    /// No fence at all; the whole answer, trimmed
    NotFenced(String),
    /// A fence was opened but never closed
    Unterminated,
}

struct Block<'a> {
    tag: String,
    lines: Vec<&'a str>,
}

/// Scan a model answer line by line for fenced code blocks.
///
/// A fence line starts with three backticks (leading whitespace allowed); the
/// text after the backticks on the opening line is the language tag. The
/// block ends at the next line ending with a fence; text before that fence
/// belongs to the block.
pub fn extract_code(response: &str) -> FenceExtraction {
    let mut closed: Vec<Block> = Vec::new();
    let mut open: Option<Block> = None;

    for line in response.lines() {
        let trimmed = line.trim();
        match open.take() {
            None => {
                if let Some(tag) = trimmed.strip_prefix(FENCE) {
                    open = Some(Block {
                        tag: tag.trim().to_ascii_lowercase(),
                        lines: Vec::new(),
                    });
                }
            }
            Some(mut block) => {
                // A fence may close right after the last code line: `}```.
                if let Some(code) = line.trim_end().strip_suffix(FENCE) {
                    if !code.trim().is_empty() {
                        block.lines.push(code);
                    }
                    closed.push(block);
                } else {
                    block.lines.push(line);
                    open = Some(block);
                }
            }
        }
    }

    let chosen = closed
        .iter()
        .position(|b| b.tag == "java")
        .or_else(|| (!closed.is_empty()).then_some(0));

    match chosen {
        Some(idx) => FenceExtraction::Extracted(closed[idx].lines.join("\n").trim().to_string()),
        None if open.is_some() => FenceExtraction::Unterminated,
        None => FenceExtraction::NotFenced(response.trim().to_string()),
    }
}

impl FenceExtraction {
    /// The usable code, or the model failure this extraction represents.
    pub fn into_code(self) -> Result<String, ModelError> {
        match self {
            FenceExtraction::Extracted(code) | FenceExtraction::NotFenced(code) => {
                if code.is_empty() {
                    Err(ModelError::EmptyCode)
                } else {
                    Ok(code)
                }
            }
            FenceExtraction::Unterminated => Err(ModelError::UnterminatedFence),
        }
    }
}
