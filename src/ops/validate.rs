/// Fewest characters a trimmed transcript may have
pub const MIN_TRANSCRIPT_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a transcript with at least {min} characters (got {actual})")]
    TranscriptTooShort { min: usize, actual: usize },
}

/// Check a transcript before it is submitted. Returns the trimmed text,
/// which is what gets sent.
pub fn validate_transcript(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    let actual = trimmed.chars().count();
    if actual < MIN_TRANSCRIPT_CHARS {
        return Err(ValidationError::TranscriptTooShort {
            min: MIN_TRANSCRIPT_CHARS,
            actual,
        });
    }
    Ok(trimmed)
}
