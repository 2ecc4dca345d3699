use super::types::{LineExtractor, LineSequence};
use super::ExtractionError;

/// Reads a UTF-8 text agenda, one line per text line.
pub struct PlainTextLineExtractor;

impl LineExtractor for PlainTextLineExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<LineSequence, ExtractionError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractionError::EncodingError(e.to_string()))?;
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        Ok(LineSequence::from_raw(text.lines()))
    }
}
