use super::docx::DocxLineExtractor;
use super::plain_text::PlainTextLineExtractor;
use super::types::{LineExtractor, LineSequence};
use super::ExtractionError;
use crate::pipeline::import::{detect_format, ImportError, InputFormat};

/// Pick the extractor for a detected format.
pub fn extractor_for(format: InputFormat) -> Option<Box<dyn LineExtractor + Send + Sync>> {
    match format {
        InputFormat::Docx => Some(Box::new(DocxLineExtractor)),
        InputFormat::PlainText => Some(Box::new(PlainTextLineExtractor)),
        InputFormat::Unsupported => None,
    }
}

/// Detect the upload format and produce its line sequence.
pub fn extract_lines(bytes: &[u8]) -> Result<LineSequence, ExtractionError> {
    let detection = detect_format(bytes)?;

    let extractor = extractor_for(detection.format)
        .ok_or_else(|| ImportError::UnsupportedFormat(detection.mime_type.clone()))?;

    let lines = extractor.extract(bytes)?;

    tracing::info!(
        format = detection.format.as_str(),
        size_bytes = detection.size_bytes,
        line_count = lines.len(),
        "Agenda lines extracted"
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::docx_with_body;

    #[test]
    fn docx_upload_is_routed_to_docx_extractor() {
        let bytes = docx_with_body("<w:p><w:r><w:t>BIL. 01/2026</w:t></w:r></w:p>");
        let lines = extract_lines(&bytes).unwrap();
        assert_eq!(lines.as_slice(), &["BIL. 01/2026"]);
    }

    #[test]
    fn text_upload_is_routed_to_plain_text_extractor() {
        let lines = extract_lines(b"BIL. 01/2026\n12 JANUARI 2026").unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn unsupported_upload_fails() {
        let err = extract_lines(b"%PDF-1.4 binary").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Import(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn empty_upload_fails() {
        let err = extract_lines(&[]).unwrap_err();
        assert!(matches!(err, ExtractionError::Import(ImportError::EmptyInput)));
    }
}
