use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ImportError;

/// Agenda sources we can read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputFormat {
    Docx,
    PlainText,
    Unsupported,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Result of format detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDetection {
    pub mime_type: String,
    pub format: InputFormat,
    pub size_bytes: u64,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MAIN_PART: &str = "word/document.xml";

/// Detect the upload format from its bytes, never from the file name.
pub fn detect_format(bytes: &[u8]) -> Result<FormatDetection, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let (mime_type, format) = match bytes {
        // ZIP local file header: PK\x03\x04
        [0x50, 0x4B, 0x03, 0x04, ..] => {
            if has_main_part(bytes) {
                (DOCX_MIME.to_string(), InputFormat::Docx)
            } else {
                ("application/zip".to_string(), InputFormat::Unsupported)
            }
        }
        // Legacy OLE2 .doc
        [0xD0, 0xCF, 0x11, 0xE0, ..] => ("application/msword".to_string(), InputFormat::Unsupported),
        // PDF
        [0x25, 0x50, 0x44, 0x46, ..] => ("application/pdf".to_string(), InputFormat::Unsupported),
        _ if is_likely_text(bytes) => ("text/plain".to_string(), InputFormat::PlainText),
        _ => (
            "application/octet-stream".to_string(),
            InputFormat::Unsupported,
        ),
    };

    Ok(FormatDetection {
        mime_type,
        format,
        size_bytes: bytes.len() as u64,
    })
}

/// A ZIP is only a word-processing document if it carries the main part.
fn has_main_part(bytes: &[u8]) -> bool {
    match zip::ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive.file_names().any(|name| name == MAIN_PART),
        Err(_) => false,
    }
}

/// Valid UTF-8 and mostly printable
fn is_likely_text(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(4096)];
    let text = match std::str::from_utf8(sample) {
        Ok(t) => t,
        // Sample cut may split a multi-byte char
        Err(e) if e.valid_up_to() > 0 && sample.len() - e.valid_up_to() < 4 => {
            match std::str::from_utf8(&sample[..e.valid_up_to()]) {
                Ok(t) => t,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    printable as f64 / total as f64 > 0.80
}

/// Sanitize a filename: strip path components, limit length
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("agenda");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "agenda".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn detect_docx_by_main_part() {
        let bytes = zip_with(&[(MAIN_PART, "<w:document/>")]);
        let detection = detect_format(&bytes).unwrap();
        assert_eq!(detection.format, InputFormat::Docx);
        assert_eq!(detection.mime_type, DOCX_MIME);
        assert_eq!(detection.size_bytes, bytes.len() as u64);
    }

    #[test]
    fn plain_zip_is_unsupported() {
        let bytes = zip_with(&[("notes.txt", "hello")]);
        let detection = detect_format(&bytes).unwrap();
        assert_eq!(detection.format, InputFormat::Unsupported);
        assert_eq!(detection.mime_type, "application/zip");
    }

    #[test]
    fn detect_plain_text() {
        let detection = detect_format("MESYUARAT JKOSC BIL. 01/2026".as_bytes()).unwrap();
        assert_eq!(detection.format, InputFormat::PlainText);
    }

    #[test]
    fn pdf_and_legacy_doc_are_unsupported() {
        let pdf = detect_format(b"%PDF-1.7\n").unwrap();
        assert_eq!(pdf.format, InputFormat::Unsupported);
        let doc = detect_format(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1]).unwrap();
        assert_eq!(doc.format, InputFormat::Unsupported);
    }

    #[test]
    fn binary_noise_is_unsupported() {
        let bytes: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
        let detection = detect_format(&bytes).unwrap();
        assert_eq!(detection.format, InputFormat::Unsupported);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(detect_format(&[]), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn sanitize_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("agenda_bil1.docx"), "agenda_bil1.docx");
        assert_eq!(sanitize_filename(""), "agenda");
        assert_eq!(sanitize_filename("file\0name.docx"), "filename.docx");
    }
}
