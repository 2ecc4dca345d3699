use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::types::{LineExtractor, LineSequence};
use super::ExtractionError;

const MAIN_PART: &str = "word/document.xml";

/// Reads WordprocessingML paragraphs out of a `.docx` package.
///
/// Body paragraphs come first, in document order. Paragraphs inside tables
/// follow, in table, row, then cell order. Soft line breaks inside a paragraph
/// split it into separate lines.
pub struct DocxLineExtractor;

impl LineExtractor for DocxLineExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<LineSequence, ExtractionError> {
        let xml = read_main_part(bytes)?;
        let (body, tables) = walk_paragraphs(&xml)?;

        tracing::debug!(
            body_lines = body.len(),
            table_lines = tables.len(),
            "DOCX paragraphs collected"
        );

        Ok(LineSequence::from_raw(body.into_iter().chain(tables)))
    }
}

fn read_main_part(bytes: &[u8]) -> Result<Vec<u8>, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = match archive.by_name(MAIN_PART) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Err(ExtractionError::MissingMainPart),
        Err(e) => return Err(e.into()),
    };
    let mut xml = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut xml)?;
    Ok(xml)
}

/// Stream `document.xml` and return (body lines, table lines).
fn walk_paragraphs(xml: &[u8]) -> Result<(Vec<String>, Vec<String>), ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut body = Vec::new();
    let mut tables = Vec::new();

    // Text boxes nest paragraphs inside a paragraph's run.
    let mut paragraphs: Vec<String> = Vec::new();
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;
    // mc:Fallback repeats the mc:Choice content for old readers.
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(ExtractionError::Xml(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth += 1,
                _ if fallback_depth > 0 => {}
                b"tbl" => table_depth += 1,
                b"p" => paragraphs.push(String::new()),
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                b"tab" if run_depth > 0 => push_text(&mut paragraphs, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_text(&mut paragraphs, "\n"),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                _ if fallback_depth > 0 => {}
                b"p" => emit(String::new(), table_depth, &mut body, &mut tables),
                b"tab" if run_depth > 0 => push_text(&mut paragraphs, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_text(&mut paragraphs, "\n"),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text && fallback_depth == 0 => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Xml(e.to_string()))?;
                push_text(&mut paragraphs, &text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                _ if fallback_depth > 0 => {}
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => {
                    if let Some(text) = paragraphs.pop() {
                        emit(text, table_depth, &mut body, &mut tables);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((body, tables))
}

fn push_text(paragraphs: &mut [String], text: &str) {
    if let Some(current) = paragraphs.last_mut() {
        current.push_str(text);
    }
}

fn emit(text: String, table_depth: usize, body: &mut Vec<String>, tables: &mut Vec<String>) {
    let target = if table_depth > 0 { tables } else { body };
    target.extend(text.split('\n').map(str::to_string));
}
