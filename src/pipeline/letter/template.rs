use std::io::{Cursor, Read, Write};
use std::ops::RangeInclusive;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use zip::ZipWriter;

use super::docx_writer::write_run_text;
use super::RenderError;
use crate::pipeline::archive::entry_options;

const MAIN_PART: &str = "word/document.xml";

/// Check that `bytes` is a package this module can fill.
pub fn validate_template(bytes: &[u8]) -> Result<(), RenderError> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    if archive.file_names().any(|name| name == MAIN_PART) {
        Ok(())
    } else {
        Err(RenderError::MissingMainPart)
    }
}

/// Produce a new package from `template` with every `{{MARKER}}` replaced.
///
/// The template bytes are only read. Body, header and footer parts are
/// filled; every other part is copied unchanged.
pub fn fill_template(
    template: &[u8],
    substitutions: &[(&str, String)],
) -> Result<Vec<u8>, RenderError> {
    validate_template(template)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(template))?;
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    let mut filled = 0usize;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if entry.is_dir() {
            out.add_directory(name, entry_options())?;
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        if is_fillable_part(&name) {
            let (xml, count) = fill_part(&bytes, substitutions)?;
            filled += count;
            bytes = xml;
        }

        out.start_file(name, entry_options())?;
        out.write_all(&bytes)?;
    }

    tracing::debug!(paragraphs = filled, "Template placeholders filled");

    Ok(out.finish()?.into_inner())
}

fn is_fillable_part(name: &str) -> bool {
    name == MAIN_PART
        || ((name.starts_with("word/header") || name.starts_with("word/footer"))
            && name.ends_with(".xml"))
}

// ═══════════════════════════════════════════════════════════
// Paragraph rewriting
// ═══════════════════════════════════════════════════════════

/// Stream one XML part, rewriting paragraphs that hold a placeholder.
///
/// Returns the new part and the number of paragraphs rewritten.
pub fn fill_part(
    xml: &[u8],
    substitutions: &[(&str, String)],
) -> Result<(Vec<u8>, usize), RenderError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut buf = Vec::new();

    // Events of the outermost open paragraph
    let mut pending: Vec<Event<'static>> = Vec::new();
    let mut depth = 0usize;
    let mut rewritten = 0usize;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(event) => event.into_owned(),
            Err(e) => {
                return Err(RenderError::Xml(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        };
        buf.clear();

        if depth == 0 {
            if is_start_of(&event, b"p") {
                depth = 1;
                pending.push(event);
            } else {
                writer.write_event(event)?;
            }
            continue;
        }

        if is_start_of(&event, b"p") {
            depth += 1;
        } else if is_end_of(&event, b"p") {
            depth -= 1;
        }
        pending.push(event);

        if depth == 0 && flush_paragraph(std::mem::take(&mut pending), substitutions, &mut writer)? {
            rewritten += 1;
        }
    }

    // Unclosed paragraph at end of input: keep it as it was
    for event in pending {
        writer.write_event(event)?;
    }

    Ok((writer.into_inner(), rewritten))
}

/// Write one buffered paragraph, rewritten if its text holds a placeholder.
fn flush_paragraph(
    events: Vec<Event<'static>>,
    substitutions: &[(&str, String)],
    writer: &mut Writer<Vec<u8>>,
) -> Result<bool, RenderError> {
    let text = paragraph_text(&events)?;
    let has_placeholder = substitutions.iter().any(|(key, _)| text.contains(key));
    let nested = events.iter().filter(|e| is_start_of(e, b"p")).count() > 1;

    if !has_placeholder || nested {
        if has_placeholder {
            tracing::warn!("Placeholder inside a text box paragraph left unfilled");
        }
        for event in events {
            writer.write_event(event)?;
        }
        return Ok(false);
    }

    let mut filled = text;
    for (key, value) in substitutions {
        filled = filled.replace(key, value);
    }

    let (paragraph_props, run_props) = locate_props(&events);

    writer.write_event(&events[0])?;
    if let Some(range) = paragraph_props {
        for event in &events[range] {
            writer.write_event(event)?;
        }
    }
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    if let Some(range) = run_props {
        for event in &events[range] {
            writer.write_event(event)?;
        }
    }
    write_run_text(writer, &filled)?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    if let Some(last) = events.last() {
        writer.write_event(last)?;
    }

    Ok(true)
}

/// Visible text of a paragraph, with breaks as `\n` and tabs as `\t`.
fn paragraph_text(events: &[Event<'static>]) -> Result<String, RenderError> {
    let mut text = String::new();
    let mut in_text = false;
    let mut run_depth = 0usize;

    for event in events {
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if run_depth > 0 => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                text.push_str(&t.unescape()?);
            }
            _ => {}
        }
    }

    Ok(text)
}

/// Ranges of the paragraph's `w:pPr` and of the first run's `w:rPr`.
fn locate_props(
    events: &[Event<'static>],
) -> (Option<RangeInclusive<usize>>, Option<RangeInclusive<usize>>) {
    let mut paragraph_props = None;
    let mut run_props = None;
    let mut run_depth = 0usize;
    let mut i = 1;

    while i < events.len() {
        match &events[i] {
            Event::Start(e) | Event::Empty(e) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"pPr" if run_depth == 0 && paragraph_props.is_none() => {
                        let end = subtree_end(events, i);
                        paragraph_props = Some(i..=end);
                        i = end;
                    }
                    b"rPr" if run_depth > 0 && run_props.is_none() => {
                        let end = subtree_end(events, i);
                        run_props = Some(i..=end);
                        i = end;
                    }
                    b"r" if matches!(events[i], Event::Start(_)) => run_depth += 1,
                    _ => {}
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"r" => {
                run_depth = run_depth.saturating_sub(1);
            }
            _ => {}
        }
        i += 1;
    }

    (paragraph_props, run_props)
}

/// Index of the event closing the element opened at `start`.
fn subtree_end(events: &[Event<'static>], start: usize) -> usize {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate().skip(start) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 {
            return i;
        }
    }
    events.len().saturating_sub(1)
}

fn is_start_of(event: &Event<'_>, local: &[u8]) -> bool {
    matches!(event, Event::Start(e) if e.local_name().as_ref() == local)
}

fn is_end_of(event: &Event<'_>, local: &[u8]) -> bool {
    matches!(event, Event::End(e) if e.local_name().as_ref() == local)
}
