use std::path::Path;
use std::sync::Arc;

use super::content::{
    LetterContent, CHECKBOX, CLOSING, DECISION_OPTIONS, FINAL_DECISION_NOTICE, SALUTATION, TITLE,
};
use super::docx_writer::{Align, Cell, DocumentBuilder, Paragraph, Run, Table, TEXT_WIDTH};
use super::template::{fill_template, validate_template};
use super::RenderError;
use crate::config::LetterConfig;
use crate::models::{CaseFields, MeetingInfo};

/// Produces one letter document per case.
pub trait LetterRenderer {
    fn render(&self, content: &LetterContent) -> Result<Vec<u8>, RenderError>;
}

// ═══════════════════════════════════════════════════════════
// Blank canvas
// ═══════════════════════════════════════════════════════════

/// Lays the letter out from scratch.
pub struct BlankLetterRenderer;

impl BlankLetterRenderer {
    pub fn compose(&self, content: &LetterContent) -> DocumentBuilder {
        let mut doc = DocumentBuilder::new();

        doc.table(reference_block(content))
            .paragraph(Paragraph::empty())
            .table(info_table(content))
            .paragraph(Paragraph::rule())
            .paragraph(Paragraph::new(vec![Run::bold(TITLE)]))
            .paragraph(Paragraph::text(SALUTATION).spaced(6, 6))
            .paragraph(Paragraph::text(content.meeting_paragraph()).aligned(Align::Justify))
            .paragraph(Paragraph::empty())
            .table(decision_table())
            .paragraph(Paragraph::empty())
            .paragraph(Paragraph::text(FINAL_DECISION_NOTICE).aligned(Align::Justify))
            .paragraph(Paragraph::empty())
            .paragraph(Paragraph::text(CLOSING));

        doc
    }
}

impl LetterRenderer for BlankLetterRenderer {
    fn render(&self, content: &LetterContent) -> Result<Vec<u8>, RenderError> {
        self.compose(content).to_docx()
    }
}

/// Right-hand block with our reference and the date.
fn reference_block(content: &LetterContent) -> Table {
    let left = TEXT_WIDTH / 2;
    let lines = format!(
        "Rujukan Tuan : \nRujukan Kami : {}\nTarikh        : {}",
        content.reference, content.formatted_date
    );
    Table {
        columns: vec![left, TEXT_WIDTH - left],
        rows: vec![vec![
            Cell::new(vec![]),
            Cell::new(vec![Paragraph::text(lines).aligned(Align::Left)]),
        ]],
    }
}

/// Label, colon, value. Multi-line values get one paragraph per line.
fn info_table(content: &LetterContent) -> Table {
    let rows = content
        .info_rows()
        .iter()
        .map(|(label, value)| {
            let mut lines: Vec<Paragraph> = value.lines().map(Paragraph::text).collect();
            if lines.is_empty() {
                lines.push(Paragraph::empty());
            }
            vec![
                Cell::new(vec![Paragraph::new(vec![Run::bold(*label)])]),
                Cell::text(":"),
                Cell::new(lines),
            ]
        })
        .collect();

    Table {
        columns: vec![2400, 300, TEXT_WIDTH - 2700],
        rows,
    }
}

/// Two options per row, each behind an empty box. Nothing is ticked.
fn decision_table() -> Table {
    let option_width = (TEXT_WIDTH - 1200) / 2;
    let rows = DECISION_OPTIONS
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .flat_map(|option| {
                    [
                        Cell::new(vec![Paragraph::text(CHECKBOX).aligned(Align::Center)]),
                        Cell::new(vec![Paragraph::new(vec![Run::bold(*option)])]),
                    ]
                })
                .collect::<Vec<Cell>>()
        })
        .collect();

    Table {
        columns: vec![600, option_width, 600, option_width],
        rows,
    }
}

// ═══════════════════════════════════════════════════════════
// Template
// ═══════════════════════════════════════════════════════════

/// Fills a user-supplied `.docx` template. Each render works on its own copy.
#[derive(Clone)]
pub struct TemplateLetterRenderer {
    template: Arc<[u8]>,
}

impl TemplateLetterRenderer {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        validate_template(&bytes)?;
        Ok(Self {
            template: bytes.into(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let unreadable = |reason: String| RenderError::TemplateUnreadable {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        let renderer = Self::from_bytes(bytes).map_err(|e| unreadable(e.to_string()))?;

        tracing::info!(
            path = %path.display(),
            size_bytes = renderer.template.len(),
            "Letter template loaded"
        );

        Ok(renderer)
    }
}

impl LetterRenderer for TemplateLetterRenderer {
    fn render(&self, content: &LetterContent) -> Result<Vec<u8>, RenderError> {
        fill_template(&self.template, &content.substitutions())
    }
}

// ═══════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════

/// Template renderer when a template is configured, blank canvas otherwise.
pub fn renderer_for(
    config: &LetterConfig,
) -> Result<Box<dyn LetterRenderer + Send + Sync>, RenderError> {
    match &config.template_path {
        Some(path) => Ok(Box::new(TemplateLetterRenderer::from_path(path)?)),
        None => Ok(Box::new(BlankLetterRenderer)),
    }
}

/// Render the letter for one case.
pub fn render_letter(
    config: &LetterConfig,
    meeting: &MeetingInfo,
    case_index: u32,
    fields: &CaseFields,
) -> Result<Vec<u8>, RenderError> {
    let content = LetterContent::new(&config.institution_code, meeting, case_index, fields);
    renderer_for(config)?.render(&content)
}
