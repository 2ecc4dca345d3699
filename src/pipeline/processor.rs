//! Agenda processing orchestrator.
//!
//! Single entry point that drives the whole pipeline for one upload:
//! extract lines → parse meeting → segment cases → extract fields →
//! render letters → build archive.
//!
//! Nothing is kept between calls. The renderer is injected as a trait
//! object so the orchestrator runs the same with the blank canvas, a
//! configured template, or a test double.

use serde::Serialize;
use uuid::Uuid;

use crate::config::{AppConfig, LetterConfig, PipelineConfig};
use crate::models::{CaseBlock, CaseCategory, CaseFields, MeetingInfo};
use crate::pipeline::agenda::{extract_fields, parse_meeting, segment_cases, AgendaError};
use crate::pipeline::archive::{build_archive, ArchiveEntry, ArchiveError};
use crate::pipeline::diagnostic::{DumpStage, RunDump};
use crate::pipeline::extraction::{extract_lines, ExtractionError};
use crate::pipeline::letter::{renderer_for, LetterContent, LetterRenderer, RenderError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while processing an agenda.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Could not read the agenda: {0}")]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Agenda(#[from] AgendaError),

    #[error("Letter rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Archive build failed: {0}")]
    Archive(#[from] ArchiveError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One retained case as shown for confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub sequence_index: u32,
    pub paper_code: String,
    pub category: CaseCategory,
    /// Reference Number the letter for this case will carry.
    pub reference: String,
    pub fields: CaseFields,
}

/// What the agenda yields, before any letter is produced.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaPreview {
    pub meeting: MeetingInfo,
    pub line_count: usize,
    pub cases: Vec<CaseSummary>,
    /// Paper codes of headers whose category gets no letter.
    pub discarded_headers: Vec<String>,
}

/// The download bundle for one agenda.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArchive {
    pub file_name: String,
    /// Letter file names, in archive order.
    pub letters: Vec<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Result of a generate run. Zero retained cases is not an error but
/// produces nothing to download.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    NoCases {
        meeting: MeetingInfo,
        discarded_headers: Vec<String>,
    },
    Archive(GeneratedArchive),
}

/// Intermediate state shared by preview and generate.
struct ParsedAgenda {
    meeting: MeetingInfo,
    line_count: usize,
    cases: Vec<(CaseBlock, CaseFields)>,
    discarded_headers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs the agenda pipeline. Holds configuration only, no per-run state.
pub struct AgendaProcessor {
    renderer: Box<dyn LetterRenderer + Send + Sync>,
    letter: LetterConfig,
    pipeline: PipelineConfig,
}

impl AgendaProcessor {
    pub fn new(
        renderer: Box<dyn LetterRenderer + Send + Sync>,
        letter: LetterConfig,
        pipeline: PipelineConfig,
    ) -> Self {
        Self {
            renderer,
            letter,
            pipeline,
        }
    }

    /// Build with the renderer the configuration asks for.
    ///
    /// Fails when a configured template cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, RenderError> {
        let renderer = renderer_for(&config.letter)?;
        Ok(Self::new(
            renderer,
            config.letter.clone(),
            config.pipeline.clone(),
        ))
    }

    /// Parse the agenda and report what would be generated.
    pub fn preview(&self, bytes: &[u8]) -> Result<AgendaPreview, ProcessingError> {
        let parsed = self.parse(bytes)?;

        let cases = parsed
            .cases
            .into_iter()
            .map(|(block, fields)| CaseSummary {
                reference: self.content_for(&parsed.meeting, &block, &fields).reference.to_string(),
                sequence_index: block.sequence_index,
                paper_code: block.paper_code,
                category: block.category,
                fields,
            })
            .collect();

        Ok(AgendaPreview {
            meeting: parsed.meeting,
            line_count: parsed.line_count,
            cases,
            discarded_headers: parsed.discarded_headers,
        })
    }

    /// Full pipeline: one letter per retained case, bundled into a ZIP.
    pub fn generate(&self, bytes: &[u8]) -> Result<GenerationOutcome, ProcessingError> {
        let parsed = self.parse(bytes)?;

        if parsed.cases.is_empty() {
            tracing::info!(
                meeting = %parsed.meeting.meeting_label,
                discarded = parsed.discarded_headers.len(),
                "No retained cases, nothing to generate"
            );
            return Ok(GenerationOutcome::NoCases {
                meeting: parsed.meeting,
                discarded_headers: parsed.discarded_headers,
            });
        }

        let mut entries = Vec::with_capacity(parsed.cases.len());
        for (block, fields) in &parsed.cases {
            let content = self.content_for(&parsed.meeting, block, fields);
            let bytes = self.renderer.render(&content)?;
            tracing::debug!(
                case_index = block.sequence_index,
                file_name = %content.file_name(),
                size_bytes = bytes.len(),
                "Letter rendered"
            );
            entries.push(ArchiveEntry {
                file_name: content.file_name(),
                bytes,
            });
        }

        let archive = build_archive(&entries)?;
        let file_name = parsed.meeting.archive_file_name();

        tracing::info!(
            file_name = %file_name,
            letters = entries.len(),
            size_bytes = archive.len(),
            "Letters generated"
        );

        Ok(GenerationOutcome::Archive(GeneratedArchive {
            file_name,
            letters: entries.into_iter().map(|e| e.file_name).collect(),
            bytes: archive,
        }))
    }

    fn parse(&self, bytes: &[u8]) -> Result<ParsedAgenda, ProcessingError> {
        let run_id = Uuid::new_v4();
        let dump = RunDump::open(self.pipeline.dump_dir.as_deref(), &run_id);

        let lines = extract_lines(bytes)?;
        dump.stage(DumpStage::Lines, &lines);

        let meeting = parse_meeting(&lines, self.pipeline.scan_lines)?;
        dump.stage(DumpStage::Meeting, &meeting);

        let segmentation = segment_cases(&lines);
        dump.stage(DumpStage::Cases, &segmentation);

        let cases: Vec<(CaseBlock, CaseFields)> = segmentation
            .cases
            .into_iter()
            .map(|block| {
                let fields = extract_fields(&block);
                (block, fields)
            })
            .collect();
        if dump.is_enabled() {
            let fields: Vec<&CaseFields> = cases.iter().map(|(_, f)| f).collect();
            dump.stage(DumpStage::Fields, &fields);
        }

        tracing::info!(
            run_id = %run_id,
            meeting = %meeting.meeting_label,
            date = %meeting.formatted_date,
            lines = lines.len(),
            cases = cases.len(),
            dump_dir = ?dump.dir(),
            "Agenda parsed"
        );

        Ok(ParsedAgenda {
            meeting,
            line_count: lines.len(),
            cases,
            discarded_headers: segmentation.discarded,
        })
    }

    fn content_for(
        &self,
        meeting: &MeetingInfo,
        block: &CaseBlock,
        fields: &CaseFields,
    ) -> LetterContent {
        LetterContent::new(
            &self.letter.institution_code,
            meeting,
            block.sequence_index,
            fields,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
