use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{CaseBlock, CaseCategory};

/// "KERTAS MESYUARAT BIL. OSC/PKM/36/2026"
static CASE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^KERTAS\s+MESYUARAT\s+BIL\.?\s*([A-Z]+)\s*/\s*([A-Z]+)\s*/\s*(\d{1,4})\s*/\s*(\d{4})\b",
    )
    .unwrap()
});

/// Paper code parsed from one case header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseHeader {
    /// Normalized `ORG/CATEGORY/NUMBER/YEAR`
    pub paper_code: String,
    pub category_code: String,
}

pub fn parse_header(line: &str) -> Option<CaseHeader> {
    let caps = CASE_HEADER.captures(line)?;
    let category_code = caps[2].to_ascii_uppercase();
    Some(CaseHeader {
        paper_code: format!(
            "{}/{}/{}/{}",
            caps[1].to_ascii_uppercase(),
            category_code,
            &caps[3],
            &caps[4]
        ),
        category_code,
    })
}

pub fn is_case_header(line: &str) -> bool {
    CASE_HEADER.is_match(line)
}

/// Only planning-permission (PKM) and building-plan (BGN) papers get letters.
pub fn is_recognized_category(code: &str) -> bool {
    CaseCategory::from_code(code).is_some()
}

/// Retained case blocks plus the paper codes of headers that were dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Segmentation {
    pub cases: Vec<CaseBlock>,
    pub discarded: Vec<String>,
}

/// Split the line sequence into case blocks at every case header.
///
/// Lines before the first header belong to no case. A header whose category
/// is not recognized drops its whole block, and the dropped block does not
/// consume a sequence index.
pub fn segment_cases(lines: &[String]) -> Segmentation {
    let mut segmentation = Segmentation::default();
    // None while outside any block or inside a discarded one.
    let mut current: Option<CaseBlock> = None;

    for line in lines {
        let Some(header) = parse_header(line) else {
            if let Some(block) = current.as_mut() {
                block.raw_lines.push(line.clone());
            }
            continue;
        };

        if let Some(done) = current.take() {
            segmentation.cases.push(done);
        }

        match CaseCategory::from_code(&header.category_code) {
            Some(category) => {
                current = Some(CaseBlock {
                    sequence_index: segmentation.cases.len() as u32 + 1,
                    category,
                    paper_code: header.paper_code,
                    raw_lines: Vec::new(),
                });
            }
            None => {
                tracing::warn!(
                    paper_code = %header.paper_code,
                    category = %header.category_code,
                    "Skipping case with unrecognized category"
                );
                segmentation.discarded.push(header.paper_code);
            }
        }
    }

    if let Some(done) = current {
        segmentation.cases.push(done);
    }

    tracing::info!(
        retained = segmentation.cases.len(),
        discarded = segmentation.discarded.len(),
        "Agenda segmented into cases"
    );

    segmentation
}

/// Retained case blocks in order of appearance. Zero headers yields an empty list.
pub fn parse_cases(lines: &[String]) -> Vec<CaseBlock> {
    segment_cases(lines).cases
}
