use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Field labels that open a "Label : value" line inside a case block.
///
/// Only three are read into letters. The rest are recognized so that a
/// value never swallows the line that starts the next field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    Consultant,
    Applicant,
    ReferenceId,
    Owner,
    Location,
    Lot,
    Mukim,
    District,
    Date,
    Recommendation,
}

impl Label {
    /// Whether the value of this label ends up in the letter.
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Consultant | Self::Applicant | Self::ReferenceId)
    }
}

/// Anchored at line start, up to and including the colon.
static LABEL_PATTERNS: LazyLock<Vec<(Label, Regex)>> = LazyLock::new(|| {
    [
        (Label::Consultant, r"(?:nama\s+)?perunding"),
        (Label::Applicant, r"(?:nama\s+)?pemohon"),
        (
            Label::ReferenceId,
            r"(?:no\.?\s*(?:fail|rujukan)\s*osc|id\s+permohonan)",
        ),
        (Label::Owner, r"pemilik(?:\s+(?:projek|tanah))?"),
        (Label::Location, r"(?:lokasi|alamat)(?:\s+tapak)?"),
        (Label::Lot, r"(?:no\.?\s*)?lot"),
        (Label::Mukim, r"mukim"),
        (Label::District, r"daerah"),
        (
            Label::Date,
            r"tarikh(?:\s+(?:terima|permohonan|lawatan(?:\s+tapak)?|hantar|lengkap))?",
        ),
        (
            Label::Recommendation,
            r"(?:syor(?:an)?(?:\s+(?:jabatan|teknikal|osc))?|ulasan(?:\s+(?:jabatan|teknikal|agensi))?|keputusan(?:\s+jawatankuasa)?)",
        ),
    ]
    .into_iter()
    .map(|(label, body)| {
        let pattern = format!(r"(?i)^\s*{body}\s*:");
        (label, Regex::new(&pattern).unwrap())
    })
    .collect()
});

/// Match a label at the start of `line`, returning it with the text after the colon.
pub fn match_label(line: &str) -> Option<(Label, &str)> {
    LABEL_PATTERNS.iter().find_map(|(label, re)| {
        re.find(line).map(|m| (*label, &line[m.end()..]))
    })
}

pub fn is_label_line(line: &str) -> bool {
    match_label(line).is_some()
}
