use serde::{Deserialize, Serialize};

use super::enums::CaseCategory;

/// The lines of one retained case, sliced out of the agenda between two
/// `KERTAS MESYUARAT BIL.` headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseBlock {
    /// 1-based position among retained cases.
    pub sequence_index: u32,
    pub category: CaseCategory,
    /// Full paper code from the header, e.g. `OSC/PKM/36/2026`.
    pub paper_code: String,
    pub raw_lines: Vec<String>,
}

/// Values read out of one case block. Missing labels yield empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFields {
    pub consultant_name: String,
    pub applicant_name: String,
    /// May span several lines when the agenda enumerates sub-items.
    pub application_description: String,
    pub reference_id: String,
    pub category_label: String,
}
