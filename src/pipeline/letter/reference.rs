use std::fmt;

use serde::Serialize;

use crate::models::MeetingInfo;

/// `(<meeting seq>)<institution code>(<case seq>)<year>`, e.g. `(1)MBSP/15/1551/(36)2026`.
///
/// Printed as "Rujukan Kami" in the letter and reused, with path separators
/// replaced, as the letter's file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    pub fn new(institution_code: &str, meeting: &MeetingInfo, case_index: u32) -> Self {
        Self(format!(
            "({}){}({}){}",
            meeting.sequence_number, institution_code, case_index, meeting.year
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `(1)MBSP-15-1551-(36)2026`
    pub fn file_stem(&self) -> String {
        self.0.replace(['/', '\\'], "-")
    }

    pub fn file_name(&self) -> String {
        format!("{}.docx", self.file_stem())
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
