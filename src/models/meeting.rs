use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header metadata shared by every letter generated from one agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingInfo {
    /// Ordinal of the meeting within its year (the `01` in `BIL. 01/2026`).
    pub sequence_number: u32,
    /// Year component of the meeting identifier.
    pub year: i32,
    pub meeting_date: NaiveDate,
    pub weekday_name: String,
    /// False when the weekday was computed from `meeting_date`.
    pub weekday_from_source: bool,
    /// e.g. "12 Januari 2026"
    pub formatted_date: String,
    /// e.g. "Bil.01/2026"
    pub meeting_label: String,
}

impl MeetingInfo {
    /// Download name for the letter bundle of this meeting.
    pub fn archive_file_name(&self) -> String {
        format!("pemakluman_{:02}_{}.zip", self.sequence_number, self.year)
    }
}
