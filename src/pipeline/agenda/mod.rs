pub mod calendar;
pub mod meeting;
pub mod segmenter;
pub mod labels;
pub mod fields;

pub use calendar::*;
pub use meeting::*;
pub use segmenter::*;
pub use labels::*;
pub use fields::*;

use thiserror::Error;

/// Required heading data is missing. Every letter embeds both values, so
/// either error stops the run before any case is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    #[error("Meeting number (e.g. 'BIL. 01/2026') not found in the first {scanned} lines of the agenda")]
    MeetingIdentifierNotFound { scanned: usize },

    #[error("Meeting date (e.g. '12 JANUARI 2026 (ISNIN)') not found in the first {scanned} lines of the agenda")]
    MeetingDateNotFound { scanned: usize },
}
