pub mod types;
pub mod sanitize;
pub mod docx;
pub mod plain_text;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use docx::*;
pub use plain_text::*;
pub use orchestrator::*;

use thiserror::Error;

use crate::pipeline::import::ImportError;

/// Failures reading an uploaded agenda. All of them are fatal for the run.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document package is unreadable: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("Document package has no word/document.xml part")]
    MissingMainPart,

    #[error("Document XML is malformed: {0}")]
    Xml(String),

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}
