pub mod format;

pub use format::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Uploaded document is empty")]
    EmptyInput,
}
