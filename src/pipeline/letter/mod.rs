pub mod reference;
pub mod docx_writer;
pub mod content;
pub mod template;
pub mod renderer;

pub use reference::*;
pub use docx_writer::*;
pub use content::*;
pub use template::*;
pub use renderer::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Letter package error: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("Letter XML error: {0}")]
    Xml(String),

    #[error("Template has no word/document.xml part")]
    MissingMainPart,

    #[error("Template {path} could not be read: {reason}")]
    TemplateUnreadable { path: PathBuf, reason: String },
}

impl From<quick_xml::Error> for RenderError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}
