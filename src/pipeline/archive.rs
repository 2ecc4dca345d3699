use std::collections::HashMap;
use std::io::{Cursor, Write};

use serde::Serialize;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// One file of the download bundle.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveEntry {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Options for every ZIP entry this crate writes, letters included.
///
/// The timestamp is pinned so identical input yields identical bytes.
pub(crate) fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

/// Bundle the given files into one ZIP, names used verbatim.
///
/// Names are unique when they come from distinct case indices. Should two
/// entries still share a name, the archive keeps one entry at the first
/// position holding the last entry's bytes.
pub fn build_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut order: Vec<&str> = Vec::with_capacity(entries.len());
    let mut latest: HashMap<&str, &[u8]> = HashMap::with_capacity(entries.len());

    for entry in entries {
        let name = entry.file_name.as_str();
        if latest.insert(name, &entry.bytes).is_some() {
            tracing::warn!(file_name = name, "Duplicate archive entry name, keeping the last one");
        } else {
            order.push(name);
        }
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for name in &order {
        zip.start_file(*name, entry_options())?;
        zip.write_all(latest[name])?;
    }
    let bytes = zip.finish()?.into_inner();

    tracing::info!(
        entries = order.len(),
        size_bytes = bytes.len(),
        "Archive built"
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn entry(name: &str, body: &str) -> ArchiveEntry {
        ArchiveEntry {
            file_name: name.into(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    fn read_back(bytes: &[u8]) -> Vec<(String, String)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut body = String::new();
                file.read_to_string(&mut body).unwrap();
                (file.name().to_string(), body)
            })
            .collect()
    }

    #[test]
    fn entries_keep_names_and_order() {
        let bytes = build_archive(&[
            entry("(1)MBSP-15-1551-(1)2026.docx", "one"),
            entry("(1)MBSP-15-1551-(2)2026.docx", "two"),
        ])
        .unwrap();
        assert_eq!(
            read_back(&bytes),
            vec![
                ("(1)MBSP-15-1551-(1)2026.docx".to_string(), "one".to_string()),
                ("(1)MBSP-15-1551-(2)2026.docx".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_name_keeps_last_bytes_once() {
        let bytes = build_archive(&[entry("a.docx", "old"), entry("b.docx", "b"), entry("a.docx", "new")])
            .unwrap();
        assert_eq!(
            read_back(&bytes),
            vec![
                ("a.docx".to_string(), "new".to_string()),
                ("b.docx".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn empty_archive_is_valid() {
        let bytes = build_archive(&[]).unwrap();
        assert!(read_back(&bytes).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let entries = [entry("x.docx", "same content")];
        assert_eq!(build_archive(&entries).unwrap(), build_archive(&entries).unwrap());
    }
}
