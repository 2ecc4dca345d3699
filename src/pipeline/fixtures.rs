//! Shared test inputs: in-memory `.docx` packages and a sample meeting.

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use zip::ZipWriter;

use super::archive::entry_options;
use crate::models::{CaseFields, MeetingInfo};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Minimal `.docx` whose `<w:body>` holds the given XML verbatim.
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"><w:body>{body}</w:body></w:document>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, xml) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, entry_options()).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// `.docx` with one body paragraph per line.
pub fn docx_with_lines(lines: &[&str]) -> Vec<u8> {
    let body: String = lines
        .iter()
        .map(|line| {
            format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                quick_xml::escape::escape(*line)
            )
        })
        .collect();
    docx_with_body(&body)
}

/// A small agenda: meeting header, one planning-permission case.
pub const AGENDA_LINES: [&str; 7] = [
    "BIL. 01/2026",
    "12 JANUARI 2026 (ISNIN)",
    "KERTAS MESYUARAT BIL. OSC/PKM/01/2026",
    "Permohonan Kebenaran Merancang Projek ABC",
    "Perunding: XYZ Consult",
    "Pemohon: Jane Tan",
    "No. Rujukan OSC: OSC/REF/001",
];

/// Three headers: PKM, an unrecognized XYZ, then BGN.
pub const MIXED_AGENDA_LINES: [&str; 13] = [
    "MESYUARAT JAWATANKUASA PUSAT SETEMPAT (OSC) BIL. 02/2026",
    "Tarikh: 9 Februari 2026",
    "KERTAS MESYUARAT BIL. OSC/PKM/01/2026",
    "Cadangan Pembangunan Perumahan",
    "Perunding: Alpha Arkitek",
    "Pemohon: Syarikat Satu Sdn Bhd",
    "KERTAS MESYUARAT BIL. OSC/XYZ/02/2026",
    "Perunding: Tidak Berkaitan",
    "Pemohon: Tidak Berkaitan",
    "KERTAS MESYUARAT BIL. OSC/BGN/03/2026",
    "Cadangan Bangunan Kedai",
    "Perunding: Beta Jurutera",
    "No. Rujukan OSC: OSC/BGN/777",
];

pub fn sample_meeting() -> MeetingInfo {
    MeetingInfo {
        sequence_number: 1,
        year: 2026,
        meeting_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        weekday_name: "Isnin".into(),
        weekday_from_source: true,
        formatted_date: "12 Januari 2026".into(),
        meeting_label: "Bil.01/2026".into(),
    }
}

pub fn sample_fields() -> CaseFields {
    CaseFields {
        consultant_name: "XYZ Consult".into(),
        applicant_name: "Jane Tan".into(),
        application_description: "Permohonan Kebenaran Merancang Projek ABC".into(),
        reference_id: "OSC/REF/001".into(),
        category_label: "Kebenaran Merancang".into(),
    }
}
