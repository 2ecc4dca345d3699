use serde::Serialize;

use super::reference::ReferenceNumber;
use crate::models::{CaseFields, MeetingInfo};

pub const TITLE: &str = "PEMAKLUMAN KEPUTUSAN MESYUARAT JAWATANKUASA PUSAT SETEMPAT\n(OSC)";
pub const SALUTATION: &str = "Dengan hormatnya saya diarahkan merujuk perkara di atas.";
pub const CLOSING: &str = "Sekian, terima kasih.";
pub const FINAL_DECISION_NOTICE: &str = "3.     Walau bagaimanapun, keputusan muktamad bagi permohonan yang berkenaan adalah tertakluk kepada surat kelulusan / penolakan yang akan dikeluarkan oleh Jabatan Induk yang memproses.";

/// Unticked box printed before every decision option.
pub const CHECKBOX: &str = "\u{2610}";

/// Decision options, laid out two per row. The letter never pre-selects one.
pub const DECISION_OPTIONS: [&str; 4] = [
    "LULUS",
    "TOLAK",
    "LULUS DENGAN PINDAAN PELAN /\nLULUS BERSYARAT",
    "TANGGUH",
];

/// Placeholder markers recognized in a letter template.
pub mod placeholder {
    pub const REFERENCE: &str = "{{RUJUKAN_KAMI}}";
    pub const DATE: &str = "{{TARIKH}}";
    pub const WEEKDAY: &str = "{{HARI}}";
    pub const MEETING: &str = "{{BIL_MESYUARAT}}";
    pub const CONSULTANT: &str = "{{PERUNDING}}";
    pub const APPLICANT: &str = "{{PEMOHON}}";
    pub const CATEGORY: &str = "{{JENIS_PERMOHONAN}}";
    pub const DESCRIPTION: &str = "{{NAMA_PERMOHONAN}}";
    pub const REFERENCE_ID: &str = "{{ID_PERMOHONAN}}";
}

/// Everything a renderer prints for one case.
#[derive(Debug, Clone, Serialize)]
pub struct LetterContent {
    pub reference: ReferenceNumber,
    pub meeting_label: String,
    pub formatted_date: String,
    pub weekday_name: String,
    pub fields: CaseFields,
}

impl LetterContent {
    pub fn new(
        institution_code: &str,
        meeting: &MeetingInfo,
        case_index: u32,
        fields: &CaseFields,
    ) -> Self {
        Self {
            reference: ReferenceNumber::new(institution_code, meeting, case_index),
            meeting_label: meeting.meeting_label.clone(),
            formatted_date: meeting.formatted_date.clone(),
            weekday_name: meeting.weekday_name.clone(),
            fields: fields.clone(),
        }
    }

    /// Label/value rows of the addressee table.
    pub fn info_rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Kepada (PSP)", self.fields.consultant_name.as_str()),
            ("Pemilik Projek", self.fields.applicant_name.as_str()),
            ("Jenis Permohonan", self.fields.category_label.as_str()),
            ("Nama Permohonan", self.fields.application_description.as_str()),
            ("ID Permohonan", self.fields.reference_id.as_str()),
        ]
    }

    /// Paragraph 2: which meeting decided, and when.
    pub fn meeting_paragraph(&self) -> String {
        let day = if self.weekday_name.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.weekday_name)
        };
        format!(
            "2.     Adalah dimaklumkan bahawa Mesyuarat Jawatankuasa Pusat Setempat (OSC)\n\
             {} yang bersidang pada {}{} bersetuju untuk memberikan keputusan ke atas \
             permohonan yang telah dikemukakan oleh pihak tuan/puan seperti mana berikut:",
            self.meeting_label, self.formatted_date, day
        )
    }

    /// Marker → value pairs for template filling.
    pub fn substitutions(&self) -> Vec<(&'static str, String)> {
        vec![
            (placeholder::REFERENCE, self.reference.to_string()),
            (placeholder::DATE, self.formatted_date.clone()),
            (placeholder::WEEKDAY, self.weekday_name.clone()),
            (placeholder::MEETING, self.meeting_label.clone()),
            (placeholder::CONSULTANT, self.fields.consultant_name.clone()),
            (placeholder::APPLICANT, self.fields.applicant_name.clone()),
            (placeholder::CATEGORY, self.fields.category_label.clone()),
            (placeholder::DESCRIPTION, self.fields.application_description.clone()),
            (placeholder::REFERENCE_ID, self.fields.reference_id.clone()),
        ]
    }

    pub fn file_name(&self) -> String {
        self.reference.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::{sample_fields, sample_meeting};

    fn content() -> LetterContent {
        LetterContent::new("MBSP/15/1551/", &sample_meeting(), 1, &sample_fields())
    }

    #[test]
    fn info_rows_follow_fixed_order() {
        let content = content();
        let labels: Vec<&str> = content.info_rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![
                "Kepada (PSP)",
                "Pemilik Projek",
                "Jenis Permohonan",
                "Nama Permohonan",
                "ID Permohonan"
            ]
        );
        assert_eq!(content.info_rows()[0].1, "XYZ Consult");
        assert_eq!(content.info_rows()[2].1, "Kebenaran Merancang");
    }

    #[test]
    fn meeting_paragraph_embeds_label_date_and_day() {
        let text = content().meeting_paragraph();
        assert!(text.starts_with("2.     Adalah dimaklumkan"));
        assert!(text.contains("(OSC)\nBil.01/2026 yang bersidang pada 12 Januari 2026 (Isnin) bersetuju"));
        assert!(text.ends_with("seperti mana berikut:"));
    }

    #[test]
    fn substitutions_cover_every_placeholder() {
        let subs = content().substitutions();
        assert_eq!(subs.len(), 9);
        let lookup = |key: &str| subs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());
        assert_eq!(lookup(placeholder::REFERENCE), Some("(1)MBSP/15/1551/(1)2026"));
        assert_eq!(lookup(placeholder::MEETING), Some("Bil.01/2026"));
        assert_eq!(lookup(placeholder::APPLICANT), Some("Jane Tan"));
    }

    #[test]
    fn decision_options_are_fixed() {
        assert_eq!(DECISION_OPTIONS.len(), 4);
        assert_eq!(DECISION_OPTIONS[0], "LULUS");
        assert_eq!(DECISION_OPTIONS[3], "TANGGUH");
    }
}
