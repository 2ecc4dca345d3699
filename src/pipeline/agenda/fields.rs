use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::labels::{match_label, Label};
use crate::models::{CaseBlock, CaseFields};
use crate::pipeline::extraction::clean_spaces;

/// "(1)", "(a)", "(iv)", "1.", "2)", "a)", "-", "•". A bracketed acronym
/// such as "(MBSP)" is prose, not a marker.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\(\s*(?:\d{1,2}|[A-Za-z]|[ivx]{1,4})\s*\)|[0-9]{1,2}[.)]\s|[a-z]\)|[ivx]{1,4}\)|[-–•·*]\s?)",
    )
    .unwrap()
});

// ═══════════════════════════════════════════════════════════
// Scan state machine
// ═══════════════════════════════════════════════════════════

/// Where the scanner is inside a case block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Before the first label line.
    InDescription,
    /// After a label line. `capturing` is false for labels whose value is
    /// not read, and for repeats of a label already captured.
    InLabeledField { label: Label, capturing: bool },
}

/// What one pass over a block's lines collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockScan {
    pub description: Vec<String>,
    /// Raw pieces per captured label: the text after the colon, then continuations.
    pub values: BTreeMap<Label, Vec<String>>,
}

impl BlockScan {
    fn value(&self, label: Label) -> String {
        self.values
            .get(&label)
            .map(|parts| clean_spaces(&parts.join(" ")))
            .unwrap_or_default()
    }
}

/// Advance the scanner by one line.
pub fn step(state: ScanState, line: &str, scan: &mut BlockScan) -> ScanState {
    if let Some((label, rest)) = match_label(line) {
        let capturing = label.is_extracted() && !scan.values.contains_key(&label);
        if capturing {
            scan.values.insert(label, vec![rest.to_string()]);
        }
        return ScanState::InLabeledField { label, capturing };
    }

    match state {
        ScanState::InDescription => scan.description.push(line.to_string()),
        ScanState::InLabeledField {
            label,
            capturing: true,
        } => {
            if let Some(parts) = scan.values.get_mut(&label) {
                parts.push(line.to_string());
            }
        }
        ScanState::InLabeledField { .. } => {}
    }
    state
}

pub fn scan_block(lines: &[String]) -> BlockScan {
    let mut scan = BlockScan::default();
    let mut state = ScanState::InDescription;
    for line in lines {
        state = step(state, line, &mut scan);
    }
    scan
}

// ═══════════════════════════════════════════════════════════
// Field extraction
// ═══════════════════════════════════════════════════════════

/// Join description lines.
///
/// Wrapped prose is space-joined onto one line. A line that opens with a
/// list marker starts a new line, so enumerated sub-items stay separate.
pub fn join_description(lines: &[String]) -> String {
    let mut logical: Vec<String> = Vec::new();
    for line in lines {
        let clean = clean_spaces(line);
        if clean.is_empty() {
            continue;
        }
        match logical.last_mut() {
            Some(current) if !LIST_MARKER.is_match(&clean) => {
                current.push(' ');
                current.push_str(&clean);
            }
            _ => logical.push(clean),
        }
    }
    logical.join("\n")
}

/// Read the letter fields of one case. Missing labels give empty strings.
pub fn extract_fields(block: &CaseBlock) -> CaseFields {
    let scan = scan_block(&block.raw_lines);

    let fields = CaseFields {
        consultant_name: scan.value(Label::Consultant),
        applicant_name: scan.value(Label::Applicant),
        application_description: join_description(&scan.description),
        reference_id: scan.value(Label::ReferenceId),
        category_label: block.category.label().to_string(),
    };

    tracing::debug!(
        case = block.sequence_index,
        paper_code = %block.paper_code,
        has_consultant = !fields.consultant_name.is_empty(),
        has_applicant = !fields.applicant_name.is_empty(),
        has_reference = !fields.reference_id.is_empty(),
        "Case fields extracted"
    );

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseCategory;

    fn block(raw: &[&str]) -> CaseBlock {
        CaseBlock {
            sequence_index: 1,
            category: CaseCategory::PlanningPermission,
            paper_code: "OSC/PKM/01/2026".into(),
            raw_lines: raw.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn value_ends_at_next_label() {
        let fields = extract_fields(&block(&["Perunding: Acme Sdn Bhd", "Pemohon: Ali"]));
        assert_eq!(fields.consultant_name, "Acme Sdn Bhd");
        assert_eq!(fields.applicant_name, "Ali");
    }

    #[test]
    fn continuation_lines_are_space_joined() {
        let fields = extract_fields(&block(&[
            "Pemohon: John",
            "Doe  Enterprise",
            "Perunding: Acme",
        ]));
        assert_eq!(fields.applicant_name, "John Doe Enterprise");
        assert_eq!(fields.consultant_name, "Acme");
    }

    #[test]
    fn value_may_start_on_next_line() {
        let fields = extract_fields(&block(&["Pemohon :", "Jane Tan", "Lokasi: Jalan 1"]));
        assert_eq!(fields.applicant_name, "Jane Tan");
    }

    #[test]
    fn unread_labels_stop_continuation() {
        let fields = extract_fields(&block(&[
            "Perunding: Acme",
            "Lokasi: Lot 5, Jalan Bukit",
            "Seberang Perai",
            "No. Rujukan OSC: OSC/REF/009",
        ]));
        assert_eq!(fields.consultant_name, "Acme");
        assert_eq!(fields.reference_id, "OSC/REF/009");
    }

    #[test]
    fn labels_are_order_insensitive() {
        let fields = extract_fields(&block(&[
            "No. Rujukan OSC: R1",
            "Pemohon: P",
            "Perunding: C",
        ]));
        assert_eq!(fields.reference_id, "R1");
        assert_eq!(fields.applicant_name, "P");
        assert_eq!(fields.consultant_name, "C");
    }

    #[test]
    fn first_occurrence_wins() {
        let fields = extract_fields(&block(&["Pemohon: Pertama", "Pemohon: Kedua", "lagi"]));
        assert_eq!(fields.applicant_name, "Pertama");
    }

    #[test]
    fn missing_labels_are_empty() {
        let fields = extract_fields(&block(&["Permohonan Kebenaran Merancang"]));
        assert_eq!(fields.consultant_name, "");
        assert_eq!(fields.applicant_name, "");
        assert_eq!(fields.reference_id, "");
        assert_eq!(fields.category_label, "Kebenaran Merancang");
    }

    #[test]
    fn description_stops_at_first_label() {
        let fields = extract_fields(&block(&[
            "Permohonan Kebenaran Merancang",
            "Projek ABC",
            "Perunding: Acme",
            "Bukan penerangan",
        ]));
        assert_eq!(
            fields.application_description,
            "Permohonan Kebenaran Merancang Projek ABC"
        );
    }

    #[test]
    fn list_items_keep_their_own_lines() {
        let description = join_description(&[
            "Cadangan pembangunan yang mengandungi:".to_string(),
            "(1) 2 unit rumah kedai".to_string(),
            "3 tingkat".to_string(),
            "(2) 1 unit pencawang elektrik".to_string(),
            "a) tempat letak kereta".to_string(),
            "- surau".to_string(),
            "• tadika".to_string(),
        ]);
        assert_eq!(
            description,
            "Cadangan pembangunan yang mengandungi:\n\
             (1) 2 unit rumah kedai 3 tingkat\n\
             (2) 1 unit pencawang elektrik\n\
             a) tempat letak kereta\n\
             - surau\n\
             • tadika"
        );
    }

    #[test]
    fn bracketed_acronym_continues_the_line() {
        let description = join_description(&[
            "Permohonan Kebenaran Merancang oleh Majlis".to_string(),
            "(MBSP) untuk projek ABC".to_string(),
            "(iv) kemudahan awam".to_string(),
        ]);
        assert_eq!(
            description,
            "Permohonan Kebenaran Merancang oleh Majlis (MBSP) untuk projek ABC\n\
             (iv) kemudahan awam"
        );
    }

    #[test]
    fn description_keeps_decision_wording() {
        let fields = extract_fields(&block(&[
            "Permohonan Kebenaran Merancang",
            "Keputusan mesyuarat terdahulu: ditangguhkan",
            "Perunding: Acme",
        ]));
        assert_eq!(
            fields.application_description,
            "Permohonan Kebenaran Merancang Keputusan mesyuarat terdahulu: ditangguhkan"
        );
        assert_eq!(fields.consultant_name, "Acme");
    }

    #[test]
    fn state_machine_transitions() {
        let mut scan = BlockScan::default();
        let state = step(ScanState::InDescription, "Tajuk", &mut scan);
        assert_eq!(state, ScanState::InDescription);

        let state = step(state, "Perunding: A", &mut scan);
        assert_eq!(
            state,
            ScanState::InLabeledField {
                label: Label::Consultant,
                capturing: true
            }
        );

        let state = step(state, "Mukim: 12", &mut scan);
        assert_eq!(
            state,
            ScanState::InLabeledField {
                label: Label::Mukim,
                capturing: false
            }
        );

        let state = step(state, "ignored", &mut scan);
        assert_eq!(scan.description, vec!["Tajuk"]);
        assert_eq!(scan.values[&Label::Consultant], vec![" A"]);
        assert!(!scan.values.contains_key(&Label::Mukim));
        assert!(matches!(state, ScanState::InLabeledField { capturing: false, .. }));
    }

    #[test]
    fn category_label_follows_category() {
        let mut building = block(&[]);
        building.category = CaseCategory::BuildingPlan;
        assert_eq!(extract_fields(&building).category_label, "Bangunan");
    }
}
