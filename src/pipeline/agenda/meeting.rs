use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::calendar::{format_date, is_weekday, lookup_month, title_case, weekday_name};
use super::segmenter::is_case_header;
use super::AgendaError;
use crate::models::MeetingInfo;

// ═══════════════════════════════════════════════════════════
// Patterns
// ═══════════════════════════════════════════════════════════

/// "BIL. 01/2026", "Bil.1 / 2026"
static MEETING_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bBIL\.?\s*(\d{1,2})\s*/\s*(\d{4})\b").unwrap()
});

/// "12 JANUARI 2026", optionally followed by "(ISNIN)". The parenthesized
/// text only counts as a weekday when it names one.
static MEETING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s+([A-Z]+)\s+(\d{4})\b(?:\s*\(([^)]*)\))?").unwrap()
});

/// Lines that introduce the meeting date explicitly ("Tarikh : ...")
static DATE_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^tarikh\b").unwrap());

// ═══════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════

struct DateMatch {
    date: NaiveDate,
    weekday: Option<String>,
}

/// Read the meeting number, year and date from the agenda heading.
///
/// Only the first `scan_lines` lines are searched, and never past the first
/// case header: case blocks carry their own dates (submission, site visit)
/// that must not be mistaken for the meeting date.
///
/// A date on a line labelled `Tarikh` wins over the first date found by
/// position. When the source gives no weekday it is computed from the date.
pub fn parse_meeting(lines: &[String], scan_lines: usize) -> Result<MeetingInfo, AgendaError> {
    let head: Vec<&str> = lines
        .iter()
        .take(scan_lines)
        .map(String::as_str)
        .take_while(|line| !is_case_header(line))
        .collect();
    let scanned = head.len();
    let joined = head.join(" ");

    let id = MEETING_ID
        .captures(&joined)
        .ok_or(AgendaError::MeetingIdentifierNotFound { scanned })?;
    let sequence_number: u32 = id[1]
        .parse()
        .map_err(|_| AgendaError::MeetingIdentifierNotFound { scanned })?;
    let year: i32 = id[2]
        .parse()
        .map_err(|_| AgendaError::MeetingIdentifierNotFound { scanned })?;

    let found = head
        .iter()
        .filter(|line| DATE_LABEL.is_match(line))
        .find_map(|line| first_date(line))
        .or_else(|| first_date(&joined))
        .ok_or(AgendaError::MeetingDateNotFound { scanned })?;

    let (weekday_name, weekday_from_source) = match found.weekday {
        Some(day) => (day, true),
        None => (weekday_name(found.date).to_string(), false),
    };

    let meeting = MeetingInfo {
        sequence_number,
        year,
        meeting_date: found.date,
        weekday_name,
        weekday_from_source,
        formatted_date: format_date(found.date),
        meeting_label: format!("Bil.{sequence_number:02}/{year}"),
    };

    tracing::info!(
        meeting = %meeting.meeting_label,
        date = %meeting.formatted_date,
        weekday = %meeting.weekday_name,
        weekday_from_source = meeting.weekday_from_source,
        "Meeting info parsed"
    );

    Ok(meeting)
}

/// First token in `text` that is a real calendar date with a known month.
fn first_date(text: &str) -> Option<DateMatch> {
    MEETING_DATE.captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let (month, _) = lookup_month(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let weekday = caps
            .get(4)
            .map(|m| title_case(m.as_str()))
            .filter(|name| is_weekday(name));
        Some(DateMatch { date, weekday })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCAN_LINES;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_heading_with_weekday() {
        let meeting = parse_meeting(
            &lines(&["BIL. 01/2026", "12 JANUARI 2026 (ISNIN)"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.sequence_number, 1);
        assert_eq!(meeting.year, 2026);
        assert_eq!(meeting.meeting_date, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(meeting.formatted_date, "12 Januari 2026");
        assert_eq!(meeting.weekday_name, "Isnin");
        assert!(meeting.weekday_from_source);
        assert_eq!(meeting.meeting_label, "Bil.01/2026");
    }

    #[test]
    fn weekday_is_computed_when_absent() {
        let meeting = parse_meeting(
            &lines(&["MESYUARAT JAWATANKUASA OSC BIL. 3/2026", "9 FEBRUARI 2026"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.weekday_name, "Isnin");
        assert!(!meeting.weekday_from_source);
        assert_eq!(meeting.meeting_label, "Bil.03/2026");
    }

    #[test]
    fn source_weekday_is_title_cased_and_kept() {
        // The document's weekday wins even when it disagrees with the calendar
        let meeting = parse_meeting(
            &lines(&["Bil. 02/2026", "26 januari 2026 (selasa)"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.weekday_name, "Selasa");
    }

    #[test]
    fn parenthesized_non_weekday_is_ignored() {
        let meeting = parse_meeting(
            &lines(&["BIL. 01/2026", "12 JANUARI 2026 (PINDAAN)"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.weekday_name, "Isnin");
        assert!(!meeting.weekday_from_source);
    }

    #[test]
    fn parenthetical_on_next_line_is_not_a_weekday() {
        let meeting = parse_meeting(
            &lines(&[
                "MESYUARAT JAWATANKUASA OSC BIL. 01/2026",
                "12 JANUARI 2026",
                "(Sesi Pagi)",
            ]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.weekday_name, "Isnin");
        assert!(!meeting.weekday_from_source);
    }

    #[test]
    fn labelled_date_beats_positional_date() {
        let meeting = parse_meeting(
            &lines(&[
                "BIL. 05/2026",
                "Dicetak pada 2 MAC 2026",
                "Tarikh : 9 MAC 2026 (ISNIN)",
            ]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.formatted_date, "9 Mac 2026");
    }

    #[test]
    fn first_positional_date_when_no_label() {
        let meeting = parse_meeting(
            &lines(&["BIL. 05/2026", "2 MAC 2026", "9 MAC 2026"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.formatted_date, "2 Mac 2026");
    }

    #[test]
    fn unknown_month_words_are_skipped() {
        let meeting = parse_meeting(
            &lines(&["BIL. 01/2026", "10 TINGKAT 2026", "12 JANUARI 2026"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.formatted_date, "12 Januari 2026");
    }

    #[test]
    fn year_comes_from_identifier() {
        let meeting = parse_meeting(
            &lines(&["BIL. 12/2025", "5 JANUARI 2026"]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap();
        assert_eq!(meeting.year, 2025);
        assert_eq!(meeting.meeting_date.format("%Y").to_string(), "2026");
    }

    #[test]
    fn missing_identifier_fails() {
        let err = parse_meeting(&lines(&["12 JANUARI 2026 (ISNIN)"]), DEFAULT_SCAN_LINES)
            .unwrap_err();
        assert_eq!(err, AgendaError::MeetingIdentifierNotFound { scanned: 1 });
    }

    #[test]
    fn missing_date_fails() {
        let err = parse_meeting(&lines(&["BIL. 01/2026", "AGENDA"]), DEFAULT_SCAN_LINES)
            .unwrap_err();
        assert_eq!(err, AgendaError::MeetingDateNotFound { scanned: 2 });
    }

    #[test]
    fn search_stops_at_first_case_header() {
        let err = parse_meeting(
            &lines(&[
                "BIL. 01/2026",
                "KERTAS MESYUARAT BIL. OSC/PKM/01/2026",
                "Tarikh Terima: 3 JANUARI 2026",
            ]),
            DEFAULT_SCAN_LINES,
        )
        .unwrap_err();
        assert_eq!(err, AgendaError::MeetingDateNotFound { scanned: 1 });
    }

    #[test]
    fn search_is_limited_to_scan_window() {
        let mut raw = vec!["BIL. 01/2026".to_string()];
        raw.extend((0..5).map(|i| format!("Baris {i}")));
        raw.push("12 JANUARI 2026".to_string());
        assert!(parse_meeting(&raw, 5).is_err());
        assert!(parse_meeting(&raw, 7).is_ok());
    }
}
