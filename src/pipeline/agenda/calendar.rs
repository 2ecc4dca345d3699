use chrono::{Datelike, NaiveDate};

/// Month spellings seen in agendas, Malay first, mapped to the Malay display form.
const MONTHS: [(&str, &[&str]); 12] = [
    ("Januari", &["JANUARI", "JANUARY", "JAN"]),
    ("Februari", &["FEBRUARI", "FEBRUARY", "FEB"]),
    ("Mac", &["MAC", "MARCH", "MAR"]),
    ("April", &["APRIL", "APR"]),
    ("Mei", &["MEI", "MAY"]),
    ("Jun", &["JUN", "JUNE"]),
    ("Julai", &["JULAI", "JULY", "JUL"]),
    ("Ogos", &["OGOS", "AUGUST", "AUG", "OGO"]),
    ("September", &["SEPTEMBER", "SEPT", "SEP"]),
    ("Oktober", &["OKTOBER", "OCTOBER", "OKT", "OCT"]),
    ("November", &["NOVEMBER", "NOV"]),
    ("Disember", &["DISEMBER", "DECEMBER", "DIS", "DEC"]),
];

/// Monday first, matching `Weekday::num_days_from_monday`.
const WEEKDAYS: [&str; 7] = ["Isnin", "Selasa", "Rabu", "Khamis", "Jumaat", "Sabtu", "Ahad"];

/// Resolve a month word to (1-based month number, display name).
pub fn lookup_month(word: &str) -> Option<(u32, &'static str)> {
    let upper = word.trim().to_uppercase();
    MONTHS
        .iter()
        .position(|(_, variants)| variants.contains(&upper.as_str()))
        .map(|idx| (idx as u32 + 1, MONTHS[idx].0))
}

/// Whether `name` is one of the Malay weekday names, ignoring case.
pub fn is_weekday(name: &str) -> bool {
    WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(name.trim()))
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// "12 Januari 2026"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize].0,
        date.year()
    )
}

/// "ISNIN" → "Isnin", "hari isnin" → "Hari Isnin"
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_resolves() {
        for (idx, (display, variants)) in MONTHS.iter().enumerate() {
            for variant in *variants {
                assert_eq!(lookup_month(variant), Some((idx as u32 + 1, *display)));
            }
        }
    }

    #[test]
    fn month_lookup_ignores_case() {
        assert_eq!(lookup_month("januari"), Some((1, "Januari")));
        assert_eq!(lookup_month("Ogos"), Some((8, "Ogos")));
        assert_eq!(lookup_month("December"), Some((12, "Disember")));
        assert_eq!(lookup_month("MESYUARAT"), None);
    }

    #[test]
    fn weekday_is_monday_first() {
        // 12 January 2026 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(weekday_name(monday), "Isnin");
        assert_eq!(weekday_name(monday.succ_opt().unwrap()), "Selasa");
        let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        assert_eq!(weekday_name(sunday), "Ahad");
    }

    #[test]
    fn weekday_names_are_recognized() {
        assert!(is_weekday("Isnin"));
        assert!(is_weekday("JUMAAT"));
        assert!(!is_weekday("Pindaan"));
        assert!(!is_weekday("Sesi Pagi"));
    }

    #[test]
    fn date_formatting_drops_leading_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_date(date), "5 Mac 2026");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("ISNIN"), "Isnin");
        assert_eq!(title_case("  hari   JUMAAT "), "Hari Jumaat");
        assert_eq!(title_case(""), "");
    }
}
