/// Prepare one extracted line: drop control characters (tabs survive) and trim.
///
/// Internal spacing is left alone here; field extraction normalizes it.
pub fn sanitize_line(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize spacing inside a field value.
///
/// Word documents are full of non-breaking and narrow spaces; all of them
/// become a plain space, runs of whitespace collapse to one, ends are trimmed.
pub fn clean_spaces(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{2009}' | '\u{200A}' => ' ',
            other => other,
        })
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
