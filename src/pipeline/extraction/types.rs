use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_line;
use super::ExtractionError;

/// Ordered, trimmed, non-empty text lines of one agenda document.
///
/// Built once per upload and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSequence(Vec<String>);

impl LineSequence {
    /// Sanitize every raw line and drop the ones left empty.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            raw.into_iter()
                .map(|line| sanitize_line(line.as_ref()))
                .filter(|line| !line.is_empty())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for LineSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Turns raw upload bytes into a line sequence.
pub trait LineExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<LineSequence, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_trims_and_drops_empty() {
        let lines = LineSequence::from_raw(["  BIL. 01/2026 ", "", "   ", "\tPemohon: Ali\t"]);
        assert_eq!(lines.as_slice(), &["BIL. 01/2026", "Pemohon: Ali"]);
    }

    #[test]
    fn order_is_preserved() {
        let lines = LineSequence::from_raw(["c", "a", "b"]);
        assert_eq!(lines.into_inner(), vec!["c", "a", "b"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let lines = LineSequence::from_raw(["x", "y"]);
        assert_eq!(serde_json::to_string(&lines).unwrap(), r#"["x","y"]"#);
    }
}
