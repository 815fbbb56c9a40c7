//! Token-level field extraction for `imodinfo` lines.
//!
//! Extraction runs in two passes: `FieldLocator::locate` records where
//! each field label sits among the whitespace tokens of a line, then the
//! typed accessors read values at fixed offsets from those positions.

/// Whitespace tokens of one line together with located label positions.
#[derive(Debug, Clone)]
pub struct FieldLocator<'a> {
    tokens: Vec<&'a str>,
    labels: Vec<(&'static str, usize)>,
}

impl<'a> FieldLocator<'a> {
    /// Tokenize `line` and record the first position of every label.
    pub fn locate(line: &'a str, labels: &[&'static str]) -> Self {
        let tokens: Vec<&'a str> = line.split_whitespace().collect();
        let labels = labels
            .iter()
            .filter_map(|&label| {
                tokens
                    .iter()
                    .position(|&tok| tok == label)
                    .map(|pos| (label, pos))
            })
            .collect();
        Self { tokens, labels }
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Position of `label`, if it was located.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, pos)| pos)
    }

    /// Token `offset` places after `label`.
    pub fn after(&self, label: &str, offset: usize) -> Option<&'a str> {
        let pos = self.position(label)?;
        self.tokens.get(pos + offset).copied()
    }

    /// Token immediately before `label`.
    pub fn before(&self, label: &str) -> Option<&'a str> {
        let pos = self.position(label)?;
        pos.checked_sub(1).and_then(|i| self.tokens.get(i).copied())
    }
}

/// Contour number following the first `#` on a line: the run of ASCII
/// digits right after it.
pub fn contour_ordinal(line: &str) -> Option<&str> {
    let hash = line.find('#')?;
    let rest = &line[hash + 1..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Strip one trailing separator or unit character from a numeric token
/// (`"345.6,"` -> `"345.6"`).
pub fn strip_trailing_unit(token: &str) -> &str {
    match token.chars().last() {
        Some(c) if !c.is_ascii_digit() && c != '.' => &token[..token.len() - c.len_utf8()],
        _ => token,
    }
}

/// Value after the first `=` on a line, trimmed.
pub fn value_after_equals(line: &str) -> Option<&str> {
    line.split_once('=').map(|(_, value)| value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED_LINE: &str =
        "        CONTOUR #12,1,0  33 points, length = 861.473, area = 54107.3";

    #[test]
    fn test_locate_and_extract() {
        let loc = FieldLocator::locate(CLOSED_LINE, &["points,", "length", "area"]);
        assert_eq!(loc.position("points,"), Some(3));
        assert_eq!(loc.before("points,"), Some("33"));
        assert_eq!(loc.after("length", 2), Some("861.473,"));
        assert_eq!(loc.after("area", 2), Some("54107.3"));
    }

    #[test]
    fn test_missing_label() {
        let loc = FieldLocator::locate("CONTOUR #1,3,0  4 points", &["points,", "points"]);
        assert_eq!(loc.position("points,"), None);
        assert_eq!(loc.before("points"), Some("4"));
        assert_eq!(loc.after("area", 2), None);
    }

    #[test]
    fn test_label_at_start_has_no_predecessor() {
        let loc = FieldLocator::locate("points 4", &["points"]);
        assert_eq!(loc.before("points"), None);
    }

    #[test]
    fn test_contour_ordinal_multi_digit() {
        assert_eq!(contour_ordinal(CLOSED_LINE), Some("12"));
        assert_eq!(contour_ordinal("CONTOUR #7"), Some("7"));
        assert_eq!(contour_ordinal("CONTOUR #x"), None);
        assert_eq!(contour_ordinal("CONTOUR 7"), None);
    }

    #[test]
    fn test_strip_trailing_unit() {
        assert_eq!(strip_trailing_unit("861.473,"), "861.473");
        assert_eq!(strip_trailing_unit("861.473"), "861.473");
        assert_eq!(strip_trailing_unit("12.5u"), "12.5");
    }

    #[test]
    fn test_value_after_equals() {
        assert_eq!(
            value_after_equals("Total cylinder surface area = 1234.5"),
            Some("1234.5")
        );
        assert_eq!(value_after_equals("no value here"), None);
    }
}
