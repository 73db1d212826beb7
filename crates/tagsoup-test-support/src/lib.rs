//! Shared test utilities for the tagsoup workspace: chunk plans for
//! streaming-parity coverage, token snapshot formatting, and the golden
//! fixture manifest format.

pub mod chunk;
pub mod golden;
pub mod snapshot;

/// Parse a numeric environment knob; unset, empty, or malformed values
/// yield `None` so callers fall back to their defaults.
pub fn parse_env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<usize>().ok()
}

/// Render the first mismatch between two line lists with context, for
/// golden-test failure output.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let max = expected.len().max(actual.len());
    let missing = "<missing>";
    let mut out = String::new();
    let mismatch = (0..max).find(|&i| {
        expected.get(i).map(String::as_str).unwrap_or(missing)
            != actual.get(i).map(String::as_str).unwrap_or(missing)
    });
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line in start..end {
            let left = expected.get(line).map(String::as_str).unwrap_or(missing);
            let right = actual.get(line).map(String::as_str).unwrap_or(missing);
            let marker = if line == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line + 1);
        }
    } else if expected.len() != actual.len() {
        let _ = writeln!(
            &mut out,
            "prefix matched but lengths differ (expected {} lines, actual {} lines)",
            expected.len(),
            actual.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_lines_reports_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.contains("line 2"), "got: {diff}");
    }

    #[test]
    fn diff_lines_is_empty_for_equal_input() {
        let lines = vec!["same".to_string()];
        assert!(diff_lines(&lines, &lines).is_empty());
    }
}
