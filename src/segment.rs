//! Segment extraction from raw statement text.
//!
//! Statements are semi-structured text blobs in which each named section
//! runs from its title line to the next rule of dashes. The locator is a
//! line-by-line scanner rather than a multi-line regex, so the first
//! trailing dash rule always terminates the segment. The tokenizer splits
//! a located segment into rows of pipe-separated fields.

/// Extract the span from the first occurrence of `title` through the next
/// dash rule. Returns the empty string when the title or its closing rule
/// is absent; callers treat empty as "segment absent".
///
/// The title must sit at a word boundary; capture starts at the title
/// itself so box-framed lines (`|Account No: ...|`) open the segment at
/// the key, not at the frame.
pub fn locate_segment(content: &str, title: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_segment = false;

    for line in content.lines() {
        if !in_segment {
            if let Some(at) = title_position(line, title) {
                lines.push(&line[at..]);
                in_segment = true;
            }
            continue;
        }

        lines.push(line);
        if is_dash_rule(line) {
            return lines.join("\n");
        }
    }

    // Title never appeared, or the segment was never closed by a rule.
    String::new()
}

/// Split a segment into rows of pipe-separated fields.
///
/// Lines are trimmed and stripped of one leading and one trailing pipe;
/// lines with no remaining pipe (titles, blanks, dash rules) are
/// discarded. Fields are not trimmed here - mapping is positional and the
/// mappers trim what they use.
pub fn tokenize_rows(segment: &str) -> Vec<Vec<String>> {
    segment
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('|').unwrap_or(line);
            let line = line.strip_suffix('|').unwrap_or(line);
            if !line.contains('|') {
                return None;
            }
            Some(line.split('|').map(str::to_string).collect())
        })
        .collect()
}

/// Byte offset of `title` in `line` when it occurs at a word boundary
fn title_position(line: &str, title: &str) -> Option<usize> {
    line.match_indices(title)
        .find(|(at, _)| {
            line[..*at]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_')
        })
        .map(|(at, _)| at)
}

/// A rule line is dashes only, surrounding whitespace and tabs tolerated
fn is_dash_rule(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "\
Future Trading Statement

Trade Confirmation
|Date      |Market|Qty|
|2018-12-12|SHFE  |2  |
--------------------------------

Other Section
|a|b|
--------------------------------
";

    #[test]
    fn test_locate_segment_spans_title_to_rule() {
        let segment = locate_segment(CONTENT, "Trade Confirmation");
        assert!(segment.starts_with("Trade Confirmation"));
        assert!(segment.ends_with("--------------------------------"));
        assert!(!segment.contains("Other Section"));
    }

    #[test]
    fn test_locate_segment_absent_title() {
        assert_eq!(locate_segment(CONTENT, "Financial Situation"), "");
    }

    #[test]
    fn test_locate_segment_unterminated() {
        let content = "Trade Confirmation\n|a|b|\n";
        assert_eq!(locate_segment(content, "Trade Confirmation"), "");
    }

    #[test]
    fn test_locate_segment_first_rule_wins() {
        let content = "Title\n|a|b|\n----\n|c|d|\n----\n";
        let segment = locate_segment(content, "Title");
        assert!(segment.contains("|a|b|"));
        assert!(!segment.contains("|c|d|"));
    }

    #[test]
    fn test_locate_segment_mid_line_title() {
        let content = "|Account No: 123   Bill Date: 2018-12-13|\n----\n";
        let segment = locate_segment(content, "Account No");
        assert!(segment.starts_with("Account No"));
    }

    #[test]
    fn test_locate_segment_word_boundary() {
        let content = "SubAccount No: 9\n----\nAccount No: 123\n----\n";
        let segment = locate_segment(content, "Account No");
        assert!(segment.starts_with("Account No: 123"));
    }

    #[test]
    fn test_dash_rule_tolerates_surrounding_whitespace() {
        assert!(is_dash_rule("----"));
        assert!(is_dash_rule("  ----\t"));
        assert!(!is_dash_rule("|----|"));
        assert!(!is_dash_rule("---- end"));
        assert!(!is_dash_rule(""));
    }

    #[test]
    fn test_tokenize_rows_skips_structural_lines() {
        let segment = locate_segment(CONTENT, "Trade Confirmation");
        let rows = tokenize_rows(&segment);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Date      ");
        assert_eq!(rows[1][1], "SHFE  ");
    }

    #[test]
    fn test_tokenize_rows_strips_one_pipe_each_side() {
        let rows = tokenize_rows("|a|b|\na|b\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["a", "b"]]);
    }

    #[test]
    fn test_tokenize_rows_discards_pipeless_lines() {
        let rows = tokenize_rows("Title\n\n----\n|only one field|\n");
        assert!(rows.is_empty());
    }
}
