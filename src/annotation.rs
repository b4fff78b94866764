//! Line classification for isoform-to-GO annotation lists.
//!
//! A qualifying line has exactly two tab-separated fields once trailing
//! whitespace is stripped, and the second field starts with `GO:`.
//! Everything else (headers, comments, extra columns) is not an annotation.

/// Prefix every GO identifier carries.
pub const GO_PREFIX: &str = "GO:";

/// One qualifying record, borrowed from the line it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    /// Isoform (or gene) label; not used for counting.
    pub label: &'a str,
    pub go_id: &'a str,
}

/// Trailing characters stripped before splitting: Unicode whitespace plus the
/// ASCII information separators `\x1c`..=`\x1f`.
fn is_trailing_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Classify a single line. Returns `None` for anything that is not an annotation.
pub fn parse_line(line: &str) -> Option<Annotation<'_>> {
    let mut fields = line.trim_end_matches(is_trailing_space).split('\t');

    let label = fields.next()?;
    let go_id = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    if !go_id.starts_with(GO_PREFIX) {
        return None;
    }

    Some(Annotation { label, go_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_field_go_line() {
        let a = parse_line("ENST00000380152\tGO:0005515").unwrap();
        assert_eq!(a.label, "ENST00000380152");
        assert_eq!(a.go_id, "GO:0005515");
    }

    #[test]
    fn strips_trailing_newline_and_carriage_return() {
        let a = parse_line("X1\tGO:0000001\r\n").unwrap();
        assert_eq!(a.go_id, "GO:0000001");
    }

    #[test]
    fn trailing_tab_is_stripped_before_split() {
        // "X1\tGO:1\t" loses its trailing tab and becomes a 2-field line
        let a = parse_line("X1\tGO:0000001\t").unwrap();
        assert_eq!(a.go_id, "GO:0000001");
    }

    #[test]
    fn strips_trailing_information_separators() {
        for sep in ['\x1c', '\x1d', '\x1e', '\x1f'] {
            let line = format!("X1\tGO:0000001{sep}");
            assert_eq!(parse_line(&line).map(|a| a.go_id), Some("GO:0000001"));
        }
        let a = parse_line("X1\tGO:0000001\x1f \u{a0}\u{2028}").unwrap();
        assert_eq!(a.go_id, "GO:0000001");
    }

    #[test]
    fn separator_inside_field_is_kept() {
        let a = parse_line("X1\tGO:00\x1f01").unwrap();
        assert_eq!(a.go_id, "GO:00\x1f01");
    }

    #[test]
    fn rejects_three_fields_even_with_go_prefix() {
        assert_eq!(parse_line("X1\tGO:0000001\textra"), None);
    }

    #[test]
    fn rejects_single_field() {
        assert_eq!(parse_line("GO:0000001"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn rejects_second_field_without_prefix() {
        assert_eq!(parse_line("header\tnotago"), None);
        assert_eq!(parse_line("X1\tgo:0000001"), None);
        assert_eq!(parse_line("X1\t GO:0000001"), None);
    }

    #[test]
    fn go_prefix_in_first_field_does_not_count() {
        assert_eq!(parse_line("GO:0000001\tX1"), None);
    }

    #[test]
    fn empty_label_still_qualifies() {
        let a = parse_line("\tGO:0000001").unwrap();
        assert_eq!(a.label, "");
        assert_eq!(a.go_id, "GO:0000001");
    }

    #[test]
    fn bare_prefix_qualifies() {
        // Only the prefix is checked, not the identifier shape
        assert_eq!(parse_line("X1\tGO:").map(|a| a.go_id), Some("GO:"));
    }
}
