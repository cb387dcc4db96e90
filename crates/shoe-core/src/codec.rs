//! Lenient CSV codec for cut-hit statistics and combined exports
//!
//! Implements only the quoting subset the exports need: double-quoted
//! fields, doubled-quote escapes, embedded commas and newlines. Parsing
//! never fails; an unterminated quoted field extends to end of input.

/// Collapse CRLF and bare CR line endings to a single line feed
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse comma-delimited text into rows of cells.
///
/// Empty input yields no rows; a trailing newline does not produce a
/// spurious empty row; a final unterminated row is still emitted.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let source = normalize_newlines(text);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quote = false;

    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quote {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quote = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' {
            in_quote = true;
        } else if ch == ',' {
            row.push(std::mem::take(&mut field));
        } else if ch == '\n' {
            row.push(std::mem::take(&mut field));
            rows.push(std::mem::take(&mut row));
        } else {
            field.push(ch);
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Quote a cell if and only if it contains a comma, quote, or newline,
/// doubling any internal quotes
pub fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize rows of cells to CSV text with CRLF row terminators
pub fn serialize(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Split a vertical dump into card lines, dropping blank lines
pub fn lines(text: &str) -> Vec<String> {
    normalize_newlines(text)
        .trim()
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_single_field() {
        assert_eq!(parse("abc"), vec![row(&["abc"])]);
    }

    #[test]
    fn test_parse_trailing_newline_no_spurious_row() {
        assert_eq!(parse("a,b\n"), vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_parse_doubled_quote_escape() {
        assert_eq!(parse(r#""a""b""#), vec![row(&[r#"a"b"#])]);
    }

    #[test]
    fn test_parse_embedded_comma_and_newline() {
        let text = "\"a,b\",\"c\nd\"\nx,y";
        assert_eq!(parse(text), vec![row(&["a,b", "c\nd"]), row(&["x", "y"])]);
    }

    #[test]
    fn test_parse_crlf_and_lf_identical() {
        assert_eq!(parse("a,b\r\nc,d\r\n"), parse("a,b\nc,d\n"));
        assert_eq!(parse("a\rb"), parse("a\nb"));
    }

    #[test]
    fn test_parse_unterminated_quote_best_effort() {
        // Quote never closes: the field runs to end of input
        assert_eq!(parse("a,\"bc"), vec![row(&["a", "bc"])]);
    }

    #[test]
    fn test_parse_trailing_comma_yields_empty_cell() {
        assert_eq!(parse("a,"), vec![row(&["a", ""])]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("a\"b"), "\"a\"\"b\"");
        assert_eq!(escape("a\nb"), "\"a\nb\"");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_serialize_crlf_rows() {
        let rows = vec![row(&["a", "b"]), row(&["c", "d"])];
        assert_eq!(serialize(&rows), "a,b\r\nc,d");
    }

    #[test]
    fn test_round_trip() {
        let rows = vec![
            row(&["plain", "with,comma", "with\"quote"]),
            row(&["multi\nline", "平均", "0.42"]),
        ];
        assert_eq!(parse(&serialize(&rows)), rows);
    }

    #[test]
    fn test_lines_filters_blanks() {
        assert_eq!(lines("AS\n\n2H\r\nTD\n"), vec!["AS", "2H", "TD"]);
        assert!(lines("").is_empty());
        assert!(lines("\n\n").is_empty());
    }
}
