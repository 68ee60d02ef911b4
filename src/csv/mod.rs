//! CSV interchange codec for bulk import and export.
//!
//! Parsing is RFC-4180-ish with two deliberate normalizations: every
//! field is whitespace-trimmed, and rows whose fields are all empty are
//! dropped. Serialization quotes a field only when it contains a comma,
//! a double quote, or a newline, doubling any internal quotes.

mod save;

pub use save::{DiskSaver, FileSaver};

use serde_json::{Map, Value};

/// Scanner state: inside or outside a quoted field.
enum State {
    Unquoted,
    Quoted,
}

/// Parses CSV text into rows of trimmed string fields.
///
/// Never errors: malformed input such as an unterminated quote flushes
/// whatever accumulated, and validation (minimum row count, required
/// columns) is the caller's job. A lone `\r` not followed by `\n` is
/// kept as a literal character.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = State::Unquoted;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match state {
            State::Quoted => match ch {
                // A doubled quote is one literal quote, not a state change.
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => state = State::Unquoted,
                _ => field.push(ch),
            },
            State::Unquoted => match ch {
                '"' => state = State::Quoted,
                ',' => {
                    row.push(field.trim().to_string());
                    field.clear();
                }
                '\n' => flush_row(&mut rows, &mut row, &mut field),
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    flush_row(&mut rows, &mut row, &mut field);
                }
                _ => field.push(ch),
            },
        }
    }

    // End of input ends the pending row by the same rule as a newline.
    flush_row(&mut rows, &mut row, &mut field);
    rows
}

/// Ends the current row, discarding it when every field is empty.
fn flush_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String) {
    row.push(field.trim().to_string());
    field.clear();
    if row.iter().any(|f| !f.is_empty()) {
        rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}

/// Serializes row objects to CSV text, header row first.
///
/// `headers` fixes both the column order and the lookup keys; a missing
/// or null value becomes an empty field. Rows are joined with `\n` and
/// no trailing newline is emitted.
pub fn serialize(headers: &[&str], rows: &[Map<String, Value>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let fields: Vec<String> = headers
            .iter()
            .map(|h| escape_field(&stringify(row.get(*h))))
            .collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Converts parsed rows (header row first) into objects, renaming
/// columns through a CSV-column to target-field mapping. Fewer than two
/// rows means there is nothing to import.
pub fn map_rows(
    rows: &[Vec<String>],
    mapping: &[(&str, &str)],
) -> Vec<Map<String, Value>> {
    let Some((headers, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    if data_rows.is_empty() {
        return Vec::new();
    }

    data_rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            for (csv_column, target_field) in mapping {
                if target_field.is_empty() {
                    continue;
                }
                if let Some(index) = headers.iter().position(|h| h == csv_column) {
                    let value = row.get(index).cloned().unwrap_or_default();
                    object.insert(target_field.to_string(), Value::String(value));
                }
            }
            object
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn parses_simple_rows() {
        assert_eq!(
            parse("a,b\nc,d"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert_eq!(parse(""), Vec::<Vec<String>>::new());
    }

    #[test]
    fn blank_rows_are_dropped() {
        assert_eq!(
            parse("a,b\n\n\nc,d\n"),
            vec![vec!["a", "b"], vec!["c", "d"]]
        );
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(parse("  x , y \n"), vec![vec!["x", "y"]]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        assert_eq!(
            parse("\"a,b\",\"line1\nline2\"\n"),
            vec![vec!["a,b", "line1\nline2"]]
        );
    }

    #[test]
    fn doubled_quotes_become_literal_quotes() {
        assert_eq!(parse("\"say \"\"hi\"\"\""), vec![vec!["say \"hi\""]]);
    }

    #[test]
    fn crlf_is_one_row_separator() {
        assert_eq!(parse("a,b\r\nc,d\r\n"), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn lone_carriage_return_stays_literal() {
        // Old Mac line endings are an accepted limitation, not a separator.
        assert_eq!(parse("a\rb,c"), vec![vec!["a\rb", "c"]]);
    }

    #[test]
    fn unterminated_quote_flushes_what_accumulated() {
        assert_eq!(parse("\"half open,oops"), vec![vec!["half open,oops"]]);
    }

    #[test]
    fn serializes_header_row_first() {
        let rows = vec![object(&[("name", json!("fw-01")), ("severity", json!("high"))])];
        assert_eq!(
            serialize(&["name", "severity"], &rows),
            "name,severity\nfw-01,high"
        );
    }

    #[test]
    fn escapes_commas_quotes_and_newlines() {
        let rows = vec![object(&[("a", json!("x,y"))])];
        assert_eq!(serialize(&["a"], &rows), "a\n\"x,y\"");

        let rows = vec![object(&[("a", json!("say \"hi\""))])];
        assert_eq!(serialize(&["a"], &rows), "a\n\"say \"\"hi\"\"\"");

        let rows = vec![object(&[("a", json!("line1\nline2"))])];
        assert_eq!(serialize(&["a"], &rows), "a\n\"line1\nline2\"");
    }

    #[test]
    fn missing_and_null_values_serialize_empty() {
        let rows = vec![object(&[("a", json!("1")), ("b", Value::Null)])];
        assert_eq!(serialize(&["a", "b", "c"], &rows), "a,b,c\n1,,");
    }

    #[test]
    fn non_string_values_are_stringified() {
        let rows = vec![object(&[("count", json!(42)), ("active", json!(true))])];
        assert_eq!(serialize(&["count", "active"], &rows), "count,active\n42,true");
    }

    #[test]
    fn round_trips_through_parse() {
        let rows = vec![
            object(&[("name", json!("core-switch")), ("notes", json!("a,b and \"c\""))]),
            object(&[("name", json!("edge-router")), ("notes", json!("multi\nline"))]),
        ];
        let text = serialize(&["name", "notes"], &rows);
        let parsed = parse(&text);

        assert_eq!(parsed.len(), 3, "header plus two data rows");
        assert_eq!(parsed[0], vec!["name", "notes"]);
        assert_eq!(parsed[1], vec!["core-switch", "a,b and \"c\""]);
        assert_eq!(parsed[2], vec!["edge-router", "multi\nline"]);
    }

    #[test]
    fn map_rows_applies_column_mapping() {
        let rows = parse("Host Name,IP,Owner\nfw-01,10.0.0.1,netops\n");
        let objects = map_rows(&rows, &[("Host Name", "name"), ("Owner", "owner")]);

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["name"], json!("fw-01"));
        assert_eq!(objects[0]["owner"], json!("netops"));
        assert!(!objects[0].contains_key("IP"));
    }

    #[test]
    fn map_rows_needs_header_and_data() {
        assert!(map_rows(&[], &[("a", "a")]).is_empty());
        assert!(map_rows(&[vec!["a".to_string()]], &[("a", "a")]).is_empty());
    }

    #[test]
    fn map_rows_fills_short_rows_with_empty_strings() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["only-a".to_string()],
        ];
        let objects = map_rows(&rows, &[("a", "a"), ("b", "b")]);
        assert_eq!(objects[0]["a"], json!("only-a"));
        assert_eq!(objects[0]["b"], json!(""));
    }
}
