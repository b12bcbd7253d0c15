use crate::domain::response::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A table materialized for display: header labels plus one text cell per header and row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Materializes `rows` under `headers`.
///
/// Each cell is looked up by the exact header label, then by the lowercased label, else left
/// empty. Header order and row order are preserved.
pub fn render_table(headers: &[&str], rows: &[Row]) -> RenderedTable {
    let rows = rows
        .iter()
        .map(|row| headers.iter().map(|h| lookup_cell(row, h)).collect())
        .collect();

    RenderedTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn lookup_cell(row: &Row, header: &str) -> String {
    let present = |v: &&Value| !v.is_null();
    row.get(header)
        .filter(present)
        .or_else(|| row.get(&header.to_lowercase()).filter(present))
        .map(cell_text)
        .unwrap_or_default()
}

/// Display text of a JSON cell value.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                number_text(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_text(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

impl fmt::Display for RenderedTable {
    /// Column-aligned plain text, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(display_width(cell));
                }
            }
        }

        write_line(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &rule, &widths)?;
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(" | ");
        }
        line.push_str(cell);
        let pad = width.saturating_sub(display_width(cell));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(f, "{}", line.trim_end())
}

// CJK and fullwidth characters take two terminal columns.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| match c as u32 {
            0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
            _ => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn looks_up_exact_then_lowercase_then_empty() {
        let rows = vec![row(json!({"Item": "exact", "symbol": "lower"}))];
        let t = render_table(&["Item", "Symbol", "Score"], &rows);
        assert_eq!(t.headers, ["Item", "Symbol", "Score"]);
        assert_eq!(t.rows, vec![vec!["exact", "lower", ""]]);
    }

    #[test]
    fn null_falls_through_to_lowercase_key() {
        let rows = vec![row(json!({"Score": null, "score": 7}))];
        let t = render_table(&["Score"], &rows);
        assert_eq!(t.rows[0], ["7"]);
    }

    #[test]
    fn preserves_row_order() {
        let rows = vec![
            row(json!({"n": "b"})),
            row(json!({"n": "a"})),
            row(json!({"n": "c"})),
        ];
        let t = render_table(&["n"], &rows);
        let col: Vec<_> = t.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(col, ["b", "a", "c"]);
    }

    #[test]
    fn cell_text_formats_numbers_like_display_text() {
        assert_eq!(cell_text(&json!(4)), "4");
        assert_eq!(cell_text(&json!(2.0)), "2");
        assert_eq!(cell_text(&json!(0.37)), "0.37");
        assert_eq!(cell_text(&json!(-1.5)), "-1.5");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn display_aligns_columns() {
        let rows = vec![row(json!({"a": "1", "b": "long value"}))];
        let text = render_table(&["a", "b"], &rows).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "a | b");
        assert_eq!(lines[1], "- | ----------");
        assert_eq!(lines[2], "1 | long value");
    }
}
