//! Column-aligned table rendering.

use crate::db::StoredAnnotation;
use crate::model::AnnotationTable;

/// Render the annotation table with a header row, a rule, and one line per
/// record.
pub fn render_table(table: &AnnotationTable) -> String {
    let rows: Vec<[&str; 2]> = table
        .rows
        .iter()
        .map(|r| [r.file.as_str(), r.label.as_str()])
        .collect();
    render_columns(&table.headers, &rows)
}

/// Render rows read back from the upload table, preceded by a row count.
pub fn render_stored(table: &str, count: usize, rows: &[StoredAnnotation]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.file.clone(),
                r.label.clone(),
                r.timestamp.clone(),
            ]
        })
        .collect();
    let cells: Vec<[&str; 4]> = cells
        .iter()
        .map(|[id, file, label, ts]| [id.as_str(), file.as_str(), label.as_str(), ts.as_str()])
        .collect();

    let mut out = format!("{} rows in table '{}'\n", count, table);
    if !cells.is_empty() {
        out.push_str(&render_columns(&["Id", "File", "Label", "Timestamp"], &cells));
    }
    out
}

/// Pad every column but the last to its widest cell, counted in characters.
fn render_columns<const N: usize>(headers: &[&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        out.push_str(cell);
        if i < last {
            out.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
            out.push_str(" | ");
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationStore;

    #[test]
    fn test_render_aligns_columns() {
        let mut store = AnnotationStore::new();
        store.add("/data/photo.jpg", "cat").unwrap();
        store.add("/data/a.wav", "bark").unwrap();

        let rendered = render_table(&store.table().unwrap());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "File      | Label",
                "----------+------",
                "photo.jpg | cat",
                "a.wav     | bark",
            ]
        );
    }

    #[test]
    fn test_render_counts_chars_not_bytes() {
        let mut store = AnnotationStore::new();
        store.add("/data/café.png", "ok").unwrap();
        store.add("/data/b.png", "ok").unwrap();

        let rendered = render_table(&store.table().unwrap());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "café.png | ok");
        assert_eq!(lines[3], "b.png    | ok");
    }

    #[test]
    fn test_render_stored_rows() {
        let rows = vec![StoredAnnotation {
            id: 1,
            file: "photo.jpg".to_string(),
            label: "cat".to_string(),
            timestamp: "2026-10-19 12:00:00".to_string(),
        }];

        let rendered = render_stored("annotations", 1, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1 rows in table 'annotations'",
                "Id | File      | Label | Timestamp",
                "---+-----------+-------+--------------------",
                "1  | photo.jpg | cat   | 2026-10-19 12:00:00",
            ]
        );
        assert_eq!(render_stored("annotations", 0, &[]), "0 rows in table 'annotations'\n");
    }
}
