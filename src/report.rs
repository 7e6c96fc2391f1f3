//! Markdown table rendering for console output

/// Cells longer than this are truncated with an ellipsis
const MAX_CELL_LEN: usize = 200;

/// Render rows as a GitHub-style markdown table.
///
/// Returns an empty string for an empty row set.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!(
        "| {} |",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    ));

    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| format_cell(cell)).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}

/// Truncate long values and escape pipes so cells cannot break the table
fn format_cell(raw: &str) -> String {
    let truncated: String = if raw.chars().count() > MAX_CELL_LEN {
        let mut s: String = raw.chars().take(MAX_CELL_LEN).collect();
        s.push_str("...");
        s
    } else {
        raw.to_string()
    };
    truncated.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows_render_nothing() {
        assert_eq!(markdown_table(&["a", "b"], &[]), "");
    }

    #[test]
    fn test_basic_table_layout() {
        let rows = vec![vec!["1".to_string(), "x".to_string()]];
        let table = markdown_table(&["rank", "url"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "| rank | url |");
        assert_eq!(lines[1], "| --- | --- |");
        assert_eq!(lines[2], "| 1 | x |");
    }

    #[test]
    fn test_pipes_are_escaped() {
        let rows = vec![vec!["a|b".to_string()]];
        let table = markdown_table(&["cell"], &rows);
        assert!(table.contains("a\\|b"));
    }

    #[test]
    fn test_long_cells_truncated() {
        let long = "x".repeat(300);
        let rows = vec![vec![long]];
        let table = markdown_table(&["cell"], &rows);
        let data_line = table.lines().last().unwrap();
        assert!(data_line.contains(&format!("{}...", "x".repeat(200))));
        assert!(!data_line.contains(&"x".repeat(201)));
    }
}
