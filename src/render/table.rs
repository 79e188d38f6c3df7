//! Markdown table primitives.

/// Build a pipe table. Returns an empty string when there are no rows.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    let rule: Vec<&str> = headers.iter().map(|_| "---").collect();
    out.push_str(&format!("| {} |\n", rule.join(" | ")));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| single_line(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// Escape `|` so a type union does not split the cell.
pub fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

/// A row must stay on one line.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
