use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render rows as aligned columns. Widths count chars, not bytes, so titles
/// with `—` line up.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let pad = |cell: &str, w: usize| {
        let fill = w.saturating_sub(cell.chars().count());
        format!("{cell}{}", " ".repeat(fill))
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect();
    out.push(header_row.join("  ").trim_end().to_string());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push(sep.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths.get(i).copied().unwrap_or(0)))
            .collect();
        out.push(cells.join("  ").trim_end().to_string());
    }
    out.join("\n")
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", format_table(headers, rows));
}
