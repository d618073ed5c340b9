//! Minimal column alignment for command output.
//!
//! Deliberately plain: no terminal-width wrapping, no color. Rows are
//! padded per column and joined with two spaces.

/// Render rows as aligned columns, with an optional title row followed
/// by a dashed rule.
#[must_use]
pub fn render(titles: Option<&[&str]>, rows: &[Vec<String>]) -> Vec<String> {
    let mut all: Vec<Vec<String>> = Vec::new();
    if let Some(titles) = titles {
        all.push(titles.iter().map(|t| (*t).to_string()).collect());
    }
    all.extend(rows.iter().cloned());
    if all.is_empty() {
        return Vec::new();
    }

    let columns = all.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &all {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines: Vec<String> = all
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                line.push_str(cell);
                if i + 1 < row.len() {
                    for _ in cell.chars().count()..widths[i] {
                        line.push(' ');
                    }
                }
            }
            line.trim_end().to_string()
        })
        .collect();

    if titles.is_some() && lines.len() > 1 {
        let total: usize = widths.iter().sum::<usize>() + 2 * (columns.saturating_sub(1));
        lines.insert(1, "-".repeat(total));
    }
    lines
}
