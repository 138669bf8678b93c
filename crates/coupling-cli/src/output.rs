use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Trailing padding is stripped.
pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths.map(|w| "-".repeat(w));
    println!("{}", render_row(&headers, &widths));
    println!("{}", render_row(&rule, &widths));
    for row in rows {
        println!("{}", render_row(row, &widths));
    }
}

fn render_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Indented bullet list, one line per item.
pub fn print_list(label: &str, items: &[String]) {
    println!("    {label}:");
    for item in items {
        println!("      - {item}");
    }
}
