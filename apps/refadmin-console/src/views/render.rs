//! Plain-text rendering helpers.

use std::fmt::Write;

const BAR_WIDTH: usize = 40;

pub fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count()))
}

/// Left-aligned table with a header rule.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Horizontal bar chart scaled to the largest value.
pub fn bar_chart(title: &str, bars: &[(String, u64)]) -> String {
    let mut out = format!("{title}\n");
    if bars.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    for (label, value) in bars {
        let len = usize::try_from(value.saturating_mul(BAR_WIDTH as u64) / max).unwrap_or(BAR_WIDTH);
        let _ = writeln!(
            out,
            "  {label:<label_width$} | {} {value}",
            "#".repeat(len)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_columns() {
        let out = table(
            &["#", "Name"],
            &[vec!["1".into(), "Ann".into()], vec!["10".into(), "Bo".into()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "#   Name");
        assert_eq!(lines[1], "--  ----");
        assert_eq!(lines[2], "1   Ann");
        assert_eq!(lines[3], "10  Bo");
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let out = bar_chart("Counts", &[("a".into(), 2), ("bb".into(), 4)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Counts");
        assert_eq!(lines[1], format!("  a  | {} 2", "#".repeat(20)));
        assert_eq!(lines[2], format!("  bb | {} 4", "#".repeat(40)));
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(bar_chart("X", &[]), "X\n  (no data)\n");
    }
}
