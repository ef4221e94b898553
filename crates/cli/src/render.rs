//! Plain-text rendering of ranked rows.

use riven_core::config::DisplayConfig;
use riven_core::Row;
use riven_ranking::Highlight;
use std::fmt::Write;

const ITEM_WIDTH: usize = 28;

/// Render rows as an aligned table, highlighting Endo per `display`.
pub fn render_table(rows: &[Row], display: &DisplayConfig, limit: Option<usize>) -> String {
    let shown = limit.map_or(rows.len(), |n| n.min(rows.len()));
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<ITEM_WIDTH$} {:>3} {:>4} {:>7} {:>9} {:>7} {:>10} {:<7}  {}",
        "Item", "MR", "Rank", "Rerolls", "Price (p)", "Endo", "Efficiency", "Status", "Link"
    );
    for row in &rows[..shown] {
        let mark = Highlight::classify(row.endo(), display).marker();
        let _ = writeln!(
            out,
            "{mark} {:<ITEM_WIDTH$} {:>3} {:>4} {:>7} {:>9} {:>7} {:>10.2} {:<7}  {}",
            clip(row.item(), ITEM_WIDTH),
            row.mastery_rank(),
            row.mod_rank(),
            row.rerolls(),
            row.price(),
            row.endo(),
            row.efficiency(),
            row.status().as_str(),
            row.link()
        );
    }
    if shown < rows.len() {
        let _ = writeln!(out, "  ... {} more", rows.len() - shown);
    }
    out
}

/// Format an integer with thousands separators.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(width - 1).collect();
        clipped.push('~');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riven_core::{RowInput, SellerStatus};

    fn row(item: &str, mastery_rank: i64, rerolls: i64) -> Row {
        Row::new(
            RowInput {
                item: item.to_string(),
                mastery_rank,
                mod_rank: 8,
                rerolls,
                price: 1000,
                status: SellerStatus::Online,
                auction_id: format!("id-{item}"),
            },
            "https://warframe.market",
        )
    }

    #[test]
    fn test_table_marks_highlights() {
        let rows = vec![row("plain", 8, 0), row("notable", 16, 70), row("exceptional", 16, 120)];
        let table = render_table(&rows, &DisplayConfig::default(), None);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Efficiency"));
        assert!(lines[1].starts_with("  plain"));
        assert!(lines[2].starts_with("* notable"));
        assert!(lines[3].starts_with("! exceptional"));
        assert!(lines[3].contains("https://warframe.market/auction/id-exceptional"));
    }

    #[test]
    fn test_table_limit() {
        let rows = vec![row("a", 8, 0), row("b", 8, 0), row("c", 8, 0)];
        let table = render_table(&rows, &DisplayConfig::default(), Some(1));
        assert_eq!(table.lines().count(), 3);
        assert!(table.ends_with("  ... 2 more\n"));
    }

    #[test]
    fn test_long_item_clipped() {
        let long = "x".repeat(40);
        let table = render_table(&[row(&long, 8, 0)], &DisplayConfig::default(), None);
        assert!(table.contains(&format!("{}~", "x".repeat(ITEM_WIDTH - 1))));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(12560), "12,560");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-777), "-777");
        assert_eq!(group_thousands(-20_000), "-20,000");
    }
}
