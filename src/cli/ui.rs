use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Colors an amount green when non-negative and red otherwise.
pub fn change_cell(change: f64, text: String) -> Cell {
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

pub fn signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Creates a new `indicatif::ProgressBar` with standard styling and a message slot.
pub fn new_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(2.5), "+2.50%");
        assert_eq!(signed_percent(-0.125), "-0.13%");
        assert_eq!(signed_percent(0.0), "+0.00%");
    }

    #[test]
    fn test_styled_table_renders_rows() {
        let mut table = new_styled_table();
        table.set_header(vec![header_cell("Symbol"), header_cell("Value")]);
        table.add_row(vec![Cell::new("BTC"), number_cell("100.00".to_string())]);
        let rendered = table.to_string();
        assert!(rendered.contains("BTC"));
        assert!(rendered.contains("100.00"));
    }

    #[test]
    fn test_progress_bar_length() {
        let pb = new_progress_bar(3);
        pb.inc(1);
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 1);
    }
}
