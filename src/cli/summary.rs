use super::ui;
use crate::core::{ClassAllocation, PortfolioStore, PortfolioSummary};
use comfy_table::Cell;

pub fn allocation_table(allocation: &[ClassAllocation]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Class"),
        ui::header_cell("Assets"),
        ui::header_cell("Value"),
        ui::header_cell("Weight (%)"),
    ]);

    for class in allocation {
        table.add_row(vec![
            Cell::new(class.asset_class.to_string()),
            ui::number_cell(class.count.to_string()),
            ui::number_cell(format!(
                "{:.2} {}",
                class.value,
                class.asset_class.currency()
            )),
            ui::number_cell(format!("{:.2}%", class.weight)),
        ]);
    }

    table.to_string()
}

pub fn display_summary(summary: &PortfolioSummary, allocation: &[ClassAllocation]) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Portfolio Summary", ui::StyleType::Title)
    );

    if !allocation.is_empty() {
        output.push_str(&allocation_table(allocation));
        output.push_str("\n\n");
    }

    output.push_str(&format!(
        "{} {}\n",
        ui::style_text("Total Value:", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{:.2}", summary.total_value), ui::StyleType::TotalValue)
    ));
    output.push_str(&format!(
        "{} {:+.2} ({})\n",
        ui::style_text("Change:", ui::StyleType::TotalLabel),
        summary.total_change,
        ui::signed_percent(summary.total_change_percent)
    ));
    output.push_str(&format!(
        "{} {}",
        ui::style_text("Assets:", ui::StyleType::TotalLabel),
        summary.asset_count
    ));

    let currencies = allocation
        .iter()
        .map(|a| a.asset_class.currency())
        .collect::<std::collections::BTreeSet<_>>();
    if currencies.len() > 1 {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                "Totals add INR and USD amounts without conversion.",
                ui::StyleType::Subtle
            )
        ));
    }

    output
}

/// Prints totals and per-class allocation from the last known prices.
pub fn print_summary(store: &PortfolioStore) {
    println!(
        "{}",
        display_summary(&store.summary(), &store.allocation())
    );
}
