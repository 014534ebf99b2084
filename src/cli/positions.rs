use super::ui;
use crate::core::{AssetClass, PortfolioStore, Position};
use anyhow::Result;
use comfy_table::{Cell, Table};

/// Renders positions with their last known price and change.
pub fn positions_table(positions: &[Position]) -> String {
    build_positions_table(positions).to_string()
}

fn build_positions_table(positions: &[Position]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Class"),
        ui::header_cell("Quantity"),
        ui::header_cell("Price"),
        ui::header_cell("Value"),
        ui::header_cell("Change"),
        ui::header_cell("Updated"),
    ]);

    for position in positions {
        let currency = position.asset_class.currency();
        let name = if position.display_name == position.symbol {
            position.symbol.clone()
        } else {
            format!("{} ({})", position.display_name, position.symbol)
        };

        table.add_row(vec![
            Cell::new(name),
            Cell::new(position.asset_class.to_string()),
            ui::number_cell(format!("{:.4}", position.quantity)),
            ui::number_cell(format!("{:.2} {currency}", position.last_price)),
            ui::number_cell(format!("{:.2} {currency}", position.value())),
            ui::change_cell(
                position.last_change,
                format!(
                    "{:+.2} ({})",
                    position.last_change,
                    ui::signed_percent(position.last_change_percent)
                ),
            ),
            Cell::new(position.last_updated.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]);
    }

    table
}

pub async fn add(
    store: &PortfolioStore,
    asset_class: AssetClass,
    symbol: &str,
    quantity: f64,
) -> Result<()> {
    let position = store.add(asset_class, symbol, quantity).await?;
    println!(
        "Holding {:.4} {} at {:.2} {} ({:.2} {} total)",
        position.quantity,
        position.key(),
        position.last_price,
        asset_class.currency(),
        position.value(),
        asset_class.currency()
    );
    Ok(())
}

pub fn remove(store: &PortfolioStore, asset_class: AssetClass, symbol: &str) {
    if store.remove(asset_class, symbol) {
        println!("Removed {} from {}", symbol.trim().to_uppercase(), asset_class);
    } else {
        println!(
            "{}",
            ui::style_text(
                &format!("No {asset_class} position for {}", symbol.trim()),
                ui::StyleType::Subtle
            )
        );
    }
}

pub fn list(store: &PortfolioStore, asset_class: Option<AssetClass>) {
    let positions = match asset_class {
        Some(asset_class) => store.positions_by_class(asset_class),
        None => store.positions(),
    };

    if positions.is_empty() {
        println!(
            "{}",
            ui::style_text("No positions yet. Add one with `pfolio add`.", ui::StyleType::Subtle)
        );
        return;
    }
    println!("{}", positions_table(&positions));
}
