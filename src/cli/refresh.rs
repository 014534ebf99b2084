use super::{summary, ui};
use crate::core::{LookupFailure, PortfolioStore, RefreshReport};
use futures::future;
use tracing::warn;

/// Refreshes all prices behind a progress bar. Ctrl-C stops the pass early
/// and keeps whatever already completed.
pub async fn run(store: &PortfolioStore) -> RefreshReport {
    if store.is_empty() {
        println!(
            "{}",
            ui::style_text("Nothing to refresh.", ui::StyleType::Subtle)
        );
        return RefreshReport::default();
    }

    let pb = ui::new_progress_bar(store.len() as u64);
    pb.set_message("Refreshing prices...");

    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Could not listen for Ctrl-C, refresh cannot be interrupted");
            future::pending::<()>().await;
        }
    };
    let report = store
        .refresh_prices_until(interrupted, || pb.inc(1))
        .await;
    pb.finish_and_clear();

    print_report(&report);
    summary::print_summary(store);
    report
}

pub fn print_report(report: &RefreshReport) {
    println!("Updated {} of {} prices", report.updated, report.updated + report.failed());

    if report.failures.iter().any(|f| f.reason == LookupFailure::Cancelled) {
        println!(
            "{}",
            ui::style_text("Refresh interrupted, remaining prices kept", ui::StyleType::Warning)
        );
    }
    for failure in &report.failures {
        println!(
            "{}",
            ui::style_text(
                &format!("Warning: kept last price for {}: {}", failure.key, failure.reason),
                ui::StyleType::Warning
            )
        );
    }
}
