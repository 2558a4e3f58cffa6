//! Portfolio statistics.

use loandesk_core::{Coordinator, DashboardStats};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(stats: &DashboardStats, color: bool) -> String {
    let label = |s: &str| output::paint_label(s, color);
    [
        format!("{}  {}", label("Customers:      "), stats.total_customers),
        format!("{}  {}", label("Loans:          "), stats.total_loans),
        format!("{}  {}", label("Active loans:   "), stats.active_loans),
        format!("{}  {}", label("Past-due loans: "), stats.past_due_loans),
        format!(
            "{}  {}",
            label("Portfolio:      "),
            output::money(Some(stats.total_portfolio))
        ),
    ]
    .join("\n")
}

pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color_mode());
    let stats = coordinator.dashboard_stats().await?;
    let out = output::render_single(
        &global.format(),
        &stats,
        |s| detail(s, color),
        |s| s.total_loans.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
