//! Command dispatch: bridges CLI args -> coordinator operations -> output formatting.

pub mod call;
pub mod catalog;
pub mod config_cmd;
pub mod customers;
pub mod dashboard;
pub mod interactions;
pub mod loans;
pub mod util;

use loandesk_core::Coordinator;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Customers(args) => customers::handle(coordinator, args, global).await,
        Command::Loans(args) => loans::handle(coordinator, args, global).await,
        Command::Interactions(args) => interactions::handle(coordinator, args, global).await,
        Command::Dashboard => dashboard::handle(coordinator, global).await,
        Command::Call(args) => call::handle(coordinator, args, global).await,
        // Handled before a coordinator exists
        Command::Catalog | Command::Config(_) | Command::Completions(_) => Err(
            CliError::Internal("command does not need an API connection".into()),
        ),
    }
}
