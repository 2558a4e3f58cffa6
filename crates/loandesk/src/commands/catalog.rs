//! Prints the static operation catalog. Needs no API connection.

use tabled::Tabled;

use loandesk_core::{OperationSpec, operation};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "Operation")]
    name: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Request")]
    request: String,
    #[tabled(rename = "Response")]
    response: String,
}

impl From<&OperationSpec> for OperationRow {
    fn from(op: &OperationSpec) -> Self {
        let path = match op.query {
            Some(q) => format!("{}?{q}=", op.path),
            None => op.path.to_owned(),
        };
        Self {
            name: op.kind.to_string(),
            resource: op.resource.to_string(),
            method: op.method.to_string(),
            path,
            request: op.request.to_string(),
            response: op.response.to_string(),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let ops = operation::catalog();
    let out = output::render_list(
        &global.format(),
        &ops,
        |op| OperationRow::from(op),
        |op| op.kind.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
