//! Interaction command handlers.

use tabled::Tabled;

use loandesk_core::{Coordinator, Interaction, InteractionDraft};

use crate::cli::{GlobalOpts, InteractionsArgs, InteractionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct InteractionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Interaction> for InteractionRow {
    fn from(i: &Interaction) -> Self {
        Self {
            id: id_of(i),
            when: i.created_at.clone().unwrap_or_default(),
            kind: i.kind.clone().unwrap_or_default(),
            status: i.status.clone().unwrap_or_default(),
            notes: i.notes.clone().unwrap_or_default(),
        }
    }
}

fn id_of(i: &Interaction) -> String {
    i.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(i: &Interaction) -> String {
    [
        format!("ID:        {}", id_of(i)),
        format!(
            "Customer:  {}",
            i.customer_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into())
        ),
        format!("Type:      {}", output::or_dash(i.kind.as_deref())),
        format!("Status:    {}", output::or_dash(i.status.as_deref())),
        format!("Logged:    {}", output::or_dash(i.created_at.as_deref())),
        format!("Notes:     {}", output::or_dash(i.notes.as_deref())),
    ]
    .join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    args: InteractionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        InteractionsCommand::List { customer_id } => {
            let id = util::parse_id("customer_id", &customer_id)?;
            let interactions = coordinator.list_interactions(&id).await?;
            let out =
                output::render_list(&format, &interactions, |i| InteractionRow::from(i), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InteractionsCommand::Create {
            customer_id,
            kind,
            status,
            notes,
            from_file,
        } => {
            let id = util::parse_id("customer_id", &customer_id)?;
            let mut draft = match from_file {
                Some(path) => util::read_draft(&path)?,
                None => InteractionDraft::default(),
            };
            util::set(&mut draft.kind, kind);
            util::set(&mut draft.status, status);
            if notes.is_some() {
                draft.notes = notes;
            }
            let created = coordinator.create_interaction(&id, &draft).await?;
            let out = output::render_single(&format, &created, detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
