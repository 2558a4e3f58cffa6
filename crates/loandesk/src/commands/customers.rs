//! Customer command handlers.

use tabled::Tabled;

use loandesk_core::{Coordinator, Customer, CustomerDraft, Interaction, Loan};

use crate::cli::{CustomerFieldArgs, CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Callable")]
    callable: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: id_of(c),
            name: c.full_name(),
            email: c.email.clone().unwrap_or_default(),
            phone: c.phone.clone().unwrap_or_default(),
            account: c.account_number.clone().unwrap_or_default(),
            record_type: c.record_type.clone(),
            callable: if c.is_eligible_to_call { "yes" } else { "no" }.into(),
        }
    }
}

fn id_of(c: &Customer) -> String {
    c.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(c: &Customer, interactions: &[Interaction], color: bool) -> String {
    let label = |s: &str| output::paint_label(s, color);
    let mut lines = vec![
        format!("{}        {}", label("ID:"), id_of(c)),
        format!("{}      {}", label("Name:"), c.full_name()),
        format!("{}   {}", label("Account:"), output::or_dash(c.account_number.as_deref())),
        format!("{}     {}", label("Email:"), output::or_dash(c.email.as_deref())),
        format!("{}     {}", label("Phone:"), output::or_dash(c.phone.as_deref())),
        format!(
            "{}   {}",
            label("Address:"),
            c.postal_address().unwrap_or_else(|| "-".into())
        ),
        format!("{}      {}", label("Type:"), c.record_type),
        format!(
            "{}  {}",
            label("Callable:"),
            if c.is_eligible_to_call { "yes" } else { "no" }
        ),
    ];
    if let Some(score) = c.credit_score {
        lines.push(format!("{}    {score}", label("Credit:")));
    }
    if c.monthly_income.is_some() {
        lines.push(format!("{}    {}", label("Income:"), output::money(c.monthly_income)));
    }
    if let Some(ref status) = c.employment_status {
        lines.push(format!("{}  {status}", label("Employed:")));
    }

    if !c.loans.is_empty() {
        lines.push(String::new());
        lines.push(label("Loans"));
        lines.extend(c.loans.iter().map(|l: &Loan| {
            format!(
                "  #{:<6} {:<24} {:<12} due {}",
                l.id.as_ref().map(ToString::to_string).unwrap_or_default(),
                l.display_name(),
                output::paint_status(l.status_label(), color),
                output::money(l.due_amount)
            )
        }));
    }

    lines.push(String::new());
    lines.push(label("Interactions"));
    if interactions.is_empty() {
        lines.push("  (none)".into());
    }
    lines.extend(interactions.iter().map(|i| {
        format!(
            "  {}  {} / {}  {}",
            output::or_dash(i.created_at.as_deref()),
            output::or_dash(i.kind.as_deref()),
            output::or_dash(i.status.as_deref()),
            i.notes.as_deref().unwrap_or_default()
        )
    }));
    lines.join("\n")
}

// ── Field application ───────────────────────────────────────────────

fn apply(fields: CustomerFieldArgs, draft: &mut CustomerDraft) {
    util::set(&mut draft.account_number, fields.account_number);
    util::set(&mut draft.first_name, fields.first_name);
    util::set(&mut draft.last_name, fields.last_name);
    util::set(&mut draft.email_address, fields.email);
    util::set(&mut draft.primary_phone_number, fields.phone);
    util::set(&mut draft.ssn, fields.ssn);
    util::set(&mut draft.dob, fields.dob);
    util::set(&mut draft.address_line_1, fields.address_line_1);
    util::set(&mut draft.address_line_2, fields.address_line_2);
    util::set(&mut draft.city, fields.city);
    util::set(&mut draft.state, fields.state);
    util::set(&mut draft.zip_code, fields.zip_code);
    util::set(&mut draft.customer_number, fields.customer_number);
    util::set(&mut draft.record_type, fields.record_type);
    util::set(&mut draft.borrower_first_name, fields.borrower_first_name);
    util::set(&mut draft.borrower_last_name, fields.borrower_last_name);
    util::set(&mut draft.transfer_phone_number, fields.transfer_phone_number);
    util::set(&mut draft.transfer_ip_address, fields.transfer_ip_address);
    util::set(&mut draft.credit_score, fields.credit_score);
    util::set(&mut draft.monthly_income, fields.monthly_income);
    util::set(&mut draft.employment_status, fields.employment_status);
    if let Some(eligible) = fields.eligible_to_call {
        draft.is_eligible_to_call = eligible;
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    coordinator: &Coordinator,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    let color = output::should_color(&global.color_mode());

    match args.command {
        CustomersCommand::List { search } => {
            let mut customers = coordinator.list_customers().await?;
            if let Some(term) = search.as_deref() {
                customers.retain(|c| c.matches_search(term));
            }
            let out = output::render_list(&format, &customers, |c| CustomerRow::from(c), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get { id } => {
            let id = util::parse_id("id", &id)?;
            let (customer, interactions) = coordinator.customer_overview(&id).await?;
            let out = output::render_single(
                &format,
                &customer,
                |c| detail(c, &interactions, color),
                id_of,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Create { fields, from_file } => {
            let mut draft = match from_file {
                Some(path) => util::read_draft(&path)?,
                None => CustomerDraft::default(),
            };
            apply(fields, &mut draft);
            let created = coordinator.create_customer(&draft).await?;
            let out = output::render_single(&format, &created, |c| detail(c, &[], color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Update {
            id,
            fields,
            from_file,
        } => {
            let id = util::parse_id("id", &id)?;
            let current = coordinator.get_customer(&id).await?;
            let mut draft = CustomerDraft::from(&current);
            if let Some(path) = from_file {
                let patch = util::read_json_file(&path)?;
                draft = util::merge_patch(&draft, patch)?;
            }
            apply(fields, &mut draft);
            let updated = coordinator.update_customer(&id, &draft).await?;
            let out = output::render_single(&format, &updated, |c| detail(c, &[], color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            let id = util::parse_id("id", &id)?;
            if !util::confirm(&format!("Delete customer {id}?"), global.yes)? {
                return Ok(());
            }
            coordinator.delete_customer(&id).await?;
            if !global.quiet {
                eprintln!("Customer {id} deleted");
            }
            Ok(())
        }
    }
}
