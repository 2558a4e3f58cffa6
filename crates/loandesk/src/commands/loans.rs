//! Loan command handlers.

use tabled::Tabled;

use loandesk_core::{Coordinator, Loan, LoanDraft, LoanSummary};

use crate::cli::{GlobalOpts, LoanFieldArgs, LoansArgs, LoansCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LoanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Missed")]
    missed: i64,
    #[tabled(rename = "Due Date")]
    due_date: String,
}

impl From<&Loan> for LoanRow {
    fn from(l: &Loan) -> Self {
        Self {
            id: id_of(l),
            customer: l
                .customer
                .clone()
                .or_else(|| l.customer_id.as_ref().map(|id| format!("#{id}")))
                .unwrap_or_default(),
            product: l
                .product_name
                .clone()
                .or_else(|| l.vehicle.clone())
                .unwrap_or_default(),
            status: l.status_label().to_owned(),
            due: output::money(l.due_amount),
            missed: l.no_of_missed_installments,
            due_date: l
                .due_date
                .clone()
                .or_else(|| l.next_payment_date.clone())
                .unwrap_or_default(),
        }
    }
}

fn id_of(l: &Loan) -> String {
    l.id.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn detail(l: &Loan, color: bool) -> String {
    let label = |s: &str| output::paint_label(s, color);
    let mut lines = vec![
        format!("{}           {}", label("ID:"), id_of(l)),
        format!("{}      {}", label("Product:"), l.display_name()),
        format!(
            "{}     {}",
            label("Customer:"),
            l.customer
                .clone()
                .or_else(|| l.customer_id.as_ref().map(|id| format!("#{id}")))
                .unwrap_or_else(|| "-".into())
        ),
        format!(
            "{}       {}",
            label("Status:"),
            output::paint_status(l.status_label(), color)
        ),
        format!("{}   {}", label("Amount due:"), output::money(l.due_amount)),
        format!(
            "{}  {}",
            label("Installment:"),
            output::money(l.contractual_installment_amount)
        ),
        format!("{}       {}", label("Missed:"), l.no_of_missed_installments),
        format!("{}     {}", label("Due date:"), output::or_dash(l.due_date.as_deref())),
    ];
    let optional = [
        ("Late fee:", l.interest_late_fee.map(|v| output::money(Some(v)))),
        ("Minimum:", l.minimum_amount.map(|v| output::money(Some(v)))),
        ("Pay later by:", l.acceptable_pay_later_date.clone()),
        ("Paid on:", l.acceptable_already_paid_date.clone()),
        ("Grace until:", l.grace_period_date.clone()),
        ("Vehicle:", l.vehicle.clone().or_else(|| l.vehicle_id.clone())),
        ("Principal:", l.loan_amount.map(|v| output::money(Some(v)))),
        ("Rate:", l.interest_rate.map(|r| format!("{r}%"))),
        ("Term:", l.term_months.map(|t| format!("{t} months"))),
        ("Balance:", l.balance_remaining.map(|v| output::money(Some(v)))),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{} {value}", label(&format!("{name:<13}"))));
        }
    }
    lines.join("\n")
}

fn summary_line(summary: &LoanSummary) -> String {
    format!(
        "{} loans, {} active/current, {} with missed installments, {} due",
        summary.total,
        summary.performing,
        summary.with_missed_installments,
        output::money(Some(summary.total_due))
    )
}

// ── Field application ───────────────────────────────────────────────

fn apply(fields: LoanFieldArgs, draft: &mut LoanDraft) {
    util::set(&mut draft.customer_id, fields.customer_id);
    util::set(&mut draft.product_name, fields.product_name);
    util::set(&mut draft.status, fields.status);
    util::set(&mut draft.due_amount, fields.due_amount);
    util::set(&mut draft.no_of_missed_installments, fields.missed_installments);
    util::set(
        &mut draft.contractual_installment_amount,
        fields.installment_amount,
    );
    util::set(&mut draft.interest_late_fee, fields.interest_late_fee);
    util::set(&mut draft.minimum_amount, fields.minimum_amount);
    util::set(&mut draft.acceptable_pay_later_date, fields.pay_later_date);
    util::set(&mut draft.acceptable_already_paid_date, fields.already_paid_date);
    util::set(&mut draft.grace_period_date, fields.grace_period_date);
    util::set(&mut draft.due_date, fields.due_date);
    util::set(&mut draft.vehicle_id, fields.vehicle_id);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    coordinator: &Coordinator,
    args: LoansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    let color = output::should_color(&global.color_mode());

    match args.command {
        LoansCommand::List { search, status } => {
            let mut loans = coordinator.list_loans().await?;
            loans.retain(|l| {
                l.matches_status(&status) && search.as_deref().is_none_or(|t| l.matches_search(t))
            });
            let out = output::render_list(&format, &loans, |l| LoanRow::from(l), id_of)?;
            output::print_output(&out, global.quiet);
            if format == OutputFormat::Table && !global.quiet {
                eprintln!("{}", summary_line(&LoanSummary::from_loans(&loans)));
            }
            Ok(())
        }

        LoansCommand::Get { id } => {
            let id = util::parse_id("id", &id)?;
            let loan = coordinator.get_loan(&id).await?;
            let out = output::render_single(&format, &loan, |l| detail(l, color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LoansCommand::Create { fields, from_file } => {
            let mut draft = match from_file {
                Some(path) => util::read_draft(&path)?,
                None => LoanDraft::default(),
            };
            apply(fields, &mut draft);
            let created = coordinator.create_loan(&draft).await?;
            let out = output::render_single(&format, &created, |l| detail(l, color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LoansCommand::Update {
            id,
            fields,
            from_file,
        } => {
            let id = util::parse_id("id", &id)?;
            let current = coordinator.get_loan(&id).await?;
            let mut draft = LoanDraft::from(&current);
            if let Some(path) = from_file {
                draft = util::merge_patch(&draft, util::read_json_file(&path)?)?;
            }
            apply(fields, &mut draft);
            let updated = coordinator.update_loan(&id, &draft).await?;
            let out = output::render_single(&format, &updated, |l| detail(l, color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LoansCommand::Delete { id } => {
            let id = util::parse_id("id", &id)?;
            if !util::confirm(&format!("Delete loan {id}?"), global.yes)? {
                return Ok(());
            }
            coordinator.delete_loan(&id).await?;
            if !global.quiet {
                eprintln!("Loan {id} deleted");
            }
            Ok(())
        }
    }
}
