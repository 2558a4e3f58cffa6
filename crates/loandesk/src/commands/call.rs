//! Call-center handlers: caller lookup and outcome recording.

use loandesk_core::{CallSession, CallerProfile, Coordinator, OutcomeForm};

use crate::cli::{CallArgs, CallCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(p: &CallerProfile, color: bool) -> String {
    let label = |s: &str| output::paint_label(s, color);
    let field = |name: &str, value: Option<String>| {
        format!("{} {}", label(&format!("{name:<13}")), value.unwrap_or_else(|| "-".into()))
    };
    [
        field("Caller:", p.full_name()),
        field("Account:", p.account_number()),
        field("Phone:", p.phone()),
        field("Email:", p.email()),
        field("Product:", p.product_name()),
        field("Amount due:", p.due_amount()),
        field("Missed:", p.missed_installments()),
        field("Due date:", p.due_date()),
    ]
    .join("\n")
}

fn id_of(p: &CallerProfile) -> String {
    p.account_number().unwrap_or_default()
}

pub async fn handle(
    coordinator: &Coordinator,
    args: CallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    let color = output::should_color(&global.color_mode());
    let mut session = CallSession::new(coordinator.clone());

    match args.command {
        CallCommand::Lookup { phone } => {
            let profile = session.lookup(&phone).await?;
            let out = output::render_single(&format, profile, |p| detail(p, color), id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CallCommand::Outcome {
            phone,
            disposition,
            amount,
            pay_later_date,
            contact_type,
            duration,
            call_type,
            end_status,
            notes,
        } => {
            let profile = session.lookup(&phone).await?;
            if !global.quiet {
                eprintln!(
                    "Caller: {} ({})",
                    profile.full_name().unwrap_or_else(|| phone.clone()),
                    profile.account_number().unwrap_or_else(|| "no account".into())
                );
            }

            let mut form = OutcomeForm {
                final_disposition: disposition,
                contact_type,
                call_type,
                ..OutcomeForm::default()
            };
            util::set(&mut form.user_agreed_payment_amount, amount);
            util::set(&mut form.pay_later_date, pay_later_date);
            util::set(&mut form.call_duration, duration);
            util::set(&mut form.call_end_status, end_status);
            util::set(&mut form.notes, notes);

            let ack = session.submit(&form).await?;
            if !ack.success {
                return Err(CliError::UnexpectedResponse {
                    message: "the server did not acknowledge the call outcome".into(),
                });
            }
            let out = output::render_single(
                &format,
                &ack,
                |_| format!("Outcome recorded: {}", form.final_disposition),
                |_| form.final_disposition.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
