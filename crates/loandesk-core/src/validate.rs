// ── Form validation ──
//
// Drafts are checked and converted into request bodies here, before the
// coordinator is involved. A draft that fails never issues a request and
// never touches `RequestState`.

use loandesk_api::RawId;
use loandesk_api::types::{CustomerFields, InteractionFields, LoanFields};

use crate::error::CoreError;
use crate::model::customer::DEFAULT_RECORD_TYPE;
use crate::model::loan::LoanStatus;
use crate::model::{CustomerDraft, EntityId, InteractionDraft, LoanDraft};

// ── Helpers ────────────────────────────────────────────────────────

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::validation(field, "is required"))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Phone and SSN fields are typed with punctuation; only the digits go out.
fn digits(value: &str) -> Option<i64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn required_amount(field: &str, value: &str) -> Result<f64, CoreError> {
    let raw = required(field, value)?;
    float(&raw).ok_or_else(|| CoreError::validation(field, "must be a number"))
}

fn optional_amount(field: &str, value: &str) -> Result<Option<f64>, CoreError> {
    match optional(value) {
        None => Ok(None),
        Some(raw) => float(&raw)
            .map(Some)
            .ok_or_else(|| CoreError::validation(field, "must be a number")),
    }
}

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// ── Customers ──────────────────────────────────────────────────────

impl CustomerDraft {
    /// Check required fields and convert to the request body.
    pub fn validate(&self) -> Result<CustomerFields, CoreError> {
        let first_name = required("first_name", &self.first_name)?;
        let last_name = required("last_name", &self.last_name)?;
        let email_address = required("email_address", &self.email_address)?;
        if !is_valid_email(&email_address) {
            return Err(CoreError::validation(
                "email_address",
                "must be a valid email address",
            ));
        }
        let phone = required("primary_phone_number", &self.primary_phone_number)?;
        let account_number = required("account_number", &self.account_number)?;

        Ok(CustomerFields {
            account_number,
            first_name,
            last_name,
            email_address,
            primary_phone_number: digits(&phone),
            ssn: digits(&self.ssn),
            dob: optional(&self.dob),
            address_line_1: optional(&self.address_line_1),
            address_line_2: optional(&self.address_line_2),
            city: optional(&self.city),
            state: optional(&self.state),
            zip_code: int(&self.zip_code),
            customer_number: int(&self.customer_number),
            record_type: optional(&self.record_type)
                .unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_owned()),
            borrower_first_name: optional(&self.borrower_first_name),
            borrower_last_name: optional(&self.borrower_last_name),
            is_eligible_to_call: self.is_eligible_to_call,
            transfer_phone_number: digits(&self.transfer_phone_number),
            transfer_ip_address: optional(&self.transfer_ip_address),
            credit_score: int(&self.credit_score),
            monthly_income: float(&self.monthly_income),
            employment_status: optional(&self.employment_status),
            extra: self.extra.clone(),
        })
    }
}

// ── Loans ──────────────────────────────────────────────────────────

impl LoanDraft {
    /// Check required fields and convert to the request body.
    pub fn validate(&self) -> Result<LoanFields, CoreError> {
        let customer_id = EntityId::from(required("customer_id", &self.customer_id)?);
        let product_name = required("product_name", &self.product_name)?;
        let due_amount = required_amount("due_amount", &self.due_amount)?;
        let installment = required_amount(
            "contractual_installment_amount",
            &self.contractual_installment_amount,
        )?;
        let status = optional(&self.status)
            .map_or(LoanStatus::Active, |s| LoanStatus::parse(&s));

        Ok(LoanFields {
            customer_id: Some(RawId::from(&customer_id)),
            product_name,
            status: status.as_str().to_owned(),
            due_amount: Some(due_amount),
            no_of_missed_installments: int(&self.no_of_missed_installments).unwrap_or(0),
            contractual_installment_amount: Some(installment),
            interest_late_fee: optional_amount("interest_late_fee", &self.interest_late_fee)?,
            minimum_amount: optional_amount("minimum_amount", &self.minimum_amount)?,
            acceptable_pay_later_date: optional(&self.acceptable_pay_later_date),
            acceptable_already_paid_date: optional(&self.acceptable_already_paid_date),
            grace_period_date: optional(&self.grace_period_date),
            due_date: optional(&self.due_date),
            vehicle_id: optional(&self.vehicle_id),
            loan_amount: float(&self.loan_amount),
            interest_rate: float(&self.interest_rate),
            term_months: int(&self.term_months),
            monthly_payment: float(&self.monthly_payment),
            balance_remaining: float(&self.balance_remaining),
            next_payment_date: optional(&self.next_payment_date),
            origination_date: optional(&self.origination_date),
            extra: self.extra.clone(),
        })
    }
}

// ── Interactions ───────────────────────────────────────────────────

impl InteractionDraft {
    pub fn validate(&self) -> Result<InteractionFields, CoreError> {
        Ok(InteractionFields {
            kind: required("type", &self.kind)?,
            status: required("status", &self.status)?,
            notes: self.notes.as_deref().and_then(optional),
            extra: self.extra.clone(),
        })
    }
}
