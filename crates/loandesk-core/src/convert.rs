// ── API-to-domain type conversions ──
//
// Bridges raw `loandesk_api` records into `loandesk_core::model` types.
// Legacy field names are folded into their current counterparts here and
// nowhere else, so front ends only ever see one spelling.

use loandesk_api::types::{
    CallerDetail, CustomerRecord, DashboardStatsResponse, InteractionRecord, LoanRecord,
    PostCallResponse, PreCallResponse,
};

use crate::model::customer::DEFAULT_RECORD_TYPE;
use crate::model::{
    CallerLookup, CallerProfile, Customer, DashboardStats, EntityId, Interaction, Loan,
    LoanStatus, OutcomeAck,
};

// ── Customers ──────────────────────────────────────────────────────

impl From<CustomerRecord> for Customer {
    fn from(r: CustomerRecord) -> Self {
        Self {
            id: r.id.map(EntityId::from),
            account_number: r.account_number,
            first_name: r.first_name.unwrap_or_default(),
            last_name: r.last_name.unwrap_or_default(),
            email: r.email_address.or(r.email),
            phone: r.primary_phone_number.or(r.phone),
            ssn: r.ssn,
            dob: r.dob,
            address_line_1: r.address_line_1.or(r.address),
            address_line_2: r.address_line_2,
            city: r.city,
            state: r.state,
            zip_code: r.zip_code,
            customer_number: r.customer_number,
            record_type: r
                .record_type
                .unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_owned()),
            borrower_first_name: r.borrower_first_name,
            borrower_last_name: r.borrower_last_name,
            is_eligible_to_call: r.is_eligible_to_call.unwrap_or(true),
            transfer_phone_number: r.transfer_phone_number,
            transfer_ip_address: r.transfer_ip_address,
            credit_score: r.credit_score,
            monthly_income: r.monthly_income,
            employment_status: r.employment_status,
            loans: r
                .loans
                .unwrap_or_default()
                .into_iter()
                .map(Loan::from)
                .collect(),
            extra: r.extra,
        }
    }
}

// ── Loans ──────────────────────────────────────────────────────────

impl From<LoanRecord> for Loan {
    fn from(r: LoanRecord) -> Self {
        Self {
            id: r.id.map(EntityId::from),
            customer_id: r.customer_id.map(EntityId::from),
            customer: r.customer,
            product_name: r.product_name,
            status: r.status.as_deref().map(LoanStatus::parse),
            due_amount: r.due_amount,
            no_of_missed_installments: r.no_of_missed_installments.unwrap_or(0),
            contractual_installment_amount: r.contractual_installment_amount,
            interest_late_fee: r.interest_late_fee,
            minimum_amount: r.minimum_amount,
            acceptable_pay_later_date: r.acceptable_pay_later_date,
            acceptable_already_paid_date: r.acceptable_already_paid_date,
            grace_period_date: r.grace_period_date,
            due_date: r.due_date,
            vehicle_id: r.vehicle_id,
            vehicle: r.vehicle,
            loan_amount: r.loan_amount,
            interest_rate: r.interest_rate,
            term_months: r.term_months,
            monthly_payment: r.monthly_payment,
            balance_remaining: r.balance_remaining,
            next_payment_date: r.next_payment_date,
            origination_date: r.origination_date,
            extra: r.extra,
        }
    }
}

// ── Dashboard ──────────────────────────────────────────────────────

impl From<DashboardStatsResponse> for DashboardStats {
    fn from(r: DashboardStatsResponse) -> Self {
        Self {
            total_customers: r.total_customers.unwrap_or(0),
            total_loans: r.total_loans.unwrap_or(0),
            active_loans: r.active_loans.unwrap_or(0),
            past_due_loans: r.past_due_loans.unwrap_or(0),
            total_portfolio: r.total_portfolio.unwrap_or(0.0),
        }
    }
}

// ── Call center ────────────────────────────────────────────────────

impl From<CallerDetail> for CallerProfile {
    fn from(d: CallerDetail) -> Self {
        Self::new(d.user_info)
    }
}

impl From<PreCallResponse> for CallerLookup {
    fn from(r: PreCallResponse) -> Self {
        Self {
            success: r.success,
            callers: r.caller_details.into_iter().map(CallerProfile::from).collect(),
        }
    }
}

impl From<PostCallResponse> for OutcomeAck {
    fn from(r: PostCallResponse) -> Self {
        Self {
            success: r.success,
            extra: r.extra,
        }
    }
}

// ── Interactions ───────────────────────────────────────────────────

impl From<InteractionRecord> for Interaction {
    fn from(r: InteractionRecord) -> Self {
        Self {
            id: r.id.map(EntityId::from),
            customer_id: r.customer_id.map(EntityId::from),
            kind: r.kind,
            status: r.status,
            notes: r.notes,
            created_at: r.created_at,
            extra: r.extra,
        }
    }
}
