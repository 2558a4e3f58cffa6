// Wire types for the loan-servicing REST API.
//
// Response records are deliberately lenient: both eras of renamed fields
// (`email_address` / `email`, `primary_phone_number` / `phone`,
// `address_line_1` / `address`) are captured side by side, and anything
// unrecognized lands in `extra` so a read-modify-write never drops data.
// `loandesk-core` normalizes these into domain types exactly once.
//
// Request bodies mirror what the servicing dashboard submits: numeric
// fields go out as numbers, absent values as `null`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de;

// ── Identifiers ──────────────────────────────────────────────────────

/// A record identifier as it appears on the wire: usually an integer,
/// occasionally a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        s.parse().map_or_else(|_| Self::Text(s.to_owned()), Self::Number)
    }
}

// ── Customers ────────────────────────────────────────────────────────

/// Customer record as returned by `/customers` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub account_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub email_address: Option<String>,
    /// Legacy name of `email_address`.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub primary_phone_number: Option<String>,
    /// Legacy name of `primary_phone_number`.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub ssn: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address_line_1: Option<String>,
    /// Legacy name of `address_line_1`.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address_line_2: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub customer_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub record_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub borrower_first_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub borrower_last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_flag")]
    pub is_eligible_to_call: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub transfer_phone_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub transfer_ip_address: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub credit_score: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub monthly_income: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub employment_status: Option<String>,
    /// Loans embedded by `GET /customers/{id}`.
    #[serde(default)]
    pub loans: Option<Vec<LoanRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /customers` and `PUT /customers/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerFields {
    pub account_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub primary_phone_number: Option<i64>,
    pub ssn: Option<i64>,
    pub dob: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<i64>,
    pub customer_number: Option<i64>,
    pub record_type: String,
    pub borrower_first_name: Option<String>,
    pub borrower_last_name: Option<String>,
    pub is_eligible_to_call: bool,
    pub transfer_phone_number: Option<i64>,
    pub transfer_ip_address: Option<String>,
    pub credit_score: Option<i64>,
    pub monthly_income: Option<f64>,
    pub employment_status: Option<String>,
    /// Server fields this client does not model, sent back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Loans ────────────────────────────────────────────────────────────

/// Loan record as returned by `/loans` endpoints (and embedded in customers).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub customer_id: Option<RawId>,
    /// Borrower display name, denormalized by the list endpoint.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub due_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub no_of_missed_installments: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub contractual_installment_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub interest_late_fee: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub minimum_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub acceptable_pay_later_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub acceptable_already_paid_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub grace_period_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub due_date: Option<String>,

    // Fields from the original vehicle-loan schema.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub vehicle_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub vehicle: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub loan_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub interest_rate: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub term_months: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub monthly_payment: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub balance_remaining: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub next_payment_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub origination_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /loans` and `PUT /loans/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoanFields {
    pub customer_id: Option<RawId>,
    pub product_name: String,
    pub status: String,
    pub due_amount: Option<f64>,
    pub no_of_missed_installments: i64,
    pub contractual_installment_amount: Option<f64>,
    pub interest_late_fee: Option<f64>,
    pub minimum_amount: Option<f64>,
    pub acceptable_pay_later_date: Option<String>,
    pub acceptable_already_paid_date: Option<String>,
    pub grace_period_date: Option<String>,
    pub due_date: Option<String>,
    pub vehicle_id: Option<String>,
    pub loan_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub term_months: Option<i64>,
    pub monthly_payment: Option<f64>,
    pub balance_remaining: Option<f64>,
    pub next_payment_date: Option<String>,
    pub origination_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Portfolio counters from `GET /dashboard-stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_customers: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_loans: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub active_loans: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub past_due_loans: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub total_portfolio: Option<f64>,
}

// ── Call center ──────────────────────────────────────────────────────

/// Response of `GET /fetch_user_profile_pre_call/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreCallResponse {
    /// Sent as `"True"` / `"False"` by the backend.
    #[serde(default, deserialize_with = "de::flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub caller_details: Vec<CallerDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One caller match. `user_info` is kept as a raw object because outcome
/// submission echoes every field of it back to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallerDetail {
    #[serde(default, deserialize_with = "de::null_default")]
    pub user_info: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /post_call_outcomes/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallOutcomePayload {
    pub user_info: Map<String, Value>,
    pub outcome_details: OutcomeDetails,
    pub call_outcome_note: String,
    pub metadata: OutcomeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeDetails {
    pub final_disposition: String,
    pub user_agreed_payment_amount: String,
    pub pay_later_date: String,
    pub contact_type: String,
    pub call_duration: String,
    pub call_type: String,
    pub call_end_status: String,
    pub notes: String,
    /// ISO-8601 timestamp of submission.
    pub update_date_time: String,
    /// `"CALL"` followed by epoch milliseconds.
    pub call_identifier: String,
    pub dialing_status: DialingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialingStatus {
    pub long_code: String,
    pub short_code: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeMetadata {
    pub creation_date: String,
    pub source: String,
    pub status: String,
}

/// Response of `POST /post_call_outcomes/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCallResponse {
    #[serde(default, deserialize_with = "de::flag")]
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Interactions ─────────────────────────────────────────────────────

/// Contact history entry from `/customers/{id}/interactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub customer_id: Option<RawId>,
    #[serde(rename = "type", default, deserialize_with = "de::opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /customers/{id}/interactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteractionFields {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
