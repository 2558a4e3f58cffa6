use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::EnumString;

use super::EntityId;

/// Servicing status of a loan. Unknown strings survive as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LoanStatus {
    Active,
    Current,
    PastDue,
    Arranged,
    Delinquent,
    Default,
    Closed,
    #[strum(default)]
    Other(String),
}

impl LoanStatus {
    /// Every named status, in servicing order.
    pub const KNOWN: [Self; 7] = [
        Self::Active,
        Self::Current,
        Self::PastDue,
        Self::Arranged,
        Self::Delinquent,
        Self::Default,
        Self::Closed,
    ];

    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse()
            .unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Current => "current",
            Self::PastDue => "past_due",
            Self::Arranged => "arranged",
            Self::Delinquent => "delinquent",
            Self::Default => "default",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }

    /// `active` and `current` both count as performing loans.
    pub fn is_performing(&self) -> bool {
        matches!(self, Self::Active | Self::Current)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LoanStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An auto loan under servicing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    pub id: Option<EntityId>,
    pub customer_id: Option<EntityId>,
    /// Borrower display name, when the backend denormalizes it.
    pub customer: Option<String>,
    pub product_name: Option<String>,
    pub status: Option<LoanStatus>,
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
    pub vehicle: Option<String>,
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

impl Loan {
    /// Product name, or `Loan #<id>` when the product is unnamed.
    pub fn display_name(&self) -> String {
        match (&self.product_name, &self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("Loan #{id}"),
            (None, None) => "Loan".into(),
        }
    }

    pub fn status_label(&self) -> &str {
        self.status.as_ref().map_or("Unknown", LoanStatus::as_str)
    }

    /// Case-insensitive match on borrower, vehicle, or product; substring
    /// match on the id.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        let text_hit = [&self.customer, &self.vehicle, &self.product_name]
            .into_iter()
            .flatten()
            .any(|v| v.to_lowercase().contains(&needle));
        text_hit
            || self
                .id
                .as_ref()
                .is_some_and(|id| id.to_string().contains(term))
    }

    /// Exact status filter; `"all"` matches everything.
    pub fn matches_status(&self, filter: &str) -> bool {
        filter.eq_ignore_ascii_case("all")
            || self
                .status
                .as_ref()
                .is_some_and(|s| s.as_str().eq_ignore_ascii_case(filter))
    }
}

/// Aggregates shown above the loan table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoanSummary {
    pub total: usize,
    pub performing: usize,
    pub with_missed_installments: usize,
    pub total_due: f64,
}

impl LoanSummary {
    pub fn from_loans<'a>(loans: impl IntoIterator<Item = &'a Loan>) -> Self {
        loans.into_iter().fold(Self::default(), |mut acc, loan| {
            acc.total += 1;
            if loan.status.as_ref().is_some_and(LoanStatus::is_performing) {
                acc.performing += 1;
            }
            if loan.no_of_missed_installments > 0 {
                acc.with_missed_installments += 1;
            }
            acc.total_due += loan.due_amount.unwrap_or(0.0);
            acc
        })
    }
}

/// Editable loan fields, as typed into a form or read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDraft {
    pub customer_id: String,
    pub product_name: String,
    pub status: String,
    pub due_amount: String,
    pub no_of_missed_installments: String,
    pub contractual_installment_amount: String,
    pub interest_late_fee: String,
    pub minimum_amount: String,
    pub acceptable_pay_later_date: String,
    pub acceptable_already_paid_date: String,
    pub grace_period_date: String,
    pub due_date: String,
    pub vehicle_id: String,
    pub loan_amount: String,
    pub interest_rate: String,
    pub term_months: String,
    pub monthly_payment: String,
    pub balance_remaining: String,
    pub next_payment_date: String,
    pub origination_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LoanDraft {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            product_name: String::new(),
            status: LoanStatus::Active.as_str().into(),
            due_amount: String::new(),
            no_of_missed_installments: "0".into(),
            contractual_installment_amount: String::new(),
            interest_late_fee: String::new(),
            minimum_amount: String::new(),
            acceptable_pay_later_date: String::new(),
            acceptable_already_paid_date: String::new(),
            grace_period_date: String::new(),
            due_date: String::new(),
            vehicle_id: String::new(),
            loan_amount: String::new(),
            interest_rate: String::new(),
            term_months: String::new(),
            monthly_payment: String::new(),
            balance_remaining: String::new(),
            next_payment_date: String::new(),
            origination_date: String::new(),
            extra: Map::new(),
        }
    }
}

impl From<&Loan> for LoanDraft {
    fn from(l: &Loan) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            customer_id: l.customer_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            product_name: text(&l.product_name),
            status: l
                .status
                .as_ref()
                .map_or_else(|| LoanStatus::Active.as_str().into(), |s| s.as_str().into()),
            due_amount: num(l.due_amount),
            no_of_missed_installments: l.no_of_missed_installments.to_string(),
            contractual_installment_amount: num(l.contractual_installment_amount),
            interest_late_fee: num(l.interest_late_fee),
            minimum_amount: num(l.minimum_amount),
            acceptable_pay_later_date: text(&l.acceptable_pay_later_date),
            acceptable_already_paid_date: text(&l.acceptable_already_paid_date),
            grace_period_date: text(&l.grace_period_date),
            due_date: text(&l.due_date),
            vehicle_id: text(&l.vehicle_id),
            loan_amount: num(l.loan_amount),
            interest_rate: num(l.interest_rate),
            term_months: l.term_months.map(|t| t.to_string()).unwrap_or_default(),
            monthly_payment: num(l.monthly_payment),
            balance_remaining: num(l.balance_remaining),
            next_payment_date: text(&l.next_payment_date),
            origination_date: text(&l.origination_date),
            extra: l.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse_back_to_themselves() {
        for status in &LoanStatus::KNOWN {
            assert_eq!(LoanStatus::parse(status.as_str()), *status);
        }
        assert!(!LoanStatus::KNOWN.contains(&LoanStatus::parse("written_off")));
    }

    fn loan(id: i64, status: &str, due: f64, missed: i64) -> Loan {
        Loan {
            id: Some(EntityId::Numeric(id)),
            customer_id: None,
            customer: Some("Ada Lovelace".into()),
            product_name: None,
            status: Some(LoanStatus::parse(status)),
            due_amount: Some(due),
            no_of_missed_installments: missed,
            contractual_installment_amount: None,
            interest_late_fee: None,
            minimum_amount: None,
            acceptable_pay_later_date: None,
            acceptable_already_paid_date: None,
            grace_period_date: None,
            due_date: None,
            vehicle_id: None,
            vehicle: Some("2019 Toyota Camry".into()),
            loan_amount: None,
            interest_rate: None,
            term_months: None,
            monthly_payment: None,
            balance_remaining: None,
            next_payment_date: None,
            origination_date: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn status_parsing() {
        assert_eq!(LoanStatus::parse("past_due"), LoanStatus::PastDue);
        assert_eq!(LoanStatus::parse("ACTIVE"), LoanStatus::Active);
        assert_eq!(
            LoanStatus::parse("charged_off"),
            LoanStatus::Other("charged_off".into())
        );
        assert_eq!(LoanStatus::Other("charged_off".into()).to_string(), "charged_off");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut l = loan(12, "active", 0.0, 0);
        assert_eq!(l.display_name(), "Loan #12");
        l.product_name = Some("Auto 60m".into());
        assert_eq!(l.display_name(), "Auto 60m");
    }

    #[test]
    fn search_and_status_filters() {
        let l = loan(314, "past_due", 10.0, 1);
        assert!(l.matches_search("camry"));
        assert!(l.matches_search("ADA"));
        assert!(l.matches_search("31"));
        assert!(!l.matches_search("honda"));
        assert!(l.matches_status("all"));
        assert!(l.matches_status("past_due"));
        assert!(!l.matches_status("active"));
    }

    #[test]
    fn summary_counts_performing_and_due() {
        let loans = [
            loan(1, "active", 100.0, 0),
            loan(2, "current", 50.5, 0),
            loan(3, "past_due", 200.0, 3),
        ];
        let summary = LoanSummary::from_loans(&loans);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.performing, 2);
        assert_eq!(summary.with_missed_installments, 1);
        assert!((summary.total_due - 350.5).abs() < f64::EPSILON);
    }
}
