use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{EntityId, Loan};

pub const DEFAULT_RECORD_TYPE: &str = "responsible_party";

/// A borrower (or co-signer / guarantor) record.
///
/// Legacy field names (`email`, `phone`, `address`) have already been
/// folded into `email`, `phone`, and `address_line_1` by the time a
/// `Customer` exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: Option<EntityId>,
    pub account_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ssn: Option<String>,
    pub dob: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub customer_number: Option<String>,
    pub record_type: String,
    pub borrower_first_name: Option<String>,
    pub borrower_last_name: Option<String>,
    pub is_eligible_to_call: bool,
    pub transfer_phone_number: Option<String>,
    pub transfer_ip_address: Option<String>,
    pub credit_score: Option<i64>,
    pub monthly_income: Option<f64>,
    pub employment_status: Option<String>,
    /// Present only on single-customer fetches.
    pub loans: Vec<Loan>,
    /// Fields the backend sent that this model does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Single-line postal address, if any part of it is known.
    pub fn postal_address(&self) -> Option<String> {
        let street = [&self.address_line_1, &self.address_line_2]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let locality = [&self.city, &self.state, &self.zip_code]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let parts: Vec<&str> = [street.as_str(), locality.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Search used by the customer list: name or email (case-insensitive)
    /// or a phone substring.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.full_name().to_lowercase().contains(&needle)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
            || self.phone.as_deref().is_some_and(|p| p.contains(term))
    }
}

/// Editable customer fields, as typed into a form or read from a JSON file.
///
/// Every field is text until validation converts it into the wire body;
/// that mirrors how the fields are collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDraft {
    pub account_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub primary_phone_number: String,
    pub ssn: String,
    pub dob: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub customer_number: String,
    pub record_type: String,
    pub borrower_first_name: String,
    pub borrower_last_name: String,
    pub is_eligible_to_call: bool,
    pub transfer_phone_number: String,
    pub transfer_ip_address: String,
    pub credit_score: String,
    pub monthly_income: String,
    pub employment_status: String,
    /// Server fields without a form input; carried through updates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            account_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email_address: String::new(),
            primary_phone_number: String::new(),
            ssn: String::new(),
            dob: String::new(),
            address_line_1: String::new(),
            address_line_2: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            customer_number: String::new(),
            record_type: DEFAULT_RECORD_TYPE.into(),
            borrower_first_name: String::new(),
            borrower_last_name: String::new(),
            is_eligible_to_call: true,
            transfer_phone_number: String::new(),
            transfer_ip_address: String::new(),
            credit_score: String::new(),
            monthly_income: String::new(),
            employment_status: String::new(),
            extra: Map::new(),
        }
    }
}

impl From<&Customer> for CustomerDraft {
    /// Pre-fill an edit form from an existing record.
    fn from(c: &Customer) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            account_number: text(&c.account_number),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            email_address: text(&c.email),
            primary_phone_number: text(&c.phone),
            ssn: text(&c.ssn),
            dob: text(&c.dob),
            address_line_1: text(&c.address_line_1),
            address_line_2: text(&c.address_line_2),
            city: text(&c.city),
            state: text(&c.state),
            zip_code: text(&c.zip_code),
            customer_number: text(&c.customer_number),
            record_type: c.record_type.clone(),
            borrower_first_name: text(&c.borrower_first_name),
            borrower_last_name: text(&c.borrower_last_name),
            is_eligible_to_call: c.is_eligible_to_call,
            transfer_phone_number: text(&c.transfer_phone_number),
            transfer_ip_address: text(&c.transfer_ip_address),
            credit_score: c.credit_score.map(|s| s.to_string()).unwrap_or_default(),
            monthly_income: c.monthly_income.map(|m| m.to_string()).unwrap_or_default(),
            employment_status: text(&c.employment_status),
            extra: c.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Customer {
        Customer {
            id: Some(EntityId::Numeric(7)),
            account_number: Some("ACC-7".into()),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("Ada@Example.com".into()),
            phone: Some("5550100".into()),
            ssn: None,
            dob: None,
            address_line_1: Some("1 Analytical Way".into()),
            address_line_2: None,
            city: Some("Atlanta".into()),
            state: Some("GA".into()),
            zip_code: Some("30301".into()),
            customer_number: None,
            record_type: DEFAULT_RECORD_TYPE.into(),
            borrower_first_name: None,
            borrower_last_name: None,
            is_eligible_to_call: true,
            transfer_phone_number: None,
            transfer_ip_address: None,
            credit_score: Some(712),
            monthly_income: Some(4200.5),
            employment_status: None,
            loans: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn search_matches_name_email_and_phone() {
        let c = ada();
        assert!(c.matches_search("ada lov"));
        assert!(c.matches_search("example.COM"));
        assert!(c.matches_search("0100"));
        assert!(c.matches_search("  "));
        assert!(!c.matches_search("babbage"));
    }

    #[test]
    fn postal_address_joins_known_parts() {
        assert_eq!(
            ada().postal_address().as_deref(),
            Some("1 Analytical Way, Atlanta GA 30301")
        );
    }

    #[test]
    fn draft_prefills_from_customer() {
        let draft = CustomerDraft::from(&ada());
        assert_eq!(draft.email_address, "Ada@Example.com");
        assert_eq!(draft.primary_phone_number, "5550100");
        assert_eq!(draft.credit_score, "712");
        assert_eq!(draft.monthly_income, "4200.5");
        assert!(draft.is_eligible_to_call);
    }

    #[test]
    fn draft_defaults() {
        let draft = CustomerDraft::default();
        assert_eq!(draft.record_type, "responsible_party");
        assert!(draft.is_eligible_to_call);
    }
}
