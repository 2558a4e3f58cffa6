use serde::Serialize;
use serde_json::{Map, Value};

/// The `user_info` object of a pre-call lookup hit.
///
/// Kept as the raw server object: outcome submission echoes every field
/// back, so nothing may be lost to a typed projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CallerProfile(Map<String, Value>);

impl CallerProfile {
    pub fn new(user_info: Map<String, Value>) -> Self {
        Self(user_info)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Field rendered as text; numbers and booleans are stringified,
    /// null and blank strings are absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn full_name(&self) -> Option<String> {
        let name = [self.text("first_name"), self.text("last_name")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        (!name.is_empty()).then_some(name)
    }

    pub fn account_number(&self) -> Option<String> {
        self.text("account_number")
    }

    pub fn phone(&self) -> Option<String> {
        self.text("primary_phone_number")
            .or_else(|| self.text("phone"))
    }

    pub fn email(&self) -> Option<String> {
        self.text("email_address").or_else(|| self.text("email"))
    }

    pub fn product_name(&self) -> Option<String> {
        self.text("product_name")
    }

    pub fn due_amount(&self) -> Option<String> {
        self.text("due_amount")
    }

    pub fn missed_installments(&self) -> Option<String> {
        self.text("no_of_missed_installments")
    }

    pub fn due_date(&self) -> Option<String> {
        self.text("due_date")
    }
}

/// Result of a pre-call lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallerLookup {
    /// Whether the backend reported a successful lookup.
    pub success: bool,
    pub callers: Vec<CallerProfile>,
}

impl CallerLookup {
    /// First caller of a successful lookup, if any.
    pub fn first_match(&self) -> Option<&CallerProfile> {
        if self.success {
            self.callers.first()
        } else {
            None
        }
    }
}

/// Server acknowledgement of a submitted call outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeAck {
    pub success: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
