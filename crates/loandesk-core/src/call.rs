// ── Call-center workflow ──
//
// Pre-call lookup stores the caller's profile; outcome submission reuses
// it without fetching again. The session is cleared once the server
// acknowledges an outcome.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, info};

use loandesk_api::types::{CallOutcomePayload, DialingStatus, OutcomeDetails, OutcomeMetadata};

use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{CallerProfile, OutcomeAck};

pub const DEFAULT_CONTACT_TYPE: &str = "Phone";
pub const DEFAULT_CALL_TYPE: &str = "OUTBOUND";

/// Dispositions offered to agents.
pub const DISPOSITIONS: [&str; 6] = [
    "Promise_to_Pay",
    "Resolved",
    "No_Answer",
    "Callback_Scheduled",
    "Refused_to_Pay",
    "Dispute",
];

const DIALED_ANSWERED: (&str, &str, &str) =
    ("Dialed - Answered", "DAN", "Customer contact successful");

// ── Call identifiers ─────────────────────────────────────────────────

static LAST_CALL_MILLIS: AtomicI64 = AtomicI64::new(0);

/// `CALL<epoch millis>`, strictly increasing within the process so two
/// submissions in the same millisecond still differ.
pub fn next_call_identifier(now: DateTime<Utc>) -> String {
    let now_ms = now.timestamp_millis();
    let mut prev = LAST_CALL_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now_ms.max(prev + 1);
        match LAST_CALL_MILLIS.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return format!("CALL{next}"),
            Err(actual) => prev = actual,
        }
    }
}

fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Outcome form ─────────────────────────────────────────────────────

/// What the agent records about a finished call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeForm {
    pub final_disposition: String,
    pub user_agreed_payment_amount: String,
    pub pay_later_date: String,
    pub contact_type: String,
    pub call_duration: String,
    pub call_type: String,
    pub call_end_status: String,
    pub notes: String,
}

impl Default for OutcomeForm {
    fn default() -> Self {
        Self {
            final_disposition: String::new(),
            user_agreed_payment_amount: String::new(),
            pay_later_date: String::new(),
            contact_type: DEFAULT_CONTACT_TYPE.into(),
            call_duration: String::new(),
            call_type: DEFAULT_CALL_TYPE.into(),
            call_end_status: String::new(),
            notes: String::new(),
        }
    }
}

impl OutcomeForm {
    fn agreed_amount(&self) -> Option<Number> {
        let amount = self.user_agreed_payment_amount.trim();
        if amount.is_empty() {
            return None;
        }
        amount.parse::<f64>().ok().and_then(Number::from_f64)
    }
}

/// Assemble the outcome body from a stored profile and the agent's form.
pub fn build_outcome_payload(
    profile: &CallerProfile,
    form: &OutcomeForm,
    now: DateTime<Utc>,
) -> CallOutcomePayload {
    let mut user_info = profile.as_map().clone();
    if let Some(amount) = form.agreed_amount() {
        user_info.insert("due_amount".into(), Value::Number(amount));
    }

    let timestamp = iso8601(now);
    let (long_code, short_code, details) = DIALED_ANSWERED;

    CallOutcomePayload {
        user_info,
        outcome_details: OutcomeDetails {
            final_disposition: form.final_disposition.clone(),
            user_agreed_payment_amount: form.user_agreed_payment_amount.clone(),
            pay_later_date: form.pay_later_date.clone(),
            contact_type: form.contact_type.clone(),
            call_duration: form.call_duration.clone(),
            call_type: form.call_type.clone(),
            call_end_status: form.call_end_status.clone(),
            notes: form.notes.clone(),
            update_date_time: timestamp.clone(),
            call_identifier: next_call_identifier(now),
            dialing_status: DialingStatus {
                long_code: long_code.into(),
                short_code: short_code.into(),
                details: details.into(),
            },
        },
        call_outcome_note: form.notes.clone(),
        metadata: OutcomeMetadata {
            creation_date: timestamp,
            source: form.contact_type.clone(),
            status: form.final_disposition.clone(),
        },
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// One agent's lookup-then-record flow.
#[derive(Debug)]
pub struct CallSession {
    coordinator: Coordinator,
    profile: Option<CallerProfile>,
}

impl CallSession {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            profile: None,
        }
    }

    /// Profile from the last successful lookup, if it has not been used yet.
    pub fn profile(&self) -> Option<&CallerProfile> {
        self.profile.as_ref()
    }

    /// Start over with a preloaded profile.
    pub fn with_profile(mut self, profile: CallerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn reset(&mut self) {
        self.profile = None;
    }

    /// Look up the caller. Any previous profile is discarded first, so a
    /// miss or a failure leaves the session empty.
    pub async fn lookup(&mut self, phone_number: &str) -> Result<&CallerProfile, CoreError> {
        self.profile = None;
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(CoreError::validation("caller_number", "is required"));
        }

        let lookup = self.coordinator.lookup_profile(phone_number).await?;
        let Some(found) = lookup.first_match() else {
            debug!(caller = phone_number, "no caller matched");
            return Err(CoreError::NotFound {
                entity_type: "Caller".into(),
                identifier: phone_number.to_owned(),
            });
        };
        Ok(self.profile.insert(found.clone()))
    }

    /// Post the outcome for the stored profile.
    pub async fn submit(&mut self, form: &OutcomeForm) -> Result<OutcomeAck, CoreError> {
        let Some(profile) = self.profile.as_ref() else {
            return Err(CoreError::validation("caller", "look up a caller first"));
        };

        let payload = build_outcome_payload(profile, form, Utc::now());
        let ack = self.coordinator.submit_outcome(&payload).await?;
        if ack.success {
            info!(
                call_identifier = %payload.outcome_details.call_identifier,
                disposition = %form.final_disposition,
                "call outcome recorded"
            );
            self.profile = None;
        }
        Ok(ack)
    }
}
