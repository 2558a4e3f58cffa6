//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use loandesk_core::EntityId;

use crate::error::CliError;

/// Parse a record ID argument.
pub fn parse_id(field: &str, raw: &str) -> Result<EntityId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(EntityId::from(trimmed))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Overlay the keys of a JSON object onto a draft. Numbers are accepted
/// where the draft expects text, since exported records carry them as
/// numbers; nulls leave the draft's value alone. Keys the draft has no
/// input for keep their JSON type.
pub fn merge_patch<T>(draft: &T, patch: Value) -> Result<T, CliError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = patch else {
        return Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object".into(),
        });
    };
    let Value::Object(mut base) = serde_json::to_value(draft)? else {
        return Err(CliError::Internal("draft did not serialize to an object".into()));
    };
    for (key, value) in patch {
        let text_field = matches!(base.get(&key), Some(Value::String(_) | Value::Null));
        let value = match value {
            Value::Number(n) if text_field => Value::String(n.to_string()),
            Value::Null => continue,
            other => other,
        };
        base.insert(key, value);
    }
    serde_json::from_value(Value::Object(base)).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: e.to_string(),
    })
}

/// Read a form draft from a JSON file, starting from the draft's defaults.
pub fn read_draft<T>(path: &Path) -> Result<T, CliError>
where
    T: Default + Serialize + DeserializeOwned,
{
    merge_patch(&T::default(), read_json_file(path)?)
}

/// Overwrite `target` when a flag was given.
pub fn set(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use loandesk_core::LoanDraft;

    use super::*;

    #[test]
    fn draft_from_file_accepts_numbers() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"{{"customer_id": 7, "product_name": "Auto 60m", "due_amount": 250.5, "vehicle_id": null}}"#
        )
        .expect("write");

        let draft: LoanDraft = read_draft(file.path()).expect("draft");
        assert_eq!(draft.customer_id, "7");
        assert_eq!(draft.due_amount, "250.5");
        assert_eq!(draft.status, "active");
        assert_eq!(draft.vehicle_id, "");
    }

    #[test]
    fn unmodelled_keys_keep_their_type() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"due_amount": 90, "risk_score": 7, "risk_band": "B"}}"#).expect("write");

        let draft: LoanDraft = read_draft(file.path()).expect("draft");
        assert_eq!(draft.due_amount, "90");
        assert_eq!(draft.extra.get("risk_score"), Some(&serde_json::json!(7)));
        assert_eq!(draft.extra.get("risk_band"), Some(&serde_json::json!("B")));
    }

    #[test]
    fn non_object_files_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "[1, 2]").expect("write");
        let err = read_draft::<LoanDraft>(file.path()).expect_err("array");
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(parse_id("id", "  ").is_err());
        assert_eq!(parse_id("id", "42").expect("id"), EntityId::Numeric(42));
    }
}
