// Lenient field deserializers.
//
// The backend has changed field types over time: phone numbers and zip
// codes arrive as numbers or strings, amounts sometimes as numeric
// strings, and `success` flags as `"True"` / `"False"` strings. These
// helpers accept every shape seen on the wire and collapse "" to None.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| value_flag(&v)))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_flag(deserializer)?.unwrap_or(false))
}

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::opt_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "super::opt_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_i64")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "super::flag")]
        ok: bool,
        #[serde(default, deserialize_with = "super::null_default")]
        items: Vec<String>,
    }

    fn sample(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).expect("sample should deserialize")
    }

    #[test]
    fn numbers_become_strings() {
        let p = sample(json!({ "text": 5_551_234_567_i64 }));
        assert_eq!(p.text.as_deref(), Some("5551234567"));
    }

    #[test]
    fn blank_strings_are_none() {
        let p = sample(json!({ "text": "  ", "amount": "", "count": "" }));
        assert!(p.text.is_none());
        assert!(p.amount.is_none());
        assert!(p.count.is_none());
    }

    #[test]
    fn numeric_strings_parse() {
        let p = sample(json!({ "amount": "1250.50", "count": "3" }));
        assert_eq!(p.amount, Some(1250.5));
        assert_eq!(p.count, Some(3));
    }

    #[test]
    fn python_style_flags() {
        assert!(sample(json!({ "ok": "True" })).ok);
        assert!(!sample(json!({ "ok": "False" })).ok);
        assert!(sample(json!({ "ok": true })).ok);
        assert!(!sample(json!({})).ok);
        assert!(!sample(json!({ "ok": null })).ok);
    }

    #[test]
    fn null_collections_default_to_empty() {
        assert!(sample(json!({ "items": null })).items.is_empty());
        assert!(sample(json!({})).items.is_empty());
        assert_eq!(sample(json!({ "items": ["a"] })).items, vec!["a".to_owned()]);
    }
}
