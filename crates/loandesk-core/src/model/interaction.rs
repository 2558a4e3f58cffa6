use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EntityId;

/// One entry in a customer's contact history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub id: Option<EntityId>,
    pub customer_id: Option<EntityId>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields for logging a new interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub notes: Option<String>,
    /// Additional backend fields passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for InteractionDraft {
    fn default() -> Self {
        Self {
            kind: "Call".into(),
            status: "Completed".into(),
            notes: None,
            extra: Map::new(),
        }
    }
}
