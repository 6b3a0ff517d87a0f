use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An organization groups can belong to. Read-only through the API.
///
/// Groups reference organizations by `organization_name`, not by id. Fields
/// beyond id and name are kept as-is and returned unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Organization {
    pub organization_id: String,
    pub organization_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Organization {
    /// Organization ids are compared case-insensitively.
    pub fn id_matches(&self, raw: &str) -> bool {
        self.organization_id.to_lowercase() == raw.to_lowercase()
    }
}
