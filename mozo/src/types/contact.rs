use serde::{Deserialize, Serialize};

/// Address book entry returned by `GET /contacts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub solo_address: String,
}
