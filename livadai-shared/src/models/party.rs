use serde::{Deserialize, Serialize};

/// A user reference as the API returns it: either a bare id or a populated document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PartyRef {
    Id(String),
    Document(PartyDocument),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Id(id) => id,
            PartyRef::Document(doc) => &doc.id,
        }
    }
}
