use serde::{Deserialize, Serialize};

/// A single todo record as served by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Item {
    /// Row label shown in the list.
    pub fn label(&self) -> String {
        format!("{}. {}", self.id, self.title)
    }

    /// Stable key for the row, derived from the server-assigned id.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

/// One page of a listing, as requested from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}
