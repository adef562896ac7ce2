use serde::{Deserialize, Serialize};

/// Snapshot of a business as delivered by the places search and persisted
/// for the prospection list. The `id` is the provider's place id and is the
/// key for every per-business map in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, rename = "userRatingsTotal")]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Business {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            phone: None,
            email: None,
            rating: None,
            rating_count: None,
            tax_id: None,
            city: None,
        }
    }
}
