use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item as read from the store
///
/// Immutable for the duration of one request. Tags are free text and are
/// compared case-insensitively when scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A catalog item paired with its match score for one pipeline pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    /// Number of the product's tags that fuzzy-match a suggested tag
    pub score: usize,
    pub is_favorite: bool,
}
