use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use super::Product;

/// Maximum number of favorited products read per request
pub const MAX_FAVORITES: usize = 10;

/// Maximum number of recent search queries read per request
pub const MAX_RECENT_QUERIES: usize = 5;

/// Behavioral evidence about one user, built fresh for every request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSignal {
    favorite_items: Vec<Product>,
    recent_queries: Vec<String>,
}

impl UserSignal {
    /// Builds a signal from raw store reads
    ///
    /// Favorites are collapsed by product id (first occurrence wins). Queries are
    /// expected newest first and are cut to `MAX_RECENT_QUERIES`.
    pub fn new(favorites: Vec<Product>, mut recent_queries: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let favorite_items = favorites
            .into_iter()
            .filter(|product| seen.insert(product.id))
            .collect();

        recent_queries.truncate(MAX_RECENT_QUERIES);

        Self {
            favorite_items,
            recent_queries,
        }
    }

    pub fn favorite_items(&self) -> &[Product] {
        &self.favorite_items
    }

    pub fn recent_queries(&self) -> &[String] {
        &self.recent_queries
    }

    pub fn favorite_ids(&self) -> HashSet<Uuid> {
        self.favorite_items.iter().map(|p| p.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.favorite_items.is_empty() && self.recent_queries.is_empty()
    }
}

/// Style keywords inferred for a user
///
/// Values are free text and never checked against a vocabulary. Blank entries
/// are dropped on construction since an empty string would be contained in
/// every catalog tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSuggestions(Vec<String>);

impl TagSuggestions {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
