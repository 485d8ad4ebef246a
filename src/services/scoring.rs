use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{Product, ScoredProduct, TagSuggestions};

/// Case-insensitive containment in either direction
///
/// `"boho-chic"` matches `"boho"` and `"vintage"` matches `"vintage-denim"`.
pub fn fuzzy_tag_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Scores catalog products against inferred style tags
pub struct ProductScorer<'a> {
    suggestions: &'a [String],
    favorite_ids: &'a HashSet<Uuid>,
}

impl<'a> ProductScorer<'a> {
    pub fn new(suggestions: &'a TagSuggestions, favorite_ids: &'a HashSet<Uuid>) -> Self {
        Self {
            suggestions: suggestions.as_slice(),
            favorite_ids,
        }
    }

    /// Number of the product's tags that match at least one suggestion
    pub fn score(&self, product: &Product) -> usize {
        product
            .tags
            .iter()
            .filter(|tag| {
                self.suggestions
                    .iter()
                    .any(|suggested| fuzzy_tag_match(tag, suggested))
            })
            .count()
    }

    /// Scores every product, preserving catalog order
    pub fn score_all<'p>(&self, catalog: &'p [Product]) -> Vec<ScoredProduct<'p>> {
        catalog
            .iter()
            .map(|product| ScoredProduct {
                product,
                score: self.score(product),
                is_favorite: self.favorite_ids.contains(&product.id),
            })
            .collect()
    }
}
