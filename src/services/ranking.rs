use crate::models::{Product, ScoredProduct};

/// Maximum number of products returned to the caller
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Selects the final recommendation list from scored products
///
/// Favorites and zero-score products are dropped. The rest is ordered by score,
/// highest first, with a stable sort so equal scores keep catalog read order.
/// An empty result is a valid outcome.
pub fn select(mut scored: Vec<ScoredProduct<'_>>) -> Vec<Product> {
    scored.retain(|candidate| !candidate.is_favorite && candidate.score > 0);
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|candidate| candidate.product.clone())
        .collect()
}
