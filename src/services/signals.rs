use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::SignalStore,
    models::{
        signal::{MAX_FAVORITES, MAX_RECENT_QUERIES},
        UserId, UserSignal,
    },
    services::bounded,
};

/// Gathers a user's favorites and recent searches
///
/// Both reads are optional evidence: a failed or slow read degrades to an
/// empty section instead of failing the request.
#[derive(Clone)]
pub struct SignalCollector {
    store: Arc<dyn SignalStore>,
    timeout: Duration,
}

impl SignalCollector {
    pub fn new(store: Arc<dyn SignalStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn collect(&self, user_id: UserId) -> UserSignal {
        let (favorites, queries) = tokio::join!(
            bounded(
                "favorites",
                self.timeout,
                self.store.favorite_products(user_id, MAX_FAVORITES)
            ),
            bounded(
                "search_history",
                self.timeout,
                self.store.recent_queries(user_id, MAX_RECENT_QUERIES)
            ),
        );

        let favorites = favorites.unwrap_or_else(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Favorites unavailable, continuing without");
            Vec::new()
        });
        let queries = queries.unwrap_or_else(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Search history unavailable, continuing without");
            Vec::new()
        });

        let signal = UserSignal::new(favorites, queries);

        if signal.is_empty() {
            tracing::info!(user_id = %user_id, "No favorites or search history, inferring from empty context");
        }

        tracing::debug!(
            user_id = %user_id,
            favorites = signal.favorite_items().len(),
            queries = signal.recent_queries().len(),
            "Signals collected"
        );

        signal
    }
}
