use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    db::SignalStore,
    error::AppResult,
    models::{Recommendations, UserId},
    services::{bounded, ranking, ProductScorer, SignalCollector, TagInferencer},
};

/// Generates personalized product recommendations
///
/// Runs Collect → Infer → Score → Rank once per call. Holds no per-user state,
/// so one pipeline is shared by all requests.
#[derive(Clone)]
pub struct RecommendationPipeline {
    collector: SignalCollector,
    inferencer: TagInferencer,
    store: Arc<dyn SignalStore>,
    store_timeout: Duration,
}

impl RecommendationPipeline {
    pub fn new(
        collector: SignalCollector,
        inferencer: TagInferencer,
        store: Arc<dyn SignalStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            collector,
            inferencer,
            store,
            store_timeout,
        }
    }

    /// Produces up to six ranked products for the user
    ///
    /// A gateway failure stops the pass before the catalog is read. A catalog
    /// read failure is fatal; missing favorites or search history are not.
    pub async fn recommend(&self, user_id: UserId) -> AppResult<Recommendations> {
        let start = Instant::now();

        let signal = self.collector.collect(user_id).await;
        let suggestions = self.inferencer.infer(&signal).await?;
        if suggestions.is_empty() {
            tracing::info!(user_id = %user_id, "Model suggested no tags, no product can match");
        }

        let catalog = bounded("catalog", self.store_timeout, self.store.catalog()).await?;

        let favorite_ids = signal.favorite_ids();
        let scored = ProductScorer::new(&suggestions, &favorite_ids).score_all(&catalog);
        let recommendations = ranking::select(scored);

        tracing::info!(
            user_id = %user_id,
            catalog = catalog.len(),
            recommended = recommendations.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Recommendations generated"
        );

        Ok(Recommendations {
            recommendations,
            suggested_tags: suggestions.into_inner(),
        })
    }
}
