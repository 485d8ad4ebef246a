use std::sync::Arc;

use crate::{
    config::Config,
    db::SignalStore,
    error::AppResult,
    services::{
        providers::{ChatCompletionsGateway, HttpIdentityProvider, IdentityProvider},
        RecommendationPipeline, SignalCollector, TagInferencer,
    },
};

/// Shared application state
///
/// Only read-only handles live here; every request builds its own signals and
/// scores.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub pipeline: Arc<RecommendationPipeline>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityProvider>, pipeline: RecommendationPipeline) -> Self {
        Self {
            identity,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Wires the HTTP providers and the pipeline from configuration
    pub fn from_config(config: &Config, store: Arc<dyn SignalStore>) -> AppResult<Self> {
        let identity = HttpIdentityProvider::new(
            config.auth_url.clone(),
            config.auth_api_key.clone(),
            config.auth_timeout(),
        )?;

        let gateway = ChatCompletionsGateway::new(
            config.gateway_api_key.clone(),
            config.gateway_url.clone(),
            config.gateway_timeout(),
            config.gateway_max_retries,
        )?;

        let pipeline = RecommendationPipeline::new(
            SignalCollector::new(store.clone(), config.store_timeout()),
            TagInferencer::new(Arc::new(gateway), config.gateway_model.clone()),
            store,
            config.store_timeout(),
        );

        Ok(Self::new(Arc::new(identity), pipeline))
    }
}
