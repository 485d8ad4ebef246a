use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub mod inference;
pub mod providers;
pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod signals;

pub use inference::TagInferencer;
pub use recommendations::RecommendationPipeline;
pub use scoring::ProductScorer;
pub use signals::SignalCollector;

/// Runs an external call under a deadline
///
/// An elapsed deadline becomes `AppError::Timeout` naming the call.
pub(crate) async fn bounded<T, F>(what: &'static str, timeout: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "{} did not respond within {}ms",
            what,
            timeout.as_millis()
        ))),
    }
}
