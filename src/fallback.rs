//! Live-then-fallback lookup shared by every external data source
//!
//! The live attempt is bounded by a timeout and never retried. Any failure,
//! empty answer or timeout hands over to a synchronous local substitute.

use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::models::Sourced;

/// Outcome of the live attempt, kept for logging
enum LiveOutcome<T> {
    Found(T),
    Empty,
    Failed(String),
    TimedOut,
}

/// Try `live` within `timeout`, otherwise use `fallback`.
///
/// `live` resolving to `Ok(None)` means the provider answered but knows
/// nothing about the query. Returns `None` only when both stages come up
/// empty.
pub async fn live_or_fallback<T, E, Fut, F>(
    what: &str,
    timeout: Duration,
    live: Fut,
    fallback: F,
) -> Option<Sourced<T>>
where
    E: Display,
    Fut: Future<Output = Result<Option<T>, E>>,
    F: FnOnce() -> Option<T>,
{
    let started = Instant::now();
    let outcome = match tokio::time::timeout(timeout, live).await {
        Ok(Ok(Some(value))) => LiveOutcome::Found(value),
        Ok(Ok(None)) => LiveOutcome::Empty,
        Ok(Err(e)) => LiveOutcome::Failed(e.to_string()),
        Err(_) => LiveOutcome::TimedOut,
    };

    match outcome {
        LiveOutcome::Found(value) => {
            debug!(
                "Live lookup for {} succeeded in {:.3}s",
                what,
                started.elapsed().as_secs_f64()
            );
            return Some(Sourced::live(value));
        }
        LiveOutcome::Empty => debug!("Live lookup for {} returned nothing", what),
        LiveOutcome::Failed(reason) => warn!("Live lookup for {} failed: {}", what, reason),
        LiveOutcome::TimedOut => warn!(
            "Live lookup for {} timed out after {:.1}s",
            what,
            timeout.as_secs_f64()
        ),
    }

    let substitute = fallback();
    if substitute.is_some() {
        debug!("Using fallback data for {}", what);
    }
    substitute.map(Sourced::fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataSource;

    #[tokio::test]
    async fn test_live_value_wins() {
        let result = live_or_fallback(
            "test",
            Duration::from_secs(1),
            async { Ok::<_, String>(Some(1)) },
            || Some(2),
        )
        .await
        .unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.source, DataSource::Live);
    }

    #[tokio::test]
    async fn test_error_uses_fallback() {
        let result = live_or_fallback(
            "test",
            Duration::from_secs(1),
            async { Err::<Option<i32>, _>("boom") },
            || Some(2),
        )
        .await
        .unwrap();
        assert_eq!(result.value, 2);
        assert_eq!(result.source, DataSource::Fallback);
    }

    #[tokio::test]
    async fn test_empty_live_uses_fallback() {
        let result = live_or_fallback(
            "test",
            Duration::from_secs(1),
            async { Ok::<Option<i32>, String>(None) },
            || Some(3),
        )
        .await
        .unwrap();
        assert_eq!(result.source, DataSource::Fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, String>(Some(1))
        };
        let result = live_or_fallback("test", Duration::from_secs(2), slow, || Some(9))
            .await
            .unwrap();
        assert_eq!(result.value, 9);
        assert!(result.source.is_fallback());
    }

    #[tokio::test]
    async fn test_both_empty() {
        let result = live_or_fallback(
            "test",
            Duration::from_secs(1),
            async { Err::<Option<i32>, _>("down") },
            || None,
        )
        .await;
        assert!(result.is_none());
    }
}
