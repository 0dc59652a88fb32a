// Optional per-call timeouts for port calls.
//
// An elapsed deadline is reported as an ordinary call failure, so callers
// handle "too slow" exactly like "errored".

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

/// Await `fut`, failing with a descriptive error if `limit` elapses first.
/// `None` waits indefinitely.
pub async fn within<T, F>(limit: Option<Duration>, what: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("{what} timed out after {}ms", limit.as_millis()),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let value = within(Some(Duration::from_secs(1)), "fast call", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let result: Result<()> = within(Some(Duration::from_millis(10)), "slow call", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("slow call timed out"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<()> = within(None, "call", async { anyhow::bail!("boom") }).await;
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }
}
