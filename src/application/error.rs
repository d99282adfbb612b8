// Errors and cancellation shared by the query use cases
use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query was cancelled")]
    Cancelled,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Drive a storage future unless `token` fires first. A cancelled storage
/// future is dropped and no partial value escapes.
pub async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> QueryResult<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    if token.is_cancelled() {
        return Err(QueryError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(QueryError::Cancelled),
        result = fut => result.map_err(QueryError::Storage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_passes_through_results() {
        let token = CancellationToken::new();
        let value = cancellable(&token, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_storage_errors_keep_their_message() {
        let token = CancellationToken::new();
        let err = cancellable::<(), _>(&token, async { anyhow::bail!("connection refused") })
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Storage(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_the_future() {
        let token = CancellationToken::new();
        token.cancel();
        let result = cancellable(&token, async { Ok(1) }).await;
        assert!(matches!(result, Err(QueryError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_future() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = cancellable(&token, async {
            std::future::pending::<()>().await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(QueryError::Cancelled)));
    }
}
