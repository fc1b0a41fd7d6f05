//! Pull-based consumption of the server-streamed user list.
//!
//! Items are handled strictly in delivery order. Each item is logged as soon
//! as it is pulled, then the consumer waits for the configured pace before
//! pulling the next one. Both the wait and the pull race against a
//! cancellation token.

use std::time::Duration;

use futures::{Stream, StreamExt};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::user::User;

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEnding {
    Completed,
    Failed(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    pub users: Vec<User>,
    pub ending: StreamEnding,
}

impl StreamSummary {
    pub fn failed(err: &ClientError) -> Self {
        Self {
            users: Vec::new(),
            ending: StreamEnding::Failed(err.to_string()),
        }
    }
}

pub async fn consume_stream<S>(
    mut stream: S,
    pace: Duration,
    cancel: &CancellationToken,
) -> StreamSummary
where
    S: Stream<Item = Result<User, ClientError>> + Unpin,
{
    let mut users = Vec::new();

    let ending = loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break StreamEnding::Cancelled,
            next = stream.next() => next,
        };

        match next {
            Some(Ok(user)) => {
                info!("User getting successfully");
                info!("User Info : \n{:?}", user);
                users.push(user);

                if !pause(pace, cancel).await {
                    break StreamEnding::Cancelled;
                }
            }
            Some(Err(err)) => {
                warn!("{}", err);
                break StreamEnding::Failed(err.to_string());
            }
            None => {
                info!("Getting all users successfully");
                info!("Task completed");
                break StreamEnding::Completed;
            }
        }
    };

    if ending == StreamEnding::Cancelled {
        warn!("Stream cancelled after {} users", users.len());
    }

    StreamSummary { users, ending }
}

/// Returns false when cancelled before the pace elapsed.
async fn pause(pace: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(pace) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn user(name: &str) -> User {
        User {
            name: name.to_string(),
            hobbies: vec!["Cycling".to_string()],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn handles_items_in_order_pausing_after_each() {
        let items = vec![Ok(user("a")), Ok(user("b")), Ok(user("c"))];
        let cancel = CancellationToken::new();
        let started = Instant::now();

        let summary = consume_stream(stream::iter(items), Duration::from_secs(2), &cancel).await;

        let names: Vec<_> = summary.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(summary.ending, StreamEnding::Completed);

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(6), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(7), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_stream_completes_without_waiting() {
        let cancel = CancellationToken::new();
        let started = Instant::now();

        let summary = consume_stream(
            stream::iter(Vec::<Result<User, ClientError>>::new()),
            Duration::from_secs(2),
            &cancel,
        )
        .await;

        assert!(summary.users.is_empty());
        assert_eq!(summary.ending, StreamEnding::Completed);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn stops_at_first_error() {
        let items = vec![
            Ok(user("a")),
            Err(ClientError::Rpc(tonic::Status::internal("db down"))),
            Ok(user("c")),
        ];
        let cancel = CancellationToken::new();

        let summary = consume_stream(stream::iter(items), Duration::ZERO, &cancel).await;

        assert_eq!(summary.users, vec![user("a")]);
        match summary.ending {
            StreamEnding::Failed(msg) => assert!(msg.contains("db down"), "{}", msg),
            other => panic!("unexpected ending {:?}", other),
        }
    }

    #[tokio::test]
    async fn already_cancelled_token_stops_before_pulling() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary =
            consume_stream(stream::iter(vec![Ok(user("a"))]), Duration::ZERO, &cancel).await;

        assert!(summary.users.is_empty());
        assert_eq!(summary.ending, StreamEnding::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_during_pause_keeps_every_pulled_item() {
        let items = vec![Ok(user("a")), Ok(user("b"))];
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let items = stream::iter(items).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let summary = consume_stream(items, Duration::from_secs(2), &cancel).await;

        assert_eq!(summary.users, vec![user("a")]);
        assert_eq!(summary.ending, StreamEnding::Cancelled);
        assert_eq!(pulled.load(Ordering::SeqCst), summary.users.len());
    }
}
