//! Retry and timeout glue built on deferred outcomes.
//!
//! ```text
//! cargo run --example fetch_with_retry -- 3
//! ```
//!
//! A simulated flaky lookup fails a few times before answering. The caller
//! races every attempt against a timer and retries failures with exponential
//! backoff. None of this lives in the core: it is ordinary code composing
//! `Deferred` values.

use futures::future::{select, Either};
use outcomes::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
enum FetchError {
    #[error("upstream unavailable (attempt {0})")]
    Unavailable(u32),
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid argument: {0}")]
    Argument(String),
}

/// Exponential delay before retry `attempt`, capped at five seconds.
fn backoff(attempt: u32) -> Duration {
    let millis = 100u64.saturating_mul(1u64 << attempt.min(16));
    Duration::from_millis(millis.min(5_000))
}

/// Fail with a timeout once `limit` elapses, unless `work` settles first.
fn with_timeout<T: Send + 'static>(
    limit: Duration,
    work: Deferred<'static, T, FetchError>,
) -> Deferred<'static, T, FetchError> {
    Deferred::new(async move {
        let timer = Box::pin(tokio::time::sleep(limit));
        match select(work, timer).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => fail(FetchError::Timeout(limit)),
        }
    })
}

/// Re-run `call` until it succeeds or `retries` extra attempts are spent.
fn retry<T, F>(retries: u32, call: F) -> Deferred<'static, T, FetchError>
where
    T: Send + 'static,
    F: Fn() -> Deferred<'static, T, FetchError> + Send + Sync + 'static,
{
    Deferred::new(async move {
        let mut attempt = 0;
        loop {
            let outcome = call().await;
            if outcome.is_success() || attempt >= retries {
                return outcome;
            }
            let delay = backoff(attempt);
            tracing::info!(attempt, ?delay, "retrying after failure");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    })
}

fn string_to_integer(value: &str) -> Outcome<u32, FetchError> {
    attempt(|| value.trim().parse::<u32>())
        .catch(|e: std::num::ParseIntError| FetchError::Argument(e.to_string()))
        .run()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let arg = std::env::args().nth(1).unwrap_or_else(|| "3".to_string());
    let failures_before_success = match string_to_integer(&arg) {
        Outcome::Success { value } => value,
        Outcome::Failure { error } => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let flaky = attempt(move |id: u32| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if n < failures_before_success {
                Err(n + 1)
            } else {
                Ok(format!("record #{id}"))
            }
        }
    })
    .catch(FetchError::Unavailable);

    let fetch = move || with_timeout(Duration::from_millis(200), flaky.call_deferred(7));

    let outcome = retry(5, fetch)
        .inspect(|record| println!("fetched {record}"))
        .inspect_error(|error| eprintln!("giving up: {error}"))
        .await;

    println!("attempts: {}, success: {}", calls.load(Ordering::SeqCst), outcome.is_success());
}
