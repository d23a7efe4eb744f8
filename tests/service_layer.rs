use outcomes::prelude::*;
use outcomes::service::AttemptLayer;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::{service_fn, Layer, ServiceBuilder, ServiceExt};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, PartialEq)]
enum FetchError {
    NotFound,
    Io(String),
}

fn classify(e: io::Error) -> FetchError {
    match e.kind() {
        io::ErrorKind::NotFound => FetchError::NotFound,
        _ => FetchError::Io(e.to_string()),
    }
}

async fn lookup(id: u32) -> Result<String, io::Error> {
    match id {
        0 => Err(io::Error::from(io::ErrorKind::NotFound)),
        1 => Err(io::Error::new(io::ErrorKind::Other, "disk on fire")),
        n => Ok(format!("user-{n}")),
    }
}

#[tokio::test]
async fn responses_and_errors_both_arrive_as_outcomes() {
    let svc = ServiceBuilder::new().layer(AttemptLayer::new(classify)).service(service_fn(lookup));

    let found = svc.clone().oneshot(7).await.unwrap();
    assert_eq!(found, succeed("user-7".to_string()));

    let missing = svc.clone().oneshot(0).await.unwrap();
    assert_eq!(missing, fail(FetchError::NotFound));

    let broken = svc.oneshot(1).await.unwrap();
    assert_eq!(broken, fail(FetchError::Io("disk on fire".into())));
}

#[tokio::test]
async fn service_outcomes_feed_the_algebra() {
    let svc = ServiceBuilder::new().layer(AttemptLayer::new(classify)).service(service_fn(lookup));

    let calls: Vec<Deferred<'static, String, FetchError>> = [2u32, 0, 3, 1]
        .into_iter()
        .map(|id| {
            let svc = svc.clone();
            Deferred::new(async move {
                svc.oneshot(id).await.unwrap_or_else(|e| fail(classify(e)))
            })
        })
        .collect();

    let report = collect(calls).await;
    assert_eq!(
        report,
        fail(vec![FetchError::NotFound, FetchError::Io("disk on fire".into())])
    );
}

#[tokio::test]
async fn flaky_service_recovers_with_or_else() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let svc = AttemptLayer::new(classify).layer(service_fn(move |_: ()| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                Err(io::Error::new(io::ErrorKind::Other, "warming up"))
            } else {
                Ok(n)
            }
        }
    }));

    let first = svc.clone().oneshot(()).await.unwrap();
    let retry = svc.clone();
    let settled = first
        .or_else(move |_| Deferred::new(async move { retry.oneshot(()).await.unwrap() }))
        .await;
    assert_eq!(settled, succeed(1));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[derive(Clone)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedGuard;
    fn make_writer(&'a self) -> Self::Writer {
        SharedGuard(self.0.clone())
    }
}

struct SharedGuard(Arc<Mutex<Vec<u8>>>);
impl io::Write for SharedGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn caught_errors_are_logged_at_debug() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = SharedWriter(buffer.clone());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(BoxMakeWriter::new(writer))
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let out = attempt(|| "x".parse::<i32>()).catch(|e: std::num::ParseIntError| e.to_string()).run();
    assert!(out.is_failure());

    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("boundary caught a raised error"), "missing debug event: {logs}");
}
