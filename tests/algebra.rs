use outcomes::combinators::{and_then, bind, inspect, map, map_error, or_else};
use outcomes::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Now<T> = Outcome<T, String>;
type Later<T> = Deferred<'static, T, String>;

fn delay<T: Send + 'static>(outcome: Now<T>) -> Later<T> {
    Deferred::new(async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        outcome
    })
}

#[test]
fn map_on_immediate_success_stays_immediate() {
    let shown: Now<String> = Completion::map(succeed::<i32, String>(2), |x| x.to_string());
    assert_eq!(shown, succeed("2".to_string()));
}

#[tokio::test]
async fn map_on_deferred_success_settles_later() {
    let shown: Later<String> = delay(succeed(2)).map(|x: i32| x.to_string());
    assert_eq!(shown.await, succeed("2".to_string()));
}

#[tokio::test]
async fn all_four_call_shapes_agree() {
    let inc_now = |v: i32| -> Now<i32> { succeed(v + 1) };
    let inc_later = |v: i32| -> Later<i32> { delay(succeed(v + 1)) };

    let a: Now<i32> = succeed::<i32, String>(1).and_then(inc_now);
    let b: Later<i32> = succeed::<i32, String>(1).and_then(inc_later);
    let c: Later<i32> = delay(succeed(1)).and_then(inc_now);
    let d: Later<i32> = delay(succeed(1)).and_then(inc_later);

    assert_eq!(a, succeed(2));
    assert_eq!(b.await, succeed(2));
    assert_eq!(c.await, succeed(2));
    assert_eq!(d.await, succeed(2));
}

#[test]
fn failure_skips_success_continuations() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = |calls: &Arc<AtomicUsize>| {
        let calls = calls.clone();
        move |v: i32| -> Now<i32> {
            calls.fetch_add(1, Ordering::SeqCst);
            succeed(v)
        }
    };

    let input: Now<i32> = fail("e".into());
    assert_eq!(input.clone().and_then(counted(&calls)), input);
    let through = counted(&calls);
    assert_eq!(input.clone().and_through(move |v| through(*v)), input);
    let mapped: Now<i32> = Completion::map(input.clone(), |v| {
        calls.fetch_add(1, Ordering::SeqCst);
        v
    });
    assert_eq!(mapped, input);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn and_through_keeps_the_original_value() {
    let out: Now<i32> = succeed(5).and_through(|_| succeed::<Option<()>, String>(None));
    assert_eq!(out, succeed(5));
}

#[test]
fn or_through_keeps_the_original_error() {
    let out: Now<i32> = fail::<i32, String>("e".into()).or_through(|_| succeed::<&str, String>("x"));
    assert_eq!(out, fail("e".to_string()));
}

#[test]
fn bind_merges_and_overwrites() {
    let mut person = BTreeMap::new();
    person.insert("name".to_string(), "A".to_string());

    let out = succeed::<_, String>(person)
        .bind("age".to_string(), |_| succeed("20".to_string()))
        .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out["name"], "A");
    assert_eq!(out["age"], "20");

    let again = succeed::<_, String>(out)
        .bind("age".to_string(), |_| succeed("21".to_string()))
        .unwrap();
    assert_eq!(again["age"], "21");
    assert_eq!(again["name"], "A");
}

#[test]
fn begin_starts_an_empty_record() {
    let record: Now<BTreeMap<&str, i32>> = begin::<BTreeMap<&str, i32>, String>()
        .bind("x", |_| succeed(1))
        .bind("y", |r| succeed(r["x"] + 1));
    assert_eq!(record.unwrap(), BTreeMap::from([("x", 1), ("y", 2)]));
}

#[test]
fn sequence_and_collect_properties() {
    assert_eq!(sequence(vec![succeed(1), fail("e1"), fail("e2")]), fail("e1"));
    assert_eq!(collect(vec![succeed(1), fail("e1"), fail("e2")]), fail(vec!["e1", "e2"]));
    assert_eq!(collect(vec![succeed::<i32, &str>(1), succeed(2)]), succeed(vec![1, 2]));
}

#[test]
fn unwrap_round_trip() {
    let samples: Vec<Now<i32>> = vec![succeed(3), fail("e".into())];
    for o in samples {
        if is_success(&o) {
            let expected = *o.value().expect("success has a value");
            assert_eq!(unwrap(o), expected);
        } else {
            assert!(is_failure(&o));
            assert_eq!(unwrap_or(o, 7), 7);
        }
    }
}

#[test]
#[should_panic(expected = "boom")]
fn safe_mode_lets_panics_through() {
    let _ = attempt(|| -> i32 { panic!("boom") }).safe().run();
}

#[test]
fn immediate_pipeline() {
    let out = pipe!(
        succeed::<i32, String>(3),
        map(|v: i32| v * 2),
        and_then(|v: i32| if v > 5 { succeed(v) } else { fail(format!("{v} too small")) }),
        map_error(|e: String| e.to_uppercase()),
    );
    assert_eq!(out, succeed(6));
}

#[tokio::test]
async fn one_deferred_stage_makes_the_rest_deferred() {
    let seen = Arc::new(AtomicUsize::new(0));
    let observer = seen.clone();
    let out: Later<BTreeMap<&str, i32>> = pipe!(
        begin::<BTreeMap<&str, i32>, String>(),
        bind("a", |_: &BTreeMap<&str, i32>| succeed::<i32, String>(1)),
        bind("b", |_: &BTreeMap<&str, i32>| delay(succeed(2))),
        inspect(move |r: &BTreeMap<&str, i32>| {
            observer.store(r.len(), Ordering::SeqCst);
        }),
    );
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    let record = out.await.unwrap();
    assert_eq!(record, BTreeMap::from([("a", 1), ("b", 2)]));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn recovery_after_deferred_failure() {
    let out = delay(fail::<i32, String>("cold cache".into()))
        .pipe(or_else(|e: String| succeed::<i32, String>(e.len() as i32)))
        .await;
    assert_eq!(out, succeed(10));
}

#[tokio::test]
async fn assert_success_drops_the_impossible_error() {
    let recovered = delay(fail::<i32, String>("x".into())).or_else(|_| succeed::<i32, String>(0));
    let value: i32 = assert_success(recovered).await.into_value();
    assert_eq!(value, 0);
}
