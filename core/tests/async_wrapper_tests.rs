// tests/async_wrapper_tests.rs
mod common;

use common::*;
use flowcore::{AsyncMaybe, AsyncOutcome, CoreError, HybridMaybe, HybridOutcome, SyncMaybe, SyncOutcome, Tag};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

async fn slow_double(x: i32) -> i32 {
  tokio::time::sleep(Duration::from_millis(5)).await;
  x * 2
}

async fn explode() -> SyncMaybe<i32> {
  panic!("deferred rejection")
}

#[tokio::test]
async fn async_maybe_maps_after_settling() {
  setup_tracing();
  let value = AsyncMaybe::some(5).map(|x| x * 2).unwrap().await;
  assert_eq!(value, 10);

  let chained = AsyncMaybe::from_future(async { SyncMaybe::some(3) })
    .map_async(slow_double)
    .filter(|x| *x > 5)
    .settle()
    .await;
  assert_eq!(chained, SyncMaybe::some(6));
}

#[tokio::test]
async fn async_none_skips_every_callback() {
  setup_tracing();
  let counter = CallCounter::new();
  let none = AsyncMaybe::<i32>::from_option_future(async { None });

  let mapped = none.clone().map(counter.doubler());
  let flat_mapped = {
    let counter = counter.clone();
    none.clone().flat_map(move |x| {
      counter.hit();
      SyncMaybe::some(x)
    })
  };
  let zipped = {
    let counter = counter.clone();
    none.clone().zip(move |x| {
      counter.hit();
      *x
    })
  };
  let flat_zipped = {
    let counter = counter.clone();
    none.flat_zip(move |x| {
      counter.hit();
      AsyncMaybe::some(*x)
    })
  };

  assert!(mapped.is_none().await);
  assert!(flat_mapped.is_none().await);
  assert!(zipped.is_none().await);
  assert!(flat_zipped.is_none().await);
  assert_eq!(counter.count(), 0);
}

#[tokio::test]
async fn async_none_keeps_the_absence_marker() {
  setup_tracing();
  let settled = AsyncMaybe::<i32>::none().map(|x| x + 1).map_async(slow_double).settle().await;
  let absence = settled.absence().expect("chain stays None");
  assert!(absence.is_singleton());
}

#[tokio::test]
async fn accessors_return_futures() {
  setup_tracing();
  let pending = AsyncMaybe::some(1);
  assert_eq!(pending.tag().await, Tag::Some);
  assert!(pending.is_some().await);
  assert_eq!(pending.clone().safe_unwrap().await, Some(1));
  assert_eq!(AsyncMaybe::<i32>::none().unwrap_or(4).await, 4);
  assert_eq!(
    AsyncMaybe::<i32>::none().try_unwrap().await,
    Err(CoreError::UnwrapOnFailure { tag: Tag::None })
  );
}

#[tokio::test]
async fn awaited_unwrap_on_none_raises_core_error() {
  setup_tracing();
  let outcome = AssertUnwindSafe(AsyncMaybe::<i32>::none().unwrap()).catch_unwind().await;
  let payload = outcome.expect_err("unwrap on None must panic");
  assert_eq!(
    core_error_from_panic(payload),
    CoreError::UnwrapOnFailure { tag: Tag::None }
  );
}

#[tokio::test]
async fn flat_map_accepts_sync_async_and_hybrid_results() {
  setup_tracing();
  let from_sync = AsyncMaybe::some(2).flat_map(|x| SyncMaybe::some(x + 1)).settle().await;
  let from_async = AsyncMaybe::some(2)
    .flat_map(|x| AsyncMaybe::from_future(async move { SyncMaybe::some(slow_double(x).await) }))
    .settle()
    .await;
  let from_hybrid = AsyncMaybe::some(2).flat_map(|x| HybridMaybe::some(x * 5)).settle().await;

  assert_eq!(from_sync, SyncMaybe::some(3));
  assert_eq!(from_async, SyncMaybe::some(4));
  assert_eq!(from_hybrid, SyncMaybe::some(10));
}

#[tokio::test]
async fn async_or_else_and_zip_async() {
  setup_tracing();
  let fallback = AsyncMaybe::<i32>::none().or_else(|| AsyncMaybe::some(9)).settle().await;
  assert_eq!(fallback, SyncMaybe::some(9));

  let paired = AsyncMaybe::some(4).zip_async(slow_double).settle().await;
  assert_eq!(paired, SyncMaybe::some((4, 8)));

  let folded = AsyncMaybe::some(4).fold(|| -1, |x| x + 1).await;
  assert_eq!(folded, 5);
}

#[tokio::test]
async fn async_outcome_propagates_failure_untouched() {
  setup_tracing();
  let counter = CallCounter::new();
  let failed = AsyncOutcome::<i32, TestError>::from_result_future(async {
    tokio::time::sleep(Duration::from_millis(1)).await;
    Err(TestError::Lookup("account".into()))
  });

  let result = failed
    .map(counter.doubler())
    .map_async(slow_double)
    .tap(|_| panic!("tap must not run on Err"))
    .settle()
    .await;

  assert_eq!(result, SyncOutcome::Err(TestError::Lookup("account".into())));
  assert_eq!(counter.count(), 0);
}

#[tokio::test]
async fn async_outcome_error_side_operations() {
  setup_tracing();
  let errs = CallCounter::new();
  let observed = {
    let errs = errs.clone();
    AsyncOutcome::<i32, String>::err("boom".into()).tap_err(move |_| errs.hit())
  };
  assert!(observed.is_err().await);
  assert_eq!(errs.count(), 1);

  let mapped = AsyncOutcome::<i32, String>::err("boom".into()).map_err(|e| e.len()).settle().await;
  assert_eq!(mapped, SyncOutcome::Err(4));

  let recovered = AsyncOutcome::<i32, String>::err("boom".into())
    .or_else(|e| HybridOutcome::<i32, ()>::ok(e.len() as i32))
    .settle()
    .await;
  assert_eq!(recovered, SyncOutcome::Ok(4));

  assert_eq!(AsyncOutcome::<i32, String>::err("abc".into()).recover(|e| e.len() as i32).await, 3);
  assert_eq!(AsyncOutcome::<i32, String>::err("abc".into()).unwrap_err().await, "abc");
  assert_eq!(AsyncOutcome::<i32, String>::ok(1).safe_unwrap_err().await, None);
}

#[tokio::test]
async fn awaited_unwrap_err_on_ok_raises_core_error() {
  setup_tracing();
  let outcome = AssertUnwindSafe(AsyncOutcome::<i32, String>::ok(1).unwrap_err())
    .catch_unwind()
    .await;
  let payload = outcome.expect_err("unwrap_err on Ok must panic");
  assert_eq!(
    core_error_from_panic(payload),
    CoreError::UnwrapErrOnSuccess { tag: Tag::Ok }
  );
}

#[tokio::test]
async fn branches_are_isolated() {
  setup_tracing();
  let upstream_runs = CallCounter::new();
  let base = {
    let upstream_runs = upstream_runs.clone();
    AsyncOutcome::<i32, String>::from_future(async move {
      upstream_runs.hit();
      tokio::time::sleep(Duration::from_millis(2)).await;
      SyncOutcome::ok(10)
    })
  };

  let left = base.clone().map(|x| x + 1);
  let right = base.clone().flat_map(|x| SyncOutcome::<i32, String>::err(format!("rejected {x}")));
  let untouched = base;

  assert_eq!(right.settle().await, SyncOutcome::Err("rejected 10".to_string()));
  assert_eq!(left.settle().await, SyncOutcome::Ok(11));
  assert_eq!(untouched.settle().await, SyncOutcome::Ok(10));
  assert_eq!(upstream_runs.count(), 1);
}

#[tokio::test]
async fn panicking_future_propagates_to_awaiter() {
  setup_tracing();
  let exploding = AsyncMaybe::from_future(explode()).map(|x| x + 1);
  let outcome = AssertUnwindSafe(exploding.settle()).catch_unwind().await;
  let payload = outcome.expect_err("panic must reach the awaiter");
  assert_eq!(payload.downcast_ref::<&str>(), Some(&"deferred rejection"));
}

#[tokio::test]
async fn upstream_panic_reaches_every_branch_unchanged() {
  setup_tracing();
  let base = AsyncMaybe::from_future(explode());
  let left = base.clone().map(|x| x + 1);
  let right = base.map(|x| x * 2);

  let left_payload = AssertUnwindSafe(left.settle())
    .catch_unwind()
    .await
    .expect_err("left branch must panic");
  let right_payload = AssertUnwindSafe(right.settle())
    .catch_unwind()
    .await
    .expect_err("right branch must panic");

  assert_eq!(left_payload.downcast_ref::<&str>(), Some(&"deferred rejection"));
  assert_eq!(right_payload.downcast_ref::<&str>(), Some(&"deferred rejection"));
}

#[tokio::test]
async fn upstream_core_error_reaches_every_branch() {
  setup_tracing();
  let base = AsyncOutcome::<i32, String>::from_future(async { SyncOutcome::ok(SyncMaybe::<i32>::none().unwrap()) });
  let first = base.clone().map(|x| x + 1);
  let second = base.map_err(|e| e.len());

  let first_payload = AssertUnwindSafe(first.settle())
    .catch_unwind()
    .await
    .expect_err("first branch must panic");
  let second_payload = AssertUnwindSafe(second.settle())
    .catch_unwind()
    .await
    .expect_err("second branch must panic");

  let expected = CoreError::UnwrapOnFailure { tag: Tag::None };
  assert_eq!(core_error_from_panic(first_payload), expected);
  assert_eq!(core_error_from_panic(second_payload), expected);
}
