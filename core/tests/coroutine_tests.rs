// tests/coroutine_tests.rs
mod common;

use common::*;
use flowcore::coroutine::{drive, drive_async, MaybeFamily, OutcomeFamily};
use flowcore::{AsyncMaybe, AsyncOutcome, CoreError, HybridOutcome, Scope, SyncMaybe, SyncOutcome, ABSENT};
use futures::FutureExt;
use serial_test::serial;
use std::time::Duration;

fn parse(input: &str) -> SyncOutcome<i32, TestError> {
  SyncOutcome::from_result(input.parse::<i32>()).map_err(|e| TestError::Validation(e.to_string()))
}

#[test]
fn product_of_two_successes() {
  setup_tracing();
  let result = SyncOutcome::<i32, String>::compose(|co| async move {
    let a = co.bind(SyncOutcome::ok(2)).await;
    let b = co.bind(SyncOutcome::ok(3)).await;
    a * b
  });
  assert_eq!(result, SyncOutcome::Ok(6));
}

#[tokio::test]
async fn async_composition_stops_at_deferred_failure() {
  setup_tracing();
  let summed = CallCounter::new();
  let result = {
    let summed = summed.clone();
    SyncOutcome::<i32, String>::compose_async(|co| async move {
      let a = co.bind(SyncOutcome::ok(1)).await;
      let b = co
        .bind_settled(AsyncOutcome::<i32, String>::from_future(async {
          tokio::time::sleep(Duration::from_millis(5)).await;
          SyncOutcome::err("boom".to_string())
        }))
        .await;
      summed.hit();
      a + b
    })
    .await
  };
  assert_eq!(result, SyncOutcome::Err("boom".to_string()));
  assert_eq!(summed.count(), 0);
}

#[test]
fn later_steps_never_run_after_a_failure() {
  setup_tracing();
  let after_failure = CallCounter::new();
  let result = {
    let after_failure = after_failure.clone();
    SyncOutcome::<i32, TestError>::compose(|co| async move {
      let a = co.bind(parse("4")).await;
      let b = co.bind(parse("four")).await;
      after_failure.hit();
      let c = co.bind(parse("5")).await;
      a + b + c
    })
  };

  assert!(matches!(result, SyncOutcome::Err(TestError::Validation(_))));
  assert_eq!(after_failure.count(), 0);
}

#[test]
fn first_failure_wins() {
  setup_tracing();
  let result = SyncOutcome::<i32, &str>::compose(|co| async move {
    let a = co.bind(SyncOutcome::ok(1)).await;
    let b: i32 = co.bind(SyncOutcome::err("first")).await;
    let c: i32 = co.bind(SyncOutcome::err("second")).await;
    a + b + c
  });
  assert_eq!(result, SyncOutcome::Err("first"));
}

#[test]
fn body_without_delegations_wraps_its_return() {
  setup_tracing();
  let maybe = SyncMaybe::compose(|_co| async { "plain" });
  assert_eq!(maybe, SyncMaybe::some("plain"));

  let outcome = SyncOutcome::<u8, String>::compose(|_co| async { 7u8 });
  assert_eq!(outcome, SyncOutcome::Ok(7));
}

#[test]
fn maybe_composition_returns_the_shared_absence() {
  setup_tracing();
  let first = SyncMaybe::<i32>::compose(|co| async move {
    let x = co.bind(SyncMaybe::some(1)).await;
    let y = co.bind(SyncMaybe::<i32>::none()).await;
    x + y
  });
  let second = SyncMaybe::<String>::compose(|co| async move { co.bind(SyncMaybe::from_option(None::<String>)).await });

  let first_absence = first.absence().expect("composition hit a None");
  let second_absence = second.absence().expect("composition hit a None");
  assert!(std::ptr::eq(first_absence, &ABSENT));
  assert!(std::ptr::eq(first_absence, second_absence));
}

#[test]
fn long_chains_do_not_grow_the_stack() {
  setup_tracing();
  let result = SyncOutcome::<u64, String>::compose(|co| async move {
    let mut total = 0u64;
    for i in 0..10_000u64 {
      total += co.bind(SyncOutcome::ok(i)).await;
    }
    total
  });
  assert_eq!(result, SyncOutcome::Ok((0..10_000u64).sum()));

  let hundred = SyncMaybe::<usize>::compose(|co| async move {
    let mut count = 0;
    for _ in 0..100 {
      count = co.bind(SyncMaybe::some(count + 1)).await;
    }
    count
  });
  assert_eq!(hundred, SyncMaybe::some(100));
}

#[tokio::test]
async fn long_async_chains_do_not_grow_the_stack() {
  setup_tracing();
  let result = SyncOutcome::<u64, String>::compose_async(|co| async move {
    let mut total = 0u64;
    for i in 0..5_000u64 {
      total += if i % 2 == 0 {
        co.bind(SyncOutcome::ok(i)).await
      } else {
        co.bind_settled(AsyncOutcome::<u64, String>::ok(i)).await
      };
    }
    total
  })
  .await;
  assert_eq!(result, SyncOutcome::Ok((0..5_000u64).sum()));
}

#[test]
fn failure_stepped_around_in_sync_body_still_fails() {
  setup_tracing();
  let result = SyncOutcome::<i32, String>::compose(|co| async move {
    let a = co.bind(SyncOutcome::ok(1)).await;
    let skipped = co.bind(SyncOutcome::<i32, String>::err("lost".into())).now_or_never();
    a + skipped.unwrap_or(100)
  });
  assert_eq!(result, SyncOutcome::Err("lost".to_string()));

  let maybe = SyncMaybe::<i32>::compose(|co| async move {
    let skipped = co.bind(SyncMaybe::<i32>::none()).now_or_never();
    skipped.unwrap_or(5)
  });
  assert!(maybe.absence().is_some_and(|absent| absent.is_singleton()));
}

#[tokio::test]
async fn failure_losing_a_select_in_async_body_still_fails() {
  setup_tracing();
  let result = SyncOutcome::<i32, String>::compose_async(|co| async move {
    futures::select_biased! {
      value = co.bind(SyncOutcome::<i32, String>::err("lost".into())).fuse() => value,
      fallback = futures::future::ready(7).fuse() => fallback,
    }
  })
  .await;
  assert_eq!(result, SyncOutcome::Err("lost".to_string()));
}

#[test]
fn adapter_variant_behaves_like_plain_variant() {
  setup_tracing();
  let ok = SyncOutcome::<i32, String>::compose_adapted(|co, adapt| async move {
    let a = co.bind(adapt.pass(SyncOutcome::ok(2))).await;
    let b = co.bind(adapt.pass(SyncOutcome::ok(3))).await;
    a * b
  });
  assert_eq!(ok, SyncOutcome::Ok(6));

  let none = SyncMaybe::<i32>::compose_adapted(|co, adapt| async move {
    let a = co.bind(adapt.pass(SyncMaybe::<i32>::none())).await;
    a + 1
  });
  assert!(none.is_none());
}

#[tokio::test]
async fn async_adapter_variant_awaits_between_steps() {
  setup_tracing();
  let result = SyncMaybe::<i32>::compose_async_adapted(|co, adapt| async move {
    let a = co.bind(adapt.pass(SyncMaybe::some(20))).await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    let b = co.bind_settled(AsyncMaybe::some(22)).await;
    a + b
  })
  .await;
  assert_eq!(result, SyncMaybe::some(42));
}

#[tokio::test]
async fn async_driver_accepts_hybrid_steps() {
  setup_tracing();
  let result = SyncOutcome::<i32, String>::compose_async(|co| async move {
    let a = co.bind_settled(HybridOutcome::<i32, String>::ok(1)).await;
    let b = co
      .bind_settled(HybridOutcome::<i32, String>::from_future(async { SyncOutcome::ok(2) }))
      .await;
    a + b
  })
  .await;
  assert_eq!(result, SyncOutcome::Ok(3));
}

#[tokio::test]
async fn async_maybe_composition_short_circuits() {
  setup_tracing();
  let reached = CallCounter::new();
  let result = {
    let reached = reached.clone();
    SyncMaybe::<i32>::compose_async(|co| async move {
      let a = co.bind_settled(AsyncMaybe::some(1)).await;
      let b = co.bind_settled(AsyncMaybe::<i32>::from_option_future(async { None })).await;
      reached.hit();
      a + b
    })
    .await
  };
  assert!(result.absence().is_some_and(|absent| absent.is_singleton()));
  assert_eq!(reached.count(), 0);
}

#[test]
#[serial]
fn sync_driver_rejects_real_suspension() {
  setup_tracing();
  let err = expect_core_panic(|| {
    SyncOutcome::<i32, String>::compose(|co| async move {
      let a = co.bind(SyncOutcome::ok(1)).await;
      futures::future::pending::<()>().await;
      a
    })
  });
  assert_eq!(err, CoreError::DeferredInSyncDriver);
}

#[test]
fn generic_drivers_are_usable_directly() {
  setup_tracing();
  let result: SyncMaybe<i32> = drive::<MaybeFamily, _, _, _>(|co: Scope<MaybeFamily>| async move {
    co.bind(SyncMaybe::some(5)).await * 2
  });
  assert_eq!(result, SyncMaybe::some(10));
}

#[tokio::test]
async fn generic_async_driver_with_outcome_family() {
  setup_tracing();
  let result: SyncOutcome<i32, String> =
    drive_async::<OutcomeFamily<String>, _, _, _>(|co: Scope<OutcomeFamily<String>>| async move {
      let x = co.bind(SyncOutcome::ok(3)).await;
      tokio::task::yield_now().await;
      let y = co.bind(SyncOutcome::<i32, String>::err("late failure".into())).await;
      x + y
    })
    .await;
  assert_eq!(result, SyncOutcome::Err("late failure".to_string()));
}
