// flowcore/src/coroutine/driver.rs

//! The four composition drivers and their per-family entry points.
//!
//! A coroutine body is a closure that receives a [`Scope`] (and, for the adapter variants,
//! an [`Adapter`]) and returns a future, usually an `async move` block. The body is the
//! generator: every `scope.bind(w).await` either resolves on the spot or leaves a residual
//! in the scope and suspends. The driver polls the body, and whenever the body suspends it
//! checks the scope. A residual there means a step failed: the driver returns the failure
//! and drops the body without polling it again, so no code after the failing step runs.
//! The scope is checked after every poll, including the one where the body completes, so
//! a body that steps around a failed delegation (`now_or_never`, `select!`) still fails.
//!
//! Successful delegations resolve inside a single poll, so a body with any number of
//! sequential steps is driven by a flat loop with no recursion per step.

use crate::coroutine::delegate::{Family, MaybeFamily, OutcomeFamily};
use crate::coroutine::scope::{Adapter, Scope, Slot};
use crate::error::CoreError;
use crate::maybe::sync::SyncMaybe;
use crate::outcome::sync::SyncOutcome;
use futures::task::noop_waker_ref;
use std::future::{self, Future};
use std::pin::pin;
use std::task::{Context, Poll};
use tracing::{event, instrument, Level};

/// Plain synchronous driver.
///
/// # Panics
///
/// Panics with [`CoreError::DeferredInSyncDriver`] if the body suspends on anything other
/// than a failed delegation.
pub fn drive<F, R, B, Fut>(body: B) -> F::Wrapped<R>
where
  F: Family,
  B: FnOnce(Scope<F>) -> Fut,
  Fut: Future<Output = R>,
{
  let (scope, slot) = Scope::new();
  run_to_completion::<F, R, Fut>(body(scope), slot)
}

/// Adapter-style synchronous driver. Same algorithm as [`drive`].
pub fn drive_adapted<F, R, B, Fut>(body: B) -> F::Wrapped<R>
where
  F: Family,
  B: FnOnce(Scope<F>, Adapter<F>) -> Fut,
  Fut: Future<Output = R>,
{
  let (scope, slot) = Scope::new();
  run_to_completion::<F, R, Fut>(body(scope, Adapter::new()), slot)
}

/// Plain asynchronous driver. The body may await any future between delegations.
#[instrument(name = "coroutine::drive_async", skip_all, fields(family = %std::any::type_name::<F>()))]
pub async fn drive_async<F, R, B, Fut>(body: B) -> F::Wrapped<R>
where
  F: Family,
  B: FnOnce(Scope<F>) -> Fut,
  Fut: Future<Output = R>,
{
  let (scope, slot) = Scope::new();
  run_until_settled::<F, R, Fut>(body(scope), slot).await
}

/// Adapter-style asynchronous driver. Same algorithm as [`drive_async`].
#[instrument(name = "coroutine::drive_async_adapted", skip_all, fields(family = %std::any::type_name::<F>()))]
pub async fn drive_async_adapted<F, R, B, Fut>(body: B) -> F::Wrapped<R>
where
  F: Family,
  B: FnOnce(Scope<F>, Adapter<F>) -> Fut,
  Fut: Future<Output = R>,
{
  let (scope, slot) = Scope::new();
  run_until_settled::<F, R, Fut>(body(scope, Adapter::new()), slot).await
}

fn run_to_completion<F, R, Fut>(coroutine: Fut, slot: Slot<F::Residual>) -> F::Wrapped<R>
where
  F: Family,
  Fut: Future<Output = R>,
{
  event!(Level::TRACE, "Synchronous coroutine starting.");
  let mut coroutine = pin!(coroutine);
  let mut cx = Context::from_waker(noop_waker_ref());

  let polled = coroutine.as_mut().poll(&mut cx);
  // A parked residual wins even if the body went on to finish.
  let residual = slot.lock().take();
  match (polled, residual) {
    (_, Some(residual)) => {
      event!(Level::DEBUG, "Synchronous coroutine short-circuited on a failed step.");
      F::failure(residual)
    }
    (Poll::Ready(value), None) => {
      event!(Level::TRACE, "Synchronous coroutine completed.");
      F::success(value)
    }
    (Poll::Pending, None) => CoreError::DeferredInSyncDriver.raise(),
  }
}

async fn run_until_settled<F, R, Fut>(coroutine: Fut, slot: Slot<F::Residual>) -> F::Wrapped<R>
where
  F: Family,
  Fut: Future<Output = R>,
{
  event!(Level::TRACE, "Asynchronous coroutine starting.");
  let mut coroutine = pin!(coroutine);

  future::poll_fn(|cx| {
    let polled = coroutine.as_mut().poll(cx);
    let residual = slot.lock().take();
    match (polled, residual) {
      (_, Some(residual)) => {
        event!(Level::DEBUG, "Asynchronous coroutine short-circuited on a failed step.");
        Poll::Ready(F::failure(residual))
      }
      (Poll::Ready(value), None) => {
        event!(Level::TRACE, "Asynchronous coroutine completed.");
        Poll::Ready(F::success(value))
      }
      // Genuinely waiting; the body registered its own waker.
      (Poll::Pending, None) => Poll::Pending,
    }
  })
  .await
}

// --- Per-family entry points ---

impl<T> SyncMaybe<T> {
  /// Runs `body` synchronously; `Some` of its return value, or the first absence it hit.
  pub fn compose<B, Fut>(body: B) -> SyncMaybe<T>
  where
    B: FnOnce(Scope<MaybeFamily>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive::<MaybeFamily, T, B, Fut>(body)
  }

  pub fn compose_adapted<B, Fut>(body: B) -> SyncMaybe<T>
  where
    B: FnOnce(Scope<MaybeFamily>, Adapter<MaybeFamily>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_adapted::<MaybeFamily, T, B, Fut>(body)
  }

  pub async fn compose_async<B, Fut>(body: B) -> SyncMaybe<T>
  where
    B: FnOnce(Scope<MaybeFamily>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_async::<MaybeFamily, T, B, Fut>(body).await
  }

  pub async fn compose_async_adapted<B, Fut>(body: B) -> SyncMaybe<T>
  where
    B: FnOnce(Scope<MaybeFamily>, Adapter<MaybeFamily>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_async_adapted::<MaybeFamily, T, B, Fut>(body).await
  }
}

impl<T, E> SyncOutcome<T, E> {
  /// Runs `body` synchronously; `Ok` of its return value, or the first error it hit.
  pub fn compose<B, Fut>(body: B) -> SyncOutcome<T, E>
  where
    B: FnOnce(Scope<OutcomeFamily<E>>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive::<OutcomeFamily<E>, T, B, Fut>(body)
  }

  pub fn compose_adapted<B, Fut>(body: B) -> SyncOutcome<T, E>
  where
    B: FnOnce(Scope<OutcomeFamily<E>>, Adapter<OutcomeFamily<E>>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_adapted::<OutcomeFamily<E>, T, B, Fut>(body)
  }

  pub async fn compose_async<B, Fut>(body: B) -> SyncOutcome<T, E>
  where
    B: FnOnce(Scope<OutcomeFamily<E>>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_async::<OutcomeFamily<E>, T, B, Fut>(body).await
  }

  pub async fn compose_async_adapted<B, Fut>(body: B) -> SyncOutcome<T, E>
  where
    B: FnOnce(Scope<OutcomeFamily<E>>, Adapter<OutcomeFamily<E>>) -> Fut,
    Fut: Future<Output = T>,
  {
    drive_async_adapted::<OutcomeFamily<E>, T, B, Fut>(body).await
  }
}
