// flowcore/src/outcome/hybrid.rs

//! Defines `HybridOutcome<T, E>`, the success/failure value call sites hold.

use crate::core::{Deferred, Settle, Tag};
use crate::outcome::future::AsyncOutcome;
use crate::outcome::sync::SyncOutcome;
use async_trait::async_trait;
use futures::future::FutureExt;
use std::future::Future;
use tracing::{event, Level};

#[derive(Debug, Clone)]
enum Repr<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  Sync(SyncOutcome<T, E>),
  Async(AsyncOutcome<T, E>),
}

/// Holds a `SyncOutcome` until some step turns asynchronous, then an `AsyncOutcome`
/// for the rest of the chain. Failures never promote: their callbacks never run.
#[derive(Debug, Clone)]
pub struct HybridOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  repr: Repr<T, E>,
}

impl<T, E> HybridOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  pub fn ok(value: T) -> Self {
    Self::from_sync(SyncOutcome::Ok(value))
  }

  pub fn err(error: E) -> Self {
    Self::from_sync(SyncOutcome::Err(error))
  }

  pub fn from_result(result: Result<T, E>) -> Self {
    Self::from_sync(SyncOutcome::from_result(result))
  }

  pub fn from_sync(settled: SyncOutcome<T, E>) -> Self {
    Self {
      repr: Repr::Sync(settled),
    }
  }

  pub fn from_async(pending: AsyncOutcome<T, E>) -> Self {
    Self {
      repr: Repr::Async(pending),
    }
  }

  pub fn from_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = SyncOutcome<T, E>> + Send + 'static,
  {
    Self::from_async(AsyncOutcome::from_future(fut))
  }

  pub fn is_sync(&self) -> bool {
    matches!(self.repr, Repr::Sync(_))
  }

  pub fn is_async(&self) -> bool {
    matches!(self.repr, Repr::Async(_))
  }

  pub fn as_sync(&self) -> Option<&SyncOutcome<T, E>> {
    match &self.repr {
      Repr::Sync(settled) => Some(settled),
      Repr::Async(_) => None,
    }
  }

  pub fn into_sync(self) -> Result<SyncOutcome<T, E>, Self> {
    match self.repr {
      Repr::Sync(settled) => Ok(settled),
      repr => Err(Self { repr }),
    }
  }

  /// Explicit conversion to the async form, for interop only.
  pub fn into_async(self) -> AsyncOutcome<T, E> {
    match self.repr {
      Repr::Sync(settled) => settled.into_async(),
      Repr::Async(pending) => pending,
    }
  }

  pub async fn settle(self) -> SyncOutcome<T, E> {
    match self.repr {
      Repr::Sync(settled) => settled,
      Repr::Async(pending) => pending.settle().await,
    }
  }

  pub fn tag(&self) -> Deferred<Tag> {
    match &self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.tag()),
      Repr::Async(pending) => Deferred::pending(pending.tag()),
    }
  }

  pub fn is_ok(&self) -> Deferred<bool> {
    self.tag().map(|tag| tag == Tag::Ok)
  }

  pub fn is_err(&self) -> Deferred<bool> {
    self.tag().map(|tag| tag == Tag::Err)
  }

  pub fn unwrap(self) -> Deferred<T> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.unwrap()),
      Repr::Async(pending) => Deferred::pending(pending.unwrap()),
    }
  }

  pub fn unwrap_err(self) -> Deferred<E> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.unwrap_err()),
      Repr::Async(pending) => Deferred::pending(pending.unwrap_err()),
    }
  }

  pub fn safe_unwrap(self) -> Deferred<Option<T>> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.safe_unwrap()),
      Repr::Async(pending) => Deferred::pending(pending.safe_unwrap()),
    }
  }

  pub fn safe_unwrap_err(self) -> Deferred<Option<E>> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.safe_unwrap_err()),
      Repr::Async(pending) => Deferred::pending(pending.safe_unwrap_err()),
    }
  }

  pub fn unwrap_or(self, default: T) -> Deferred<T> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.unwrap_or(default)),
      Repr::Async(pending) => Deferred::pending(pending.unwrap_or(default)),
    }
  }

  /// Turns any failure into a value; settled while the outcome is sync.
  pub fn recover<F>(self, f: F) -> Deferred<T>
  where
    F: FnOnce(E) -> T + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.recover(f)),
      Repr::Async(pending) => Deferred::pending(pending.recover(f)),
    }
  }

  pub fn map<U, F>(self, f: F) -> HybridOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => HybridOutcome::from_sync(settled.map(f)),
      Repr::Async(pending) => HybridOutcome::from_async(pending.map(f)),
    }
  }

  pub fn map_err<F2, F>(self, f: F) -> HybridOutcome<T, F2>
  where
    F2: Clone + Send + Sync + 'static,
    F: FnOnce(E) -> F2 + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => HybridOutcome::from_sync(settled.map_err(f)),
      Repr::Async(pending) => HybridOutcome::from_async(pending.map_err(f)),
    }
  }

  /// Promotes on `Ok`; an `Err` stays sync because `f` never runs.
  pub fn map_async<U, F, Fut>(self, f: F) -> HybridOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncOutcome::Err(error)) => HybridOutcome::err(error),
      Repr::Sync(settled) => {
        event!(Level::TRACE, "Async callback on sync outcome, promoting.");
        HybridOutcome::from_async(settled.map_async(f))
      }
      Repr::Async(pending) => HybridOutcome::from_async(pending.map_async(f)),
    }
  }

  pub fn map_deferred<U, F>(self, f: F) -> HybridOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => settled.map_deferred(f),
      Repr::Async(pending) => HybridOutcome::from_async(pending.map_deferred(f)),
    }
  }

  pub fn flat_map<U, F>(self, f: F) -> HybridOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> HybridOutcome<U, E> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncOutcome::Ok(value)) => {
        let next = f(value);
        if next.is_async() {
          event!(Level::TRACE, "flat_map callback returned async outcome, chain is now async.");
        }
        next
      }
      Repr::Sync(SyncOutcome::Err(error)) => HybridOutcome::err(error),
      Repr::Async(pending) => HybridOutcome::from_async(pending.flat_map(f)),
    }
  }

  pub fn zip<U, F>(self, f: F) -> HybridOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => HybridOutcome::from_sync(settled.zip(f)),
      Repr::Async(pending) => HybridOutcome::from_async(pending.zip(f)),
    }
  }

  pub fn zip_async<U, F, Fut>(self, f: F) -> HybridOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncOutcome::Err(error)) => HybridOutcome::err(error),
      Repr::Sync(settled) => {
        event!(Level::TRACE, "Async zip on sync outcome, promoting.");
        HybridOutcome::from_async(settled.into_async().zip_async(f))
      }
      Repr::Async(pending) => HybridOutcome::from_async(pending.zip_async(f)),
    }
  }

  pub fn flat_zip<U, F>(self, f: F) -> HybridOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> HybridOutcome<U, E> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncOutcome::Ok(value)) => match f(&value).into_sync() {
        Ok(inner) => HybridOutcome::from_sync(SyncOutcome::Ok(value).flat_zip(move |_| inner)),
        Err(pending_inner) => {
          event!(Level::TRACE, "flat_zip callback returned async outcome, chain is now async.");
          HybridOutcome::from_async(AsyncOutcome::ok(value).flat_zip(move |_| pending_inner))
        }
      },
      Repr::Sync(SyncOutcome::Err(error)) => HybridOutcome::err(error),
      Repr::Async(pending) => HybridOutcome::from_async(pending.flat_zip(f)),
    }
  }

  pub fn or_else<F2, F>(self, f: F) -> HybridOutcome<T, F2>
  where
    F2: Clone + Send + Sync + 'static,
    F: FnOnce(E) -> HybridOutcome<T, F2> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncOutcome::Ok(value)) => HybridOutcome::ok(value),
      Repr::Sync(SyncOutcome::Err(error)) => f(error),
      Repr::Async(pending) => HybridOutcome::from_async(pending.or_else(f)),
    }
  }

  pub fn tap<F>(self, f: F) -> Self
  where
    F: FnOnce(&T) + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Self::from_sync(settled.tap(f)),
      Repr::Async(pending) => Self::from_async(pending.tap(f)),
    }
  }

  pub fn tap_err<F>(self, f: F) -> Self
  where
    F: FnOnce(&E) + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Self::from_sync(settled.tap_err(f)),
      Repr::Async(pending) => Self::from_async(pending.tap_err(f)),
    }
  }

  pub fn fold<U, FE, FO>(self, on_err: FE, on_ok: FO) -> Deferred<U>
  where
    U: Send + 'static,
    FE: FnOnce(E) -> U + Send + 'static,
    FO: FnOnce(T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.fold(on_err, on_ok)),
      Repr::Async(pending) => Deferred::Pending(pending.fold(on_err, on_ok).boxed()),
    }
  }
}

impl<T, E> From<SyncOutcome<T, E>> for HybridOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  fn from(settled: SyncOutcome<T, E>) -> Self {
    Self::from_sync(settled)
  }
}

impl<T, E> From<AsyncOutcome<T, E>> for HybridOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  fn from(pending: AsyncOutcome<T, E>) -> Self {
    Self::from_async(pending)
  }
}

#[async_trait]
impl<T, E> Settle for HybridOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  type Output = SyncOutcome<T, E>;

  async fn settle(self) -> SyncOutcome<T, E> {
    HybridOutcome::settle(self).await
  }
}
