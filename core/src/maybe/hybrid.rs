// flowcore/src/maybe/hybrid.rs

//! Defines `HybridMaybe<T>`, the optional value call sites hold.
//!
//! A hybrid holds either a `SyncMaybe<T>` or an `AsyncMaybe<T>`. It stays synchronous
//! while every callback returns a settled value and switches to async the first time a
//! step produces a pending one. The switch is one-way: once a chain is async, every
//! later step on it is async too.

use crate::core::{Deferred, Settle, Tag};
use crate::maybe::future::AsyncMaybe;
use crate::maybe::sync::SyncMaybe;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tracing::{event, Level};

#[derive(Debug, Clone)]
enum Repr<T>
where
  T: Clone + Send + Sync + 'static,
{
  Sync(SyncMaybe<T>),
  Async(AsyncMaybe<T>),
}

#[derive(Debug, Clone)]
pub struct HybridMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  repr: Repr<T>,
}

impl<T> HybridMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub fn some(value: T) -> Self {
    Self::from_sync(SyncMaybe::some(value))
  }

  pub fn none() -> Self {
    Self::from_sync(SyncMaybe::none())
  }

  pub fn from_option(value: Option<T>) -> Self {
    Self::from_sync(SyncMaybe::from_option(value))
  }

  pub fn from_sync(settled: SyncMaybe<T>) -> Self {
    Self {
      repr: Repr::Sync(settled),
    }
  }

  pub fn from_async(pending: AsyncMaybe<T>) -> Self {
    Self {
      repr: Repr::Async(pending),
    }
  }

  /// From-deferred construction; always async.
  pub fn from_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = SyncMaybe<T>> + Send + 'static,
  {
    Self::from_async(AsyncMaybe::from_future(fut))
  }

  pub fn is_sync(&self) -> bool {
    matches!(self.repr, Repr::Sync(_))
  }

  pub fn is_async(&self) -> bool {
    matches!(self.repr, Repr::Async(_))
  }

  /// The sync wrapper, if this hybrid has not been promoted.
  pub fn as_sync(&self) -> Option<&SyncMaybe<T>> {
    match &self.repr {
      Repr::Sync(settled) => Some(settled),
      Repr::Async(_) => None,
    }
  }

  /// Takes the sync wrapper out, or hands the async hybrid back unchanged.
  pub fn into_sync(self) -> Result<SyncMaybe<T>, Self> {
    match self.repr {
      Repr::Sync(settled) => Ok(settled),
      repr => Err(Self { repr }),
    }
  }

  /// Explicit conversion to the async form. Never called implicitly by other operations.
  pub fn into_async(self) -> AsyncMaybe<T> {
    match self.repr {
      Repr::Sync(settled) => settled.into_async(),
      Repr::Async(pending) => pending,
    }
  }

  pub async fn settle(self) -> SyncMaybe<T> {
    match self.repr {
      Repr::Sync(settled) => settled,
      Repr::Async(pending) => pending.settle().await,
    }
  }

  // --- Accessors. Settled when sync, pending when async; `.await` works for both. ---

  pub fn tag(&self) -> Deferred<Tag> {
    match &self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.tag()),
      Repr::Async(pending) => Deferred::pending(pending.tag()),
    }
  }

  pub fn is_some(&self) -> Deferred<bool> {
    self.tag().map(|tag| tag == Tag::Some)
  }

  pub fn is_none(&self) -> Deferred<bool> {
    self.tag().map(|tag| tag == Tag::None)
  }

  pub fn unwrap(self) -> Deferred<T> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.unwrap()),
      Repr::Async(pending) => Deferred::pending(pending.unwrap()),
    }
  }

  pub fn safe_unwrap(self) -> Deferred<Option<T>> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.safe_unwrap()),
      Repr::Async(pending) => Deferred::pending(pending.safe_unwrap()),
    }
  }

  pub fn unwrap_or(self, default: T) -> Deferred<T> {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.unwrap_or(default)),
      Repr::Async(pending) => Deferred::pending(pending.unwrap_or(default)),
    }
  }

  // --- Transformations ---

  pub fn map<U, F>(self, f: F) -> HybridMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => HybridMaybe::from_sync(settled.map(f)),
      Repr::Async(pending) => HybridMaybe::from_async(pending.map(f)),
    }
  }

  /// Promotes on `Some`; a `None` stays sync because `f` never runs.
  pub fn map_async<U, F, Fut>(self, f: F) -> HybridMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncMaybe::None(absent)) => HybridMaybe::from_sync(SyncMaybe::None(absent)),
      Repr::Sync(settled) => {
        event!(Level::TRACE, "Async callback on sync maybe, promoting.");
        HybridMaybe::from_async(settled.map_async(f))
      }
      Repr::Async(pending) => HybridMaybe::from_async(pending.map_async(f)),
    }
  }

  /// Stays sync only while the receiver is sync and `f` returns a settled value.
  pub fn map_deferred<U, F>(self, f: F) -> HybridMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => settled.map_deferred(f),
      Repr::Async(pending) => HybridMaybe::from_async(pending.map_deferred(f)),
    }
  }

  /// The hybrid returned by `f` is used directly, so its sync/async state carries over.
  pub fn flat_map<U, F>(self, f: F) -> HybridMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> HybridMaybe<U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncMaybe::Some(value)) => {
        let next = f(value);
        if next.is_async() {
          event!(Level::TRACE, "flat_map callback returned async maybe, chain is now async.");
        }
        next
      }
      Repr::Sync(SyncMaybe::None(absent)) => HybridMaybe::from_sync(SyncMaybe::None(absent)),
      Repr::Async(pending) => HybridMaybe::from_async(pending.flat_map(f)),
    }
  }

  pub fn zip<U, F>(self, f: F) -> HybridMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => HybridMaybe::from_sync(settled.zip(f)),
      Repr::Async(pending) => HybridMaybe::from_async(pending.zip(f)),
    }
  }

  pub fn zip_async<U, F, Fut>(self, f: F) -> HybridMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncMaybe::None(absent)) => HybridMaybe::from_sync(SyncMaybe::None(absent)),
      Repr::Sync(settled) => {
        event!(Level::TRACE, "Async zip on sync maybe, promoting.");
        HybridMaybe::from_async(settled.into_async().zip_async(f))
      }
      Repr::Async(pending) => HybridMaybe::from_async(pending.zip_async(f)),
    }
  }

  pub fn flat_zip<U, F>(self, f: F) -> HybridMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> HybridMaybe<U> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncMaybe::Some(value)) => match f(&value).into_sync() {
        Ok(inner) => HybridMaybe::from_sync(SyncMaybe::Some(value).flat_zip(move |_| inner)),
        Err(pending_inner) => {
          event!(Level::TRACE, "flat_zip callback returned async maybe, chain is now async.");
          HybridMaybe::from_async(AsyncMaybe::some(value).flat_zip(move |_| pending_inner))
        }
      },
      Repr::Sync(SyncMaybe::None(absent)) => HybridMaybe::from_sync(SyncMaybe::None(absent)),
      Repr::Async(pending) => HybridMaybe::from_async(pending.flat_zip(f)),
    }
  }

  pub fn filter<P>(self, predicate: P) -> Self
  where
    P: FnOnce(&T) -> bool + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Self::from_sync(settled.filter(predicate)),
      Repr::Async(pending) => Self::from_async(pending.filter(predicate)),
    }
  }

  pub fn or_else<F>(self, f: F) -> Self
  where
    F: FnOnce() -> HybridMaybe<T> + Send + 'static,
  {
    match self.repr {
      Repr::Sync(SyncMaybe::None(_)) => f(),
      Repr::Sync(settled) => Self::from_sync(settled),
      Repr::Async(pending) => Self::from_async(pending.or_else(f)),
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

  pub fn fold<U, N, S>(self, on_none: N, on_some: S) -> Deferred<U>
  where
    U: Send + 'static,
    N: FnOnce() -> U + Send + 'static,
    S: FnOnce(T) -> U + Send + 'static,
  {
    match self.repr {
      Repr::Sync(settled) => Deferred::Settled(settled.fold(on_none, on_some)),
      Repr::Async(pending) => {
        let fut: BoxFuture<'static, U> = pending.fold(on_none, on_some).boxed();
        Deferred::Pending(fut)
      }
    }
  }
}

impl<T> From<SyncMaybe<T>> for HybridMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn from(settled: SyncMaybe<T>) -> Self {
    Self::from_sync(settled)
  }
}

impl<T> From<AsyncMaybe<T>> for HybridMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn from(pending: AsyncMaybe<T>) -> Self {
    Self::from_async(pending)
  }
}

#[async_trait]
impl<T> Settle for HybridMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  type Output = SyncMaybe<T>;

  async fn settle(self) -> SyncMaybe<T> {
    HybridMaybe::settle(self).await
  }
}
