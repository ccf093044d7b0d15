// flowcore/src/maybe/future.rs

//! Defines `AsyncMaybe<T>`, an optional value that settles later.
//!
//! The wrapper owns a shared, boxed future resolving to a `SyncMaybe<T>`. Every operation
//! builds a new future that first awaits the upstream one, so the upstream is never
//! changed and clones of a wrapper (branches) all observe the same settled value while
//! running their own continuations. A panic in the upstream future reaches every branch
//! with the same payload.

use crate::core::{Deferred, SharedSettle, Settle, Tag};
use crate::error::CoreResult;
use crate::maybe::sync::SyncMaybe;
use async_trait::async_trait;
use futures::future::{self, FutureExt};
use std::fmt;
use std::future::Future;

type SharedMaybe<T> = SharedSettle<SyncMaybe<T>>;

#[derive(Clone)]
pub struct AsyncMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  inner: SharedMaybe<T>,
}

impl<T> AsyncMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// From-deferred construction.
  pub fn from_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = SyncMaybe<T>> + Send + 'static,
  {
    Self {
      inner: SharedSettle::new(fut),
    }
  }

  /// From a future of a nullable value.
  pub fn from_option_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = Option<T>> + Send + 'static,
  {
    Self::from_future(fut.map(SyncMaybe::from_option))
  }

  /// An async wrapper that is already settled.
  pub fn from_sync(settled: SyncMaybe<T>) -> Self {
    Self::from_future(future::ready(settled))
  }

  pub fn some(value: T) -> Self {
    Self::from_sync(SyncMaybe::some(value))
  }

  pub fn none() -> Self {
    Self::from_sync(SyncMaybe::none())
  }

  /// Awaits the settled sync wrapper.
  pub async fn settle(self) -> SyncMaybe<T> {
    self.inner.await
  }

  // --- Accessors. All of them return futures. ---

  pub fn is_some(&self) -> impl Future<Output = bool> + Send + 'static {
    self.inner.clone().map(|settled| settled.is_some())
  }

  pub fn is_none(&self) -> impl Future<Output = bool> + Send + 'static {
    self.inner.clone().map(|settled| settled.is_none())
  }

  pub fn tag(&self) -> impl Future<Output = Tag> + Send + 'static {
    self.inner.clone().map(|settled| settled.tag())
  }

  /// # Panics
  ///
  /// The returned future panics with `CoreError::UnwrapOnFailure` if the value settles
  /// to `None`.
  pub async fn unwrap(self) -> T {
    self.inner.await.unwrap()
  }

  pub async fn try_unwrap(self) -> CoreResult<T> {
    self.inner.await.try_unwrap()
  }

  pub async fn safe_unwrap(self) -> Option<T> {
    self.inner.await.safe_unwrap()
  }

  pub async fn unwrap_or(self, default: T) -> T {
    self.inner.await.unwrap_or(default)
  }

  pub async fn fold<U>(self, on_none: impl FnOnce() -> U, on_some: impl FnOnce(T) -> U) -> U {
    self.inner.await.fold(on_none, on_some)
  }

  // --- Transformations. Callbacks run after the upstream settles, never on `None`. ---

  pub fn map<U, F>(self, f: F) -> AsyncMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move { upstream.await.map(f) })
  }

  pub fn map_async<U, F, Fut>(self, f: F) -> AsyncMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move {
      match upstream.await {
        SyncMaybe::Some(value) => SyncMaybe::Some(f(value).await),
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      }
    })
  }

  pub fn map_deferred<U, F>(self, f: F) -> AsyncMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move {
      match upstream.await {
        SyncMaybe::Some(value) => SyncMaybe::Some(f(value).await),
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      }
    })
  }

  /// `f` may return a sync, async or hybrid maybe; it is settled and used as is.
  pub fn flat_map<U, W, F>(self, f: F) -> AsyncMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    W: Settle<Output = SyncMaybe<U>> + 'static,
    F: FnOnce(T) -> W + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move {
      match upstream.await {
        SyncMaybe::Some(value) => f(value).settle().await,
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      }
    })
  }

  pub fn zip<U, F>(self, f: F) -> AsyncMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> U + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move { upstream.await.zip(f) })
  }

  /// Like `zip`, but `f` is async and receives a clone of the value.
  pub fn zip_async<U, F, Fut>(self, f: F) -> AsyncMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move {
      match upstream.await {
        SyncMaybe::Some(value) => {
          let other = f(value.clone()).await;
          SyncMaybe::Some((value, other))
        }
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      }
    })
  }

  pub fn flat_zip<U, W, F>(self, f: F) -> AsyncMaybe<(T, U)>
  where
    U: Clone + Send + Sync + 'static,
    W: Settle<Output = SyncMaybe<U>> + 'static,
    F: FnOnce(&T) -> W + Send + 'static,
  {
    let upstream = self.inner;
    AsyncMaybe::from_future(async move {
      match upstream.await {
        SyncMaybe::Some(value) => {
          let inner = f(&value);
          match inner.settle().await {
            SyncMaybe::Some(other) => SyncMaybe::Some((value, other)),
            SyncMaybe::None(absent) => SyncMaybe::None(absent),
          }
        }
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      }
    })
  }

  pub fn filter<P>(self, predicate: P) -> Self
  where
    P: FnOnce(&T) -> bool + Send + 'static,
  {
    let upstream = self.inner;
    Self::from_future(async move { upstream.await.filter(predicate) })
  }

  /// Fallback on absence; `f` only runs if the upstream settles to `None`.
  pub fn or_else<W, F>(self, f: F) -> Self
  where
    W: Settle<Output = SyncMaybe<T>> + 'static,
    F: FnOnce() -> W + Send + 'static,
  {
    let upstream = self.inner;
    Self::from_future(async move {
      match upstream.await {
        SyncMaybe::None(_) => f().settle().await,
        some => some,
      }
    })
  }

  pub fn tap<F>(self, f: F) -> Self
  where
    F: FnOnce(&T) + Send + 'static,
  {
    let upstream = self.inner;
    Self::from_future(async move { upstream.await.tap(f) })
  }
}

#[async_trait]
impl<T> Settle for AsyncMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  type Output = SyncMaybe<T>;

  async fn settle(self) -> SyncMaybe<T> {
    self.inner.await
  }
}

impl<T> fmt::Debug for AsyncMaybe<T>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.inner.peek() {
      Some(settled) => f.debug_tuple("AsyncMaybe").field(settled).finish(),
      None => f.write_str("AsyncMaybe(<pending>)"),
    }
  }
}
