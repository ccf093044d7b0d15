// flowcore/src/outcome/future.rs

//! Defines `AsyncOutcome<T, E>`, a success/failure value that settles later.

use crate::core::{Deferred, SharedSettle, Settle, Tag};
use crate::error::CoreResult;
use crate::outcome::sync::SyncOutcome;
use async_trait::async_trait;
use futures::future::{self, FutureExt};
use std::fmt;
use std::future::Future;

type SharedOutcome<T, E> = SharedSettle<SyncOutcome<T, E>>;

/// Deferred counterpart of [`SyncOutcome`].
///
/// Holds one shared future settling to a `SyncOutcome<T, E>`. Operations derive new
/// futures from it and never touch it, so cloning a wrapper and chaining on each clone
/// gives fully independent branches over one upstream computation. If that computation
/// panics, every branch that awaits it panics with the same payload.
#[derive(Clone)]
pub struct AsyncOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  inner: SharedOutcome<T, E>,
}

impl<T, E> AsyncOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  pub fn from_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = SyncOutcome<T, E>> + Send + 'static,
  {
    Self {
      inner: SharedSettle::new(fut),
    }
  }

  /// From-deferred construction over a plain `Result` future.
  pub fn from_result_future<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    Self::from_future(fut.map(SyncOutcome::from_result))
  }

  pub fn from_sync(settled: SyncOutcome<T, E>) -> Self {
    Self::from_future(future::ready(settled))
  }

  pub fn ok(value: T) -> Self {
    Self::from_sync(SyncOutcome::Ok(value))
  }

  pub fn err(error: E) -> Self {
    Self::from_sync(SyncOutcome::Err(error))
  }

  pub async fn settle(self) -> SyncOutcome<T, E> {
    self.inner.await
  }

  pub fn is_ok(&self) -> impl Future<Output = bool> + Send + 'static {
    self.inner.clone().map(|settled| settled.is_ok())
  }

  pub fn is_err(&self) -> impl Future<Output = bool> + Send + 'static {
    self.inner.clone().map(|settled| settled.is_err())
  }

  pub fn tag(&self) -> impl Future<Output = Tag> + Send + 'static {
    self.inner.clone().map(|settled| settled.tag())
  }

  pub async fn unwrap(self) -> T {
    self.inner.await.unwrap()
  }

  pub async fn try_unwrap(self) -> CoreResult<T> {
    self.inner.await.try_unwrap()
  }

  pub async fn unwrap_err(self) -> E {
    self.inner.await.unwrap_err()
  }

  pub async fn try_unwrap_err(self) -> CoreResult<E> {
    self.inner.await.try_unwrap_err()
  }

  pub async fn safe_unwrap(self) -> Option<T> {
    self.inner.await.safe_unwrap()
  }

  pub async fn safe_unwrap_err(self) -> Option<E> {
    self.inner.await.safe_unwrap_err()
  }

  pub async fn unwrap_or(self, default: T) -> T {
    self.inner.await.unwrap_or(default)
  }

  pub async fn recover(self, f: impl FnOnce(E) -> T) -> T {
    self.inner.await.recover(f)
  }

  pub async fn fold<U>(self, on_err: impl FnOnce(E) -> U, on_ok: impl FnOnce(T) -> U) -> U {
    self.inner.await.fold(on_err, on_ok)
  }

  pub fn map<U, F>(self, f: F) -> AsyncOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move { upstream.await.map(f) })
  }

  pub fn map_err<F2, F>(self, f: F) -> AsyncOutcome<T, F2>
  where
    F2: Clone + Send + Sync + 'static,
    F: FnOnce(E) -> F2 + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move { upstream.await.map_err(f) })
  }

  pub fn map_async<U, F, Fut>(self, f: F) -> AsyncOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => SyncOutcome::Ok(f(value).await),
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      }
    })
  }

  pub fn map_deferred<U, F>(self, f: F) -> AsyncOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => SyncOutcome::Ok(f(value).await),
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      }
    })
  }

  pub fn flat_map<U, W, F>(self, f: F) -> AsyncOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    W: Settle<Output = SyncOutcome<U, E>> + 'static,
    F: FnOnce(T) -> W + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => f(value).settle().await,
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      }
    })
  }

  pub fn zip<U, F>(self, f: F) -> AsyncOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(&T) -> U + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move { upstream.await.zip(f) })
  }

  /// Like `zip`, but `f` is async and receives a clone of the value.
  pub fn zip_async<U, F, Fut>(self, f: F) -> AsyncOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => {
          let other = f(value.clone()).await;
          SyncOutcome::Ok((value, other))
        }
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      }
    })
  }

  pub fn flat_zip<U, W, F>(self, f: F) -> AsyncOutcome<(T, U), E>
  where
    U: Clone + Send + Sync + 'static,
    W: Settle<Output = SyncOutcome<U, E>> + 'static,
    F: FnOnce(&T) -> W + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => {
          let inner = f(&value);
          match inner.settle().await {
            SyncOutcome::Ok(other) => SyncOutcome::Ok((value, other)),
            SyncOutcome::Err(error) => SyncOutcome::Err(error),
          }
        }
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      }
    })
  }

  /// Fallback on failure; `f` only runs if the upstream settles to `Err`.
  pub fn or_else<F2, W, F>(self, f: F) -> AsyncOutcome<T, F2>
  where
    F2: Clone + Send + Sync + 'static,
    W: Settle<Output = SyncOutcome<T, F2>> + 'static,
    F: FnOnce(E) -> W + Send + 'static,
  {
    let upstream = self.inner;
    AsyncOutcome::from_future(async move {
      match upstream.await {
        SyncOutcome::Ok(value) => SyncOutcome::Ok(value),
        SyncOutcome::Err(error) => f(error).settle().await,
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

  pub fn tap_err<F>(self, f: F) -> Self
  where
    F: FnOnce(&E) + Send + 'static,
  {
    let upstream = self.inner;
    Self::from_future(async move { upstream.await.tap_err(f) })
  }
}

#[async_trait]
impl<T, E> Settle for AsyncOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  type Output = SyncOutcome<T, E>;

  async fn settle(self) -> SyncOutcome<T, E> {
    self.inner.await
  }
}

impl<T, E> fmt::Debug for AsyncOutcome<T, E>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
  E: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.inner.peek() {
      Some(settled) => f.debug_tuple("AsyncOutcome").field(settled).finish(),
      None => f.write_str("AsyncOutcome(<pending>)"),
    }
  }
}
