// flowcore/src/maybe/sync.rs

//! Defines `SyncMaybe<T>`, the settled optional value, and its synchronous operations.

use crate::coroutine::delegate::{Delegate, MaybeFamily};
use crate::core::{Absent, Deferred, Settle, Tag, ABSENT};
use crate::error::{CoreError, CoreResult};
use crate::maybe::future::AsyncMaybe;
use crate::maybe::hybrid::HybridMaybe;
use crate::outcome::sync::SyncOutcome;
use async_trait::async_trait;
use std::ops::ControlFlow;

/// A present value or the shared absence marker.
///
/// Every operation consumes the receiver and returns a fresh wrapper. Operations on
/// `None` return the same `None` (the same `&'static Absent`) without calling anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyncMaybe<T> {
  Some(T),
  None(&'static Absent),
}

impl<T> SyncMaybe<T> {
  pub fn some(value: T) -> Self {
    SyncMaybe::Some(value)
  }

  pub fn none() -> Self {
    SyncMaybe::None(&ABSENT)
  }

  /// From-nullable construction.
  pub fn from_option(value: Option<T>) -> Self {
    match value {
      Some(value) => SyncMaybe::Some(value),
      None => SyncMaybe::none(),
    }
  }

  /// `Some(value)` if `predicate` accepts it, `None` otherwise.
  pub fn from_predicate(value: T, predicate: impl FnOnce(&T) -> bool) -> Self {
    if predicate(&value) {
      SyncMaybe::Some(value)
    } else {
      SyncMaybe::none()
    }
  }

  pub fn is_some(&self) -> bool {
    matches!(self, SyncMaybe::Some(_))
  }

  pub fn is_none(&self) -> bool {
    matches!(self, SyncMaybe::None(_))
  }

  pub fn tag(&self) -> Tag {
    match self {
      SyncMaybe::Some(_) => Tag::Some,
      SyncMaybe::None(_) => Tag::None,
    }
  }

  /// The absence marker held by a `None`, for identity checks.
  pub fn absence(&self) -> Option<&'static Absent> {
    match self {
      SyncMaybe::Some(_) => None,
      SyncMaybe::None(absent) => Some(*absent),
    }
  }

  /// Returns the value.
  ///
  /// # Panics
  ///
  /// Panics with [`CoreError::UnwrapOnFailure`] as the payload when called on `None`.
  pub fn unwrap(self) -> T {
    match self.try_unwrap() {
      Ok(value) => value,
      Err(err) => err.raise(),
    }
  }

  pub fn try_unwrap(self) -> CoreResult<T> {
    match self {
      SyncMaybe::Some(value) => Ok(value),
      SyncMaybe::None(_) => Err(CoreError::UnwrapOnFailure { tag: Tag::None }),
    }
  }

  /// Never panics.
  pub fn safe_unwrap(self) -> Option<T> {
    self.into_option()
  }

  pub fn unwrap_or(self, default: T) -> T {
    match self {
      SyncMaybe::Some(value) => value,
      SyncMaybe::None(_) => default,
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      SyncMaybe::Some(value) => Some(value),
      SyncMaybe::None(_) => None,
    }
  }

  pub fn as_ref(&self) -> SyncMaybe<&T> {
    match self {
      SyncMaybe::Some(value) => SyncMaybe::Some(value),
      SyncMaybe::None(absent) => SyncMaybe::None(*absent),
    }
  }

  pub fn map<U, F>(self, f: F) -> SyncMaybe<U>
  where
    F: FnOnce(T) -> U,
  {
    match self {
      SyncMaybe::Some(value) => SyncMaybe::Some(f(value)),
      SyncMaybe::None(absent) => SyncMaybe::None(absent),
    }
  }

  /// Maps with a callback whose result may still be pending.
  ///
  /// A settled result keeps the returned hybrid synchronous; a pending one promotes it.
  /// `self` is consumed either way, so no earlier handle can observe the promotion.
  pub fn map_deferred<U, F>(self, f: F) -> HybridMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U>,
  {
    match self {
      SyncMaybe::Some(value) => match f(value) {
        Deferred::Settled(mapped) => HybridMaybe::from_sync(SyncMaybe::Some(mapped)),
        Deferred::Pending(fut) => {
          tracing::event!(tracing::Level::TRACE, "Callback returned pending value, promoting to async.");
          HybridMaybe::from_async(AsyncMaybe::from_future(async move { SyncMaybe::Some(fut.await) }))
        }
      },
      SyncMaybe::None(absent) => HybridMaybe::from_sync(SyncMaybe::None(absent)),
    }
  }

  pub fn flat_map<U, F>(self, f: F) -> SyncMaybe<U>
  where
    F: FnOnce(T) -> SyncMaybe<U>,
  {
    match self {
      SyncMaybe::Some(value) => f(value),
      SyncMaybe::None(absent) => SyncMaybe::None(absent),
    }
  }

  /// Pairs the value with `f(&value)`.
  pub fn zip<U, F>(self, f: F) -> SyncMaybe<(T, U)>
  where
    F: FnOnce(&T) -> U,
  {
    match self {
      SyncMaybe::Some(value) => {
        let other = f(&value);
        SyncMaybe::Some((value, other))
      }
      SyncMaybe::None(absent) => SyncMaybe::None(absent),
    }
  }

  /// Pairs the value with the value inside `f(&value)`, or propagates its absence.
  pub fn flat_zip<U, F>(self, f: F) -> SyncMaybe<(T, U)>
  where
    F: FnOnce(&T) -> SyncMaybe<U>,
  {
    match self {
      SyncMaybe::Some(value) => match f(&value) {
        SyncMaybe::Some(other) => SyncMaybe::Some((value, other)),
        SyncMaybe::None(absent) => SyncMaybe::None(absent),
      },
      SyncMaybe::None(absent) => SyncMaybe::None(absent),
    }
  }

  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self {
      SyncMaybe::Some(value) => SyncMaybe::from_predicate(value, predicate),
      none => none,
    }
  }

  /// Fallback on absence. `f` only runs for `None`.
  pub fn or_else(self, f: impl FnOnce() -> SyncMaybe<T>) -> Self {
    match self {
      SyncMaybe::None(_) => f(),
      some => some,
    }
  }

  pub fn tap(self, f: impl FnOnce(&T)) -> Self {
    if let SyncMaybe::Some(value) = &self {
      f(value);
    }
    self
  }

  pub fn fold<U>(self, on_none: impl FnOnce() -> U, on_some: impl FnOnce(T) -> U) -> U {
    match self {
      SyncMaybe::Some(value) => on_some(value),
      SyncMaybe::None(_) => on_none(),
    }
  }

  pub fn ok_or<E>(self, err: E) -> SyncOutcome<T, E> {
    match self {
      SyncMaybe::Some(value) => SyncOutcome::Ok(value),
      SyncMaybe::None(_) => SyncOutcome::Err(err),
    }
  }

  /// `Some` of every value if all inputs are `Some`; stops at the first `None`.
  pub fn all<I>(items: I) -> SyncMaybe<Vec<T>>
  where
    I: IntoIterator<Item = SyncMaybe<T>>,
  {
    let mut values = Vec::new();
    for item in items {
      match item {
        SyncMaybe::Some(value) => values.push(value),
        SyncMaybe::None(absent) => return SyncMaybe::None(absent),
      }
    }
    SyncMaybe::Some(values)
  }

  /// The first `Some` among `items`; later items are not consumed.
  pub fn first_some<I>(items: I) -> SyncMaybe<T>
  where
    I: IntoIterator<Item = SyncMaybe<T>>,
  {
    items
      .into_iter()
      .find(SyncMaybe::is_some)
      .unwrap_or_else(SyncMaybe::none)
  }
}

impl<T> SyncMaybe<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Explicit conversion into an already-settled async wrapper.
  pub fn into_async(self) -> AsyncMaybe<T> {
    AsyncMaybe::from_sync(self)
  }

  /// Promotes unconditionally: the callback is async.
  pub fn map_async<U, F, Fut>(self, f: F) -> AsyncMaybe<U>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = U> + Send + 'static,
  {
    self.into_async().map_async(f)
  }
}

impl<T> Default for SyncMaybe<T> {
  fn default() -> Self {
    SyncMaybe::none()
  }
}

impl<T> From<Option<T>> for SyncMaybe<T> {
  fn from(value: Option<T>) -> Self {
    SyncMaybe::from_option(value)
  }
}

impl<T> From<SyncMaybe<T>> for Option<T> {
  fn from(value: SyncMaybe<T>) -> Self {
    value.into_option()
  }
}

impl<T> Delegate for SyncMaybe<T> {
  type Family = MaybeFamily;
  type Value = T;

  fn delegate(self) -> ControlFlow<&'static Absent, T> {
    match self {
      SyncMaybe::Some(value) => ControlFlow::Continue(value),
      SyncMaybe::None(absent) => ControlFlow::Break(absent),
    }
  }
}

#[async_trait]
impl<T: Send> Settle for SyncMaybe<T> {
  type Output = SyncMaybe<T>;

  async fn settle(self) -> SyncMaybe<T> {
    self
  }
}
