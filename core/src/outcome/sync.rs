// flowcore/src/outcome/sync.rs

//! Defines `SyncOutcome<T, E>`, the settled success/failure value.

use crate::coroutine::delegate::{Delegate, OutcomeFamily};
use crate::core::{Deferred, Settle, Tag};
use crate::error::{CoreError, CoreResult};
use crate::maybe::sync::SyncMaybe;
use crate::outcome::future::AsyncOutcome;
use crate::outcome::hybrid::HybridOutcome;
use async_trait::async_trait;
use std::any::Any;
use std::future::Future;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use tracing::{event, Level};

/// A success carrying `T` or a failure carrying `E`.
///
/// Operations consume the receiver. On `Err` every value-side callback is skipped and
/// the error is moved into the result untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyncOutcome<T, E> {
  Ok(T),
  Err(E),
}

impl<T, E> SyncOutcome<T, E> {
  pub fn ok(value: T) -> Self {
    SyncOutcome::Ok(value)
  }

  pub fn err(error: E) -> Self {
    SyncOutcome::Err(error)
  }

  pub fn from_result(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => SyncOutcome::Ok(value),
      Err(error) => SyncOutcome::Err(error),
    }
  }

  /// From-nullable construction; `on_none` builds the error for a missing value.
  pub fn from_option(value: Option<T>, on_none: impl FnOnce() -> E) -> Self {
    match value {
      Some(value) => SyncOutcome::Ok(value),
      None => SyncOutcome::Err(on_none()),
    }
  }

  pub fn from_predicate(value: T, predicate: impl FnOnce(&T) -> bool, on_reject: impl FnOnce(&T) -> E) -> Self {
    if predicate(&value) {
      SyncOutcome::Ok(value)
    } else {
      let error = on_reject(&value);
      SyncOutcome::Err(error)
    }
  }

  pub fn is_ok(&self) -> bool {
    matches!(self, SyncOutcome::Ok(_))
  }

  pub fn is_err(&self) -> bool {
    matches!(self, SyncOutcome::Err(_))
  }

  pub fn tag(&self) -> Tag {
    match self {
      SyncOutcome::Ok(_) => Tag::Ok,
      SyncOutcome::Err(_) => Tag::Err,
    }
  }

  /// # Panics
  ///
  /// Panics with [`CoreError::UnwrapOnFailure`] as the payload when called on `Err`.
  pub fn unwrap(self) -> T {
    match self.try_unwrap() {
      Ok(value) => value,
      Err(err) => err.raise(),
    }
  }

  pub fn try_unwrap(self) -> CoreResult<T> {
    match self {
      SyncOutcome::Ok(value) => Ok(value),
      SyncOutcome::Err(_) => Err(CoreError::UnwrapOnFailure { tag: Tag::Err }),
    }
  }

  /// # Panics
  ///
  /// Panics with [`CoreError::UnwrapErrOnSuccess`] as the payload when called on `Ok`.
  pub fn unwrap_err(self) -> E {
    match self.try_unwrap_err() {
      Ok(error) => error,
      Err(err) => err.raise(),
    }
  }

  pub fn try_unwrap_err(self) -> CoreResult<E> {
    match self {
      SyncOutcome::Err(error) => Ok(error),
      SyncOutcome::Ok(_) => Err(CoreError::UnwrapErrOnSuccess { tag: Tag::Ok }),
    }
  }

  pub fn safe_unwrap(self) -> Option<T> {
    match self {
      SyncOutcome::Ok(value) => Some(value),
      SyncOutcome::Err(_) => None,
    }
  }

  pub fn safe_unwrap_err(self) -> Option<E> {
    match self {
      SyncOutcome::Ok(_) => None,
      SyncOutcome::Err(error) => Some(error),
    }
  }

  pub fn unwrap_or(self, default: T) -> T {
    match self {
      SyncOutcome::Ok(value) => value,
      SyncOutcome::Err(_) => default,
    }
  }

  pub fn into_result(self) -> Result<T, E> {
    match self {
      SyncOutcome::Ok(value) => Ok(value),
      SyncOutcome::Err(error) => Err(error),
    }
  }

  /// Drops the error: `Ok` becomes `Some`, `Err` becomes the shared `None`.
  pub fn ok_value(self) -> SyncMaybe<T> {
    match self {
      SyncOutcome::Ok(value) => SyncMaybe::Some(value),
      SyncOutcome::Err(_) => SyncMaybe::none(),
    }
  }

  pub fn as_ref(&self) -> SyncOutcome<&T, &E> {
    match self {
      SyncOutcome::Ok(value) => SyncOutcome::Ok(value),
      SyncOutcome::Err(error) => SyncOutcome::Err(error),
    }
  }

  pub fn map<U, F>(self, f: F) -> SyncOutcome<U, E>
  where
    F: FnOnce(T) -> U,
  {
    match self {
      SyncOutcome::Ok(value) => SyncOutcome::Ok(f(value)),
      SyncOutcome::Err(error) => SyncOutcome::Err(error),
    }
  }

  pub fn map_err<F2, F>(self, f: F) -> SyncOutcome<T, F2>
  where
    F: FnOnce(E) -> F2,
  {
    match self {
      SyncOutcome::Ok(value) => SyncOutcome::Ok(value),
      SyncOutcome::Err(error) => SyncOutcome::Err(f(error)),
    }
  }

  /// Maps with a callback whose result may still be pending; a pending result promotes
  /// the returned hybrid to async.
  pub fn map_deferred<U, F>(self, f: F) -> HybridOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Deferred<U>,
  {
    match self {
      SyncOutcome::Ok(value) => match f(value) {
        Deferred::Settled(mapped) => HybridOutcome::from_sync(SyncOutcome::Ok(mapped)),
        Deferred::Pending(fut) => {
          event!(Level::TRACE, "Callback returned pending value, promoting to async.");
          HybridOutcome::from_async(AsyncOutcome::from_future(async move { SyncOutcome::Ok(fut.await) }))
        }
      },
      SyncOutcome::Err(error) => HybridOutcome::from_sync(SyncOutcome::Err(error)),
    }
  }

  /// `f`'s outcome is returned as is, so an `Ok` can collapse into an `Err`.
  pub fn flat_map<U, F>(self, f: F) -> SyncOutcome<U, E>
  where
    F: FnOnce(T) -> SyncOutcome<U, E>,
  {
    match self {
      SyncOutcome::Ok(value) => f(value),
      SyncOutcome::Err(error) => SyncOutcome::Err(error),
    }
  }

  pub fn zip<U, F>(self, f: F) -> SyncOutcome<(T, U), E>
  where
    F: FnOnce(&T) -> U,
  {
    match self {
      SyncOutcome::Ok(value) => {
        let other = f(&value);
        SyncOutcome::Ok((value, other))
      }
      SyncOutcome::Err(error) => SyncOutcome::Err(error),
    }
  }

  pub fn flat_zip<U, F>(self, f: F) -> SyncOutcome<(T, U), E>
  where
    F: FnOnce(&T) -> SyncOutcome<U, E>,
  {
    match self {
      SyncOutcome::Ok(value) => match f(&value) {
        SyncOutcome::Ok(other) => SyncOutcome::Ok((value, other)),
        SyncOutcome::Err(error) => SyncOutcome::Err(error),
      },
      SyncOutcome::Err(error) => SyncOutcome::Err(error),
    }
  }

  /// Fallback on failure: `f` receives the error and may recover or fail differently.
  pub fn or_else<F2, F>(self, f: F) -> SyncOutcome<T, F2>
  where
    F: FnOnce(E) -> SyncOutcome<T, F2>,
  {
    match self {
      SyncOutcome::Ok(value) => SyncOutcome::Ok(value),
      SyncOutcome::Err(error) => f(error),
    }
  }

  /// Turns any failure into a value.
  pub fn recover(self, f: impl FnOnce(E) -> T) -> T {
    match self {
      SyncOutcome::Ok(value) => value,
      SyncOutcome::Err(error) => f(error),
    }
  }

  pub fn tap(self, f: impl FnOnce(&T)) -> Self {
    if let SyncOutcome::Ok(value) = &self {
      f(value);
    }
    self
  }

  pub fn tap_err(self, f: impl FnOnce(&E)) -> Self {
    if let SyncOutcome::Err(error) = &self {
      f(error);
    }
    self
  }

  pub fn fold<U>(self, on_err: impl FnOnce(E) -> U, on_ok: impl FnOnce(T) -> U) -> U {
    match self {
      SyncOutcome::Ok(value) => on_ok(value),
      SyncOutcome::Err(error) => on_err(error),
    }
  }

  /// Runs every validator against `value` and accumulates every error.
  ///
  /// Unlike `flat_map`, a failing validator does not stop the others.
  pub fn validate<U, V, I>(value: T, validators: I) -> SyncOutcome<T, Vec<E>>
  where
    I: IntoIterator<Item = V>,
    V: FnOnce(&T) -> SyncOutcome<U, E>,
  {
    let errors: Vec<E> = validators
      .into_iter()
      .filter_map(|validator| validator(&value).safe_unwrap_err())
      .collect();
    if errors.is_empty() {
      SyncOutcome::Ok(value)
    } else {
      event!(Level::TRACE, failed_validators = errors.len(), "Validation accumulated errors.");
      SyncOutcome::Err(errors)
    }
  }

  /// All must succeed. Stops consuming `items` at the first failure, which is returned.
  pub fn all<I>(items: I) -> SyncOutcome<Vec<T>, E>
  where
    I: IntoIterator<Item = SyncOutcome<T, E>>,
  {
    let mut values = Vec::new();
    for item in items {
      match item {
        SyncOutcome::Ok(value) => values.push(value),
        SyncOutcome::Err(error) => return SyncOutcome::Err(error),
      }
    }
    SyncOutcome::Ok(values)
  }

  /// First success of many. Stops consuming at the first `Ok`; if none succeeds, every
  /// error is returned in order.
  pub fn any<I>(items: I) -> SyncOutcome<T, Vec<E>>
  where
    I: IntoIterator<Item = SyncOutcome<T, E>>,
  {
    let mut errors = Vec::new();
    for item in items {
      match item {
        SyncOutcome::Ok(value) => return SyncOutcome::Ok(value),
        SyncOutcome::Err(error) => errors.push(error),
      }
    }
    SyncOutcome::Err(errors)
  }
}

impl<T> SyncOutcome<T, anyhow::Error> {
  /// Catch-and-wrap: runs `f`, turning a panic into an `Err` carrying its message.
  pub fn catch(f: impl FnOnce() -> T) -> Self {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
      Ok(value) => SyncOutcome::Ok(value),
      Err(payload) => {
        let error = panic_payload_to_error(payload);
        event!(Level::DEBUG, error = %error, "Caught panic and wrapped it as a failure.");
        SyncOutcome::Err(error)
      }
    }
  }
}

fn panic_payload_to_error(payload: Box<dyn Any + Send>) -> anyhow::Error {
  if let Some(core_err) = payload.downcast_ref::<CoreError>() {
    return anyhow::Error::new(core_err.clone());
  }
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    return anyhow::anyhow!("{}", message);
  }
  if let Some(message) = payload.downcast_ref::<String>() {
    return anyhow::anyhow!("{}", message);
  }
  anyhow::anyhow!("panic with a non-string payload")
}

impl<T, E> SyncOutcome<T, E>
where
  T: Clone + Send + Sync + 'static,
  E: Clone + Send + Sync + 'static,
{
  /// Explicit conversion into an already-settled async wrapper.
  pub fn into_async(self) -> AsyncOutcome<T, E> {
    AsyncOutcome::from_sync(self)
  }

  pub fn map_async<U, F, Fut>(self, f: F) -> AsyncOutcome<U, E>
  where
    U: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
  {
    self.into_async().map_async(f)
  }
}

impl<T, E> From<Result<T, E>> for SyncOutcome<T, E> {
  fn from(result: Result<T, E>) -> Self {
    SyncOutcome::from_result(result)
  }
}

impl<T, E> From<SyncOutcome<T, E>> for Result<T, E> {
  fn from(outcome: SyncOutcome<T, E>) -> Self {
    outcome.into_result()
  }
}

impl<T, E> Delegate for SyncOutcome<T, E> {
  type Family = OutcomeFamily<E>;
  type Value = T;

  fn delegate(self) -> ControlFlow<E, T> {
    match self {
      SyncOutcome::Ok(value) => ControlFlow::Continue(value),
      SyncOutcome::Err(error) => ControlFlow::Break(error),
    }
  }
}

#[async_trait]
impl<T: Send, E: Send> Settle for SyncOutcome<T, E> {
  type Output = SyncOutcome<T, E>;

  async fn settle(self) -> SyncOutcome<T, E> {
    self
  }
}
