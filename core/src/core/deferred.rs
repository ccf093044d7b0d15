// flowcore/src/core/deferred.rs

//! Explicit two-case representation of a callback result: already settled, or pending.
//!
//! Callbacks that may or may not need to wait return a `Deferred<T>`. The hybrid wrappers
//! branch on the variant once, when the value is produced, instead of probing arbitrary
//! return values at runtime.

use futures::future::{self, BoxFuture, Either, FutureExt, Ready};
use std::fmt;
use std::future::{Future, IntoFuture};

pub enum Deferred<T> {
  /// The value is available now.
  Settled(T),
  /// The value will be available once the future completes.
  Pending(BoxFuture<'static, T>),
}

impl<T> Deferred<T> {
  pub fn settled(value: T) -> Self {
    Deferred::Settled(value)
  }

  pub fn pending<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = T> + Send + 'static,
  {
    Deferred::Pending(fut.boxed())
  }

  pub fn is_settled(&self) -> bool {
    matches!(self, Deferred::Settled(_))
  }

  pub fn is_pending(&self) -> bool {
    matches!(self, Deferred::Pending(_))
  }

  /// Returns the value if it is already settled, or gives the pending value back.
  pub fn into_settled(self) -> Result<T, Self> {
    match self {
      Deferred::Settled(value) => Ok(value),
      pending => Err(pending),
    }
  }

  pub fn map<U, F>(self, f: F) -> Deferred<U>
  where
    T: 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    match self {
      Deferred::Settled(value) => Deferred::Settled(f(value)),
      Deferred::Pending(fut) => Deferred::Pending(fut.map(f).boxed()),
    }
  }
}

impl<T> IntoFuture for Deferred<T> {
  type Output = T;
  type IntoFuture = Either<Ready<T>, BoxFuture<'static, T>>;

  fn into_future(self) -> Self::IntoFuture {
    match self {
      Deferred::Settled(value) => Either::Left(future::ready(value)),
      Deferred::Pending(fut) => Either::Right(fut),
    }
  }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Deferred::Settled(value) => f.debug_tuple("Settled").field(value).finish(),
      Deferred::Pending(_) => f.write_str("Pending(..)"),
    }
  }
}
