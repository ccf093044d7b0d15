// flowcore/src/core/shared.rs

//! Defines `SharedSettle<S>`, the cloneable deferred value behind the async wrappers.
//!
//! `futures::future::Shared` only hands the original panic to the first poller; later
//! clones see a generic "inner future panicked" message. `SharedSettle` catches a panic
//! inside the shared future, keeps a cloneable copy of its payload, and re-raises that copy
//! for every clone that awaits it, so every branch sees the same payload.

use crate::error::CoreError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Cloneable copy of a panic payload.
#[derive(Debug, Clone)]
enum PanicPayload {
  Static(&'static str),
  Message(String),
  Core(CoreError),
  Opaque,
}

impl PanicPayload {
  fn capture(payload: Box<dyn Any + Send>) -> Self {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
      return PanicPayload::Static(message);
    }
    if let Some(message) = payload.downcast_ref::<String>() {
      return PanicPayload::Message(message.clone());
    }
    if let Some(core_err) = payload.downcast_ref::<CoreError>() {
      return PanicPayload::Core(core_err.clone());
    }
    PanicPayload::Opaque
  }

  fn resume(&self) -> ! {
    match self.clone() {
      PanicPayload::Static(message) => panic::resume_unwind(Box::new(message)),
      PanicPayload::Message(message) => panic::resume_unwind(Box::new(message)),
      PanicPayload::Core(core_err) => panic::resume_unwind(Box::new(core_err)),
      PanicPayload::Opaque => panic::resume_unwind(Box::new("deferred computation panicked with a non-string payload")),
    }
  }
}

pub(crate) struct SharedSettle<S: Clone> {
  inner: Shared<BoxFuture<'static, Result<S, PanicPayload>>>,
}

impl<S> SharedSettle<S>
where
  S: Clone + Send + Sync + 'static,
{
  pub(crate) fn new<Fut>(fut: Fut) -> Self
  where
    Fut: Future<Output = S> + Send + 'static,
  {
    let guarded = AssertUnwindSafe(fut)
      .catch_unwind()
      .map(|settled| settled.map_err(PanicPayload::capture));
    Self {
      inner: guarded.boxed().shared(),
    }
  }

  /// The settled value, if the future already completed without panicking.
  pub(crate) fn peek(&self) -> Option<&S> {
    self.inner.peek().and_then(|settled| settled.as_ref().ok())
  }
}

impl<S: Clone> Clone for SharedSettle<S> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<S: Clone> Future for SharedSettle<S> {
  type Output = S;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<S> {
    match self.inner.poll_unpin(cx) {
      Poll::Ready(Ok(settled)) => Poll::Ready(settled),
      Poll::Ready(Err(payload)) => payload.resume(),
      Poll::Pending => Poll::Pending,
    }
  }
}
