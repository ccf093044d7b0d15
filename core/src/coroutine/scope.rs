// flowcore/src/coroutine/scope.rs

//! Defines the coroutine handle (`Scope`), the delegation future and the adapter helper.

use crate::coroutine::delegate::{Delegate, Family};
use crate::core::Settle;
use parking_lot::Mutex;
use std::future::Future;
use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{event, Level};

/// Where a failing delegation parks its residual for the driver to collect.
pub(crate) type Slot<R> = Arc<Mutex<Option<R>>>;

/// Handle passed to a coroutine body, one per composition.
///
/// `scope.bind(wrapper).await` is the delegation step: it evaluates to the wrapper's value
/// on success and never returns on failure.
pub struct Scope<F: Family> {
  slot: Slot<F::Residual>,
}

impl<F: Family> Scope<F> {
  pub(crate) fn new() -> (Self, Slot<F::Residual>) {
    let slot: Slot<F::Residual> = Arc::new(Mutex::new(None));
    (Self { slot: slot.clone() }, slot)
  }

  /// Delegates to a settled wrapper of this family.
  pub fn bind<W>(&self, wrapper: W) -> Delegation<W::Value, F::Residual>
  where
    W: Delegate<Family = F>,
  {
    Delegation {
      step: Some(wrapper.delegate()),
      slot: self.slot.clone(),
    }
  }

  /// Awaits a deferred wrapper, then delegates to its settled form.
  ///
  /// Only meaningful inside the asynchronous drivers.
  pub async fn bind_settled<S, W>(&self, deferred: S) -> W::Value
  where
    S: Settle<Output = W>,
    W: Delegate<Family = F>,
  {
    let settled = deferred.settle().await;
    self.bind(settled).await
  }
}

impl<F: Family> Clone for Scope<F> {
  fn clone(&self) -> Self {
    Self {
      slot: self.slot.clone(),
    }
  }
}

/// Future returned by [`Scope::bind`].
///
/// Resolves on its first poll for a success. For a failure it stores the residual and
/// stays pending for good: the driver sees the residual and drops the coroutine.
#[must_use = "a delegation does nothing unless awaited"]
pub struct Delegation<V, R> {
  step: Option<ControlFlow<R, V>>,
  slot: Slot<R>,
}

impl<V, R> Unpin for Delegation<V, R> {}

impl<V, R> Future for Delegation<V, R> {
  type Output = V;

  fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<V> {
    let this = self.get_mut();
    match this.step.take() {
      Some(ControlFlow::Continue(value)) => Poll::Ready(value),
      Some(ControlFlow::Break(residual)) => {
        let mut slot = this.slot.lock();
        // First failure wins if a body polls several delegations at once.
        if slot.is_none() {
          *slot = Some(residual);
        }
        event!(Level::TRACE, "Delegation hit a failure, suspending coroutine.");
        Poll::Pending
      }
      None => Poll::Pending,
    }
  }
}

/// Identity helper handed to adapter-style coroutine bodies.
///
/// `adapt.pass(w)` returns `w` untouched; the only effect is compile-time: `w` must be a
/// wrapper of the family being composed.
pub struct Adapter<F> {
  _family: PhantomData<fn() -> F>,
}

impl<F: Family> Adapter<F> {
  pub(crate) fn new() -> Self {
    Self { _family: PhantomData }
  }

  pub fn pass<W>(&self, wrapper: W) -> W
  where
    W: Delegate<Family = F>,
  {
    wrapper
  }
}

impl<F> Clone for Adapter<F> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<F> Copy for Adapter<F> {}
