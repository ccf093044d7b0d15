// flowcore/src/coroutine/delegate.rs

//! The delegation protocol: how a wrapper hands its value, or its failure, to a coroutine.

use crate::core::Absent;
use crate::maybe::sync::SyncMaybe;
use crate::outcome::sync::SyncOutcome;
use std::marker::PhantomData;
use std::ops::ControlFlow;

/// A wrapper family composable by the coroutine drivers.
///
/// `Residual` is what a failing step hands to the driver; the driver rebuilds a failure
/// of the composition's own result type from it.
pub trait Family {
  type Residual;
  type Wrapped<R>;

  fn success<R>(value: R) -> Self::Wrapped<R>;
  fn failure<R>(residual: Self::Residual) -> Self::Wrapped<R>;
}

/// The optional-value family. Its residual is the shared absence marker itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaybeFamily;

impl Family for MaybeFamily {
  type Residual = &'static Absent;
  type Wrapped<R> = SyncMaybe<R>;

  fn success<R>(value: R) -> SyncMaybe<R> {
    SyncMaybe::Some(value)
  }

  fn failure<R>(residual: &'static Absent) -> SyncMaybe<R> {
    SyncMaybe::None(residual)
  }
}

/// The success/failure family for error type `E`.
#[derive(Debug)]
pub struct OutcomeFamily<E>(PhantomData<fn() -> E>);

impl<E> Family for OutcomeFamily<E> {
  type Residual = E;
  type Wrapped<R> = SyncOutcome<R, E>;

  fn success<R>(value: R) -> SyncOutcome<R, E> {
    SyncOutcome::Ok(value)
  }

  fn failure<R>(residual: E) -> SyncOutcome<R, E> {
    SyncOutcome::Err(residual)
  }
}

/// Single-step iteration over a settled wrapper.
///
/// `Continue(value)` means the delegation completes at once and produces the value;
/// `Break(residual)` means the enclosing coroutine must suspend and hand the residual to
/// its driver. The wrapper is consumed, so it can never produce a second value.
pub trait Delegate {
  type Family: Family;
  type Value;

  fn delegate(self) -> ControlFlow<<Self::Family as Family>::Residual, Self::Value>;
}
