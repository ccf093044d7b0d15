// flowcore/src/error.rs
use crate::core::tag::Tag;
use thiserror::Error;

/// Contract violations raised by the core.
///
/// Absence and failure are ordinary data and never show up here. These variants only
/// describe misuse: asking a wrapper for something it does not hold, or driving a
/// synchronous composition over a body that genuinely needs to wait.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  /// The value accessor was called on a `None` or `Err` wrapper.
  #[error("Called a value accessor on a {tag} wrapper: there is no value")]
  UnwrapOnFailure { tag: Tag },

  /// The error accessor was called on a `Some`/`Ok` wrapper.
  #[error("Called an error accessor on a {tag} wrapper: wrong accessor for this variant")]
  UnwrapErrOnSuccess { tag: Tag },

  #[error("Coroutine body awaited deferred work inside a synchronous driver; use an async driver")]
  DeferredInSyncDriver,
}

impl CoreError {
  /// Raises this error as a typed panic payload.
  ///
  /// The payload can be recovered with `catch_unwind` and
  /// `downcast_ref::<CoreError>()`, which is how callers tell the variants apart.
  pub(crate) fn raise(self) -> ! {
    tracing::event!(tracing::Level::DEBUG, error = %self, "Contract violation.");
    std::panic::panic_any(self)
  }
}

pub type CoreResult<T, E = CoreError> = std::result::Result<T, E>;
