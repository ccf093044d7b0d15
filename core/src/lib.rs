// flowcore/src/lib.rs

//! Flowcore: optional and success/failure values that stay synchronous until they
//! cannot.
//!
//! Two value families are provided:
//!  - `Maybe`: a value or the single, process-wide absence marker.
//!  - `Outcome`: a success value or an error payload.
//!
//! Each family comes in three shapes:
//!  - `Sync*`: a settled value with synchronous operations.
//!  - `Async*`: a deferred value whose operations run as continuations once it settles.
//!  - `Hybrid*`: what call sites usually hold. It behaves synchronously until a step
//!    produces a pending value, then asynchronously for the rest of that chain.
//!
//! Callbacks on a failure are never invoked, whichever shape is used.
//!
//! The `coroutine` module lets a chain of fallible steps be written as straight-line
//! code in an `async` block, short-circuiting on the first failure.

pub mod core;
pub mod coroutine;
pub mod error;
pub mod maybe;
pub mod outcome;

// --- Re-exports for the Public API ---

pub use crate::core::{Absent, Deferred, Settle, Tag, ABSENT};
pub use crate::coroutine::{Adapter, Delegate, Scope};
pub use crate::error::{CoreError, CoreResult};
pub use crate::maybe::{AsyncMaybe, HybridMaybe, SyncMaybe};
pub use crate::outcome::{AsyncOutcome, HybridOutcome, SyncOutcome};

/*
    Typical use:
    1. Build values with `HybridOutcome::ok(..)` / `HybridMaybe::some(..)`, or from
       `Option`/`Result`/futures via the `from_*` constructors.
    2. Chain `map`, `flat_map`, `zip`, `flat_zip`. Use `map_async` / `map_deferred` for
       steps that may need to wait; the chain becomes async from there on.
    3. Read the result with `unwrap()` / `safe_unwrap()`, which return `Deferred` values
       that can be awaited whatever the chain's state, or `settle().await` to get the
       sync wrapper back.
    4. For longer sequences, use `SyncOutcome::compose(|co| async move { .. })` and
       `co.bind(step).await` for each step.
*/
