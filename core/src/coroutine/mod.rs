// flowcore/src/coroutine/mod.rs

//! Coroutine-style composition: write a chain of fallible steps as straight-line code.
//!
//! ```
//! use flowcore::{Scope, SyncOutcome};
//! use flowcore::coroutine::OutcomeFamily;
//!
//! let product = SyncOutcome::<i32, String>::compose(|co: Scope<OutcomeFamily<String>>| async move {
//!   let a = co.bind(SyncOutcome::ok(2)).await;
//!   let b = co.bind(SyncOutcome::ok(3)).await;
//!   a * b
//! });
//! assert_eq!(product, SyncOutcome::Ok(6));
//! ```

pub mod delegate;
pub mod driver;
pub mod scope;

pub use delegate::{Delegate, Family, MaybeFamily, OutcomeFamily};
pub use driver::{drive, drive_adapted, drive_async, drive_async_adapted};
pub use scope::{Adapter, Delegation, Scope};
