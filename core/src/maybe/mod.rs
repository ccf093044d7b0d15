// flowcore/src/maybe/mod.rs

//! The optional-value family: `SyncMaybe`, `AsyncMaybe` and the `HybridMaybe` façade.
//!
//! Absence is always the single static [`crate::core::ABSENT`], whichever wrapper or
//! composition produced it.

pub mod future;
pub mod hybrid;
pub mod sync;

pub use future::AsyncMaybe;
pub use hybrid::HybridMaybe;
pub use sync::SyncMaybe;
