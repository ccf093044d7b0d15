// flowcore/src/outcome/mod.rs

//! The success/failure family: `SyncOutcome`, `AsyncOutcome` and the `HybridOutcome` façade.

pub mod future;
pub mod hybrid;
pub mod sync;

pub use future::AsyncOutcome;
pub use hybrid::HybridOutcome;
pub use sync::SyncOutcome;
