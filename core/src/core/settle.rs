// flowcore/src/core/settle.rs

//! Defines the `Settle` trait: anything that can be awaited down to a sync wrapper.

use async_trait::async_trait;

/// A wrapper that can be driven to its settled, synchronous form.
///
/// Sync wrappers settle immediately, async wrappers once their deferred computation
/// completes, and hybrids according to their current state. Operations on the async
/// wrappers accept any `Settle` implementor as a callback result, so a `flat_map` callback
/// may return a sync, async or hybrid wrapper of the same family.
#[async_trait]
pub trait Settle: Send {
  /// The settled (sync) wrapper type.
  type Output: Send;

  async fn settle(self) -> Self::Output;
}
