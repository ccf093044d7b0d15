// flowcore/src/core/mod.rs

//! Plumbing shared by both wrapper families.

pub mod absent;
pub mod deferred;
pub mod settle;
pub(crate) mod shared;
pub mod tag;

pub use absent::{Absent, ABSENT};
pub use deferred::Deferred;
pub use settle::Settle;
pub(crate) use shared::SharedSettle;
pub use tag::Tag;
