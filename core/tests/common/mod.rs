// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use flowcore::CoreError;
use std::any::Any;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("lookup failed: {0}")]
  Lookup(String),
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking callback invocation counts ---
pub static MAP_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static FLAT_MAP_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static ZIP_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static FLAT_ZIP_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  MAP_CALLS.store(0, Ordering::SeqCst);
  FLAT_MAP_CALLS.store(0, Ordering::SeqCst);
  ZIP_CALLS.store(0, Ordering::SeqCst);
  FLAT_ZIP_CALLS.store(0, Ordering::SeqCst);
}

pub fn calls(counter: &Lazy<Arc<AtomicUsize>>) -> usize {
  counter.load(Ordering::SeqCst)
}

/// A fresh counter for tests that do not share state.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn hit(&self) {
    self.0.fetch_add(1, Ordering::SeqCst);
  }

  pub fn count(&self) -> usize {
    self.0.load(Ordering::SeqCst)
  }

  /// A doubling callback that records each call.
  pub fn doubler(&self) -> impl FnOnce(i32) -> i32 + Send + 'static {
    let counter = self.clone();
    move |x| {
      counter.hit();
      x * 2
    }
  }
}

/// Extracts the `CoreError` a panicking accessor raised.
pub fn core_error_from_panic(payload: Box<dyn Any + Send>) -> CoreError {
  match payload.downcast::<CoreError>() {
    Ok(err) => *err,
    Err(_) => panic!("expected a CoreError panic payload"),
  }
}

/// Silences the default panic hook around code that is expected to panic.
pub fn expect_core_panic<R>(f: impl FnOnce() -> R) -> CoreError {
  let previous = std::panic::take_hook();
  std::panic::set_hook(Box::new(|_| {}));
  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
  std::panic::set_hook(previous);
  match result {
    Ok(_) => panic!("expected a panic"),
    Err(payload) => core_error_from_panic(payload),
  }
}
