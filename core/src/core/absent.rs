// flowcore/src/core/absent.rs

//! The process-wide absence marker.

/// Marker carried by every `None` wrapper.
///
/// The private field keeps callers from building their own instance and the type is not
/// `Clone`, so every `&'static Absent` in the process points at [`ABSENT`]. Identity
/// comparison with `std::ptr::eq` is therefore a valid check that a value came from this
/// crate's absence.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Absent {
  tag: &'static str,
}

/// The single absence instance.
pub static ABSENT: Absent = Absent { tag: "None" };

impl Absent {
  pub fn get() -> &'static Absent {
    &ABSENT
  }

  pub fn is_singleton(&'static self) -> bool {
    std::ptr::eq(self, &ABSENT)
  }

  pub fn as_str(&self) -> &'static str {
    self.tag
  }
}
