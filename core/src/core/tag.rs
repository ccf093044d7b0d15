// flowcore/src/core/tag.rs

//! Stable discriminant tags shared by every wrapper.

use std::fmt;

/// Discriminant of a settled wrapper.
///
/// Pattern-matching layers built on top of the core only ever look at this tag and the
/// accessors; the tag always agrees with which accessor is safe to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
  Some,
  None,
  Ok,
  Err,
}

impl Tag {
  /// The constant string for this variant.
  pub const fn as_str(self) -> &'static str {
    match self {
      Tag::Some => "Some",
      Tag::None => "None",
      Tag::Ok => "Ok",
      Tag::Err => "Err",
    }
  }

  /// `true` for the variants carrying a usable value.
  pub const fn is_success(self) -> bool {
    matches!(self, Tag::Some | Tag::Ok)
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
