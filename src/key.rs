//! Keys of an `OrderedArray`: either an integer or a string.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// A key in an `OrderedArray`.
///
/// Integer and string keys never compare equal to each other, so `Key::Int(5)`
/// and `Key::Str("5")` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
  /// An integer key, either explicit or assigned by auto-increment.
  Int(i64),
  /// A string key. Never re-keyed by slicing, reversing or merging.
  Str(String),
}

impl Key {
  /// Parses a key the way PHP normalizes array keys coming from text.
  ///
  /// A canonical decimal integer (`"0"`, `"42"`, `"-7"`) becomes `Key::Int`.
  /// Anything else, including `"05"`, `"+5"`, `"-0"` and `"1.5"`, stays a string.
  ///
  /// ```
  /// use ordarray::Key;
  /// assert_eq!(Key::parse("42"), Key::Int(42));
  /// assert_eq!(Key::parse("042"), Key::Str("042".to_string()));
  /// ```
  pub fn parse(s: &str) -> Key {
    if is_canonical_int(s) {
      if let Ok(i) = s.parse::<i64>() {
        return Key::Int(i);
      }
    }
    Key::Str(s.to_string())
  }

  /// Returns ```true``` if the key is of type ```Int```.
  pub fn is_int(&self) -> bool {
    matches!(self, Key::Int(_))
  }

  /// Returns ```true``` if the key is of type ```Str```.
  pub fn is_str(&self) -> bool {
    matches!(self, Key::Str(_))
  }

  pub fn as_int(&self) -> Option<i64> {
    if let Key::Int(i) = self { Some(*i) } else { None }
  }

  pub fn as_str(&self) -> Option<&str> {
    if let Key::Str(s) = self { Some(s.as_str()) } else { None }
  }
}

fn is_canonical_int(s: &str) -> bool {
  let digits = s.strip_prefix('-').unwrap_or(s);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return false;
  }
  if digits.len() > 1 && digits.starts_with('0') {
    return false;
  }
  // "-0" is not an integer key in PHP
  !(s.starts_with('-') && digits == "0")
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Int(i) => write!(f, "{}", i),
      Key::Str(s) => write!(f, "{}", s),
    }
  }
}

impl From<i64> for Key {
  fn from(i: i64) -> Key { Key::Int(i) }
}

impl From<i32> for Key {
  fn from(i: i32) -> Key { Key::Int(i as i64) }
}

impl From<usize> for Key {
  fn from(i: usize) -> Key { Key::Int(i as i64) }
}

impl From<&str> for Key {
  fn from(s: &str) -> Key { Key::Str(s.to_string()) }
}

impl From<String> for Key {
  fn from(s: String) -> Key { Key::Str(s) }
}

impl From<&Key> for Key {
  fn from(k: &Key) -> Key { k.clone() }
}
