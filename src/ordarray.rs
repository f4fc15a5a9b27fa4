//! This crate provides an insertion-ordered array whose keys are integers or
//! strings, with the semantics of a PHP array and a chainable API.
//!
//! Values are `Data`: integers, floats, booleans, strings, null, and nested
//! `OrderedArray`s. Integer keys auto-increment from one past the largest
//! integer key. Operations that extract or reshape (`values`, `keys`, `slice`,
//! `reverse`, `append`, `clean`) return new arrays; `push`, `pop`, `set` and
//! `set_val` mutate in place and return `&mut Self` where there is nothing
//! else to return.
//!
//! ```
//! use ordarray::{ary, Data};
//!
//! let mut list = ary!["hello", "world"];
//! list.push(["!"]);
//! assert_eq!(list.join(" "), "hello world !");
//!
//! let nested = ary!["I", "am", list];
//! assert_eq!(nested.join(" "), "I am hello world !");
//! assert_eq!(nested.end().unwrap().array().end(), Ok(&Data::from("!")));
//! ```

#![cfg_attr(feature = "no_std_support", no_std)]

extern crate alloc;

pub mod key;
pub mod data;
pub mod orderedarray;
pub mod json_util;

pub use crate::key::Key;
pub use crate::data::Data;
pub use crate::orderedarray::{ArrayError, Entries, KeyHasher, OrderedArray};

#[cfg(test)]
mod orderedarray_tests;
#[cfg(test)]
mod data_tests;
#[cfg(all(test, not(feature = "serde_support")))]
mod json_util_tests;

/// Builds an `OrderedArray` from a PHP-style literal.
///
/// Items are either `key => value` or a bare value; bare values take the next
/// integer key, exactly like `[...]` in PHP.
///
/// ```
/// use ordarray::ary;
///
/// let a = ary!["a" => 1, "b" => 3, 99 => 4, 5, 6];
/// assert_eq!(a.keys(), ary!["a", "b", 99, 100, 101]);
/// assert_eq!(a.next_index(), 102);
/// assert!(ary![].is_empty());
/// ```
#[macro_export]
macro_rules! ary {
  (@item $arr:ident;) => {};
  (@item $arr:ident; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
    $arr.set($key, $value);
    $( $crate::ary!(@item $arr; $($rest)*); )?
  };
  (@item $arr:ident; $value:expr $(, $($rest:tt)*)?) => {
    $arr.push_property($crate::Data::from($value));
    $( $crate::ary!(@item $arr; $($rest)*); )?
  };
  ($($items:tt)*) => {{
    #[allow(unused_mut)]
    let mut arr = $crate::OrderedArray::new();
    $crate::ary!(@item arr; $($items)*);
    arr
  }};
}
