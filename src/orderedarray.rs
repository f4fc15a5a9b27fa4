//! This module defines the `OrderedArray` struct, an insertion-ordered
//! container whose keys are integers or strings, with PHP array semantics.

extern crate alloc;

#[cfg(not(feature = "no_std_support"))]
use std::collections::hash_map::RandomState;
#[cfg(not(feature = "no_std_support"))]
use std::println;

use alloc::string::String;
#[cfg(feature = "serde_support")]
use alloc::string::ToString;
use core::fmt::{self, Write};
use core::ops::Index;

use indexmap::IndexMap;

#[cfg(feature = "serde_support")]
use serde_json::Value;

use crate::data::*;
#[cfg(not(feature = "serde_support"))]
use crate::json_util;
use crate::json_util::ParseError;
use crate::key::Key;

/// Hasher used by the key index.
#[cfg(not(feature = "no_std_support"))]
pub type KeyHasher = RandomState;
/// Hasher used by the key index.
#[cfg(feature = "no_std_support")]
pub type KeyHasher = hashbrown::hash_map::DefaultHashBuilder;

/// The plain ordered map an `OrderedArray` wraps. Accepted by construction and
/// returned by `OrderedArray::val()`.
pub type Entries = IndexMap<Key, Data, KeyHasher>;

/// Iterator over the `(key, value)` pairs of an `OrderedArray`.
pub type Iter<'a> = indexmap::map::Iter<'a, Key, Data>;

// --- ArrayError Definition ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// `first`, `end` or `pop` was called on an array with no entries.
    EmptyContainer,
    /// A value of the wrong type was supplied where an array was expected.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The next auto key is already taken because the key `i64::MAX` is in use.
    NextElementOccupied,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::EmptyContainer => write!(f, "Array has no entries"),
            ArrayError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            ArrayError::NextElementOccupied => {
                write!(f, "Cannot add element: the next auto key is already occupied")
            }
        }
    }
}

#[cfg(not(feature = "no_std_support"))]
impl std::error::Error for ArrayError {}

// --- OrderedArray Definition ---

/// An insertion-ordered array with integer and string keys.
///
/// Assigning to an existing key overwrites its value without moving it.
/// Pushing assigns the next integer key, one past the largest integer key
/// present. Extraction methods (`values`, `keys`, `slice`, `reverse`, ...)
/// return new arrays; `push`, `pop`, `set` and `set_val` mutate in place.
///
/// ```
/// use ordarray::ary;
///
/// let a = ary!["a" => 1, "b" => 3, 99 => 4, 5, 6];
/// assert_eq!(a.limit(3, false), ary!["a" => 1, "b" => 3, 4]);
/// assert_eq!(a.values().join(","), "1,3,4,5,6");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedArray {
    entries: Entries,
    next_index: i64,
}

// --- Core Functionality ---
impl OrderedArray {
    pub fn new() -> OrderedArray {
        OrderedArray::default()
    }

    /// Builds an array from `(key, value)` pairs. Later duplicates overwrite
    /// earlier ones in place.
    pub fn from_entries<K, V, I>(pairs: I) -> OrderedArray
    where
        K: Into<Key>,
        V: Into<Data>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut arr = OrderedArray::new();
        for (k, v) in pairs {
            arr.set(k, v);
        }
        arr
    }

    /// Builds a list: values keyed `0..n-1`.
    pub fn from_values<V, I>(values: I) -> OrderedArray
    where
        V: Into<Data>,
        I: IntoIterator<Item = V>,
    {
        let mut arr = OrderedArray::new();
        arr.push(values);
        arr
    }

    // --- Serialization / Deserialization ---
    pub fn from_string(s: &str) -> Result<OrderedArray, ParseError> {
        #[cfg(feature = "serde_support")]
        {
            let value: Value =
                serde_json::from_str(s).map_err(|e| ParseError::Message(e.to_string()))?;
            OrderedArray::from_json(value).map_err(|_| ParseError::NotAContainer)
        }
        #[cfg(not(feature = "serde_support"))]
        {
            json_util::array_from_string(s)
        }
    }

    #[cfg(feature = "serde_support")]
    pub fn from_json(value: Value) -> Result<OrderedArray, ArrayError> {
        match Data::from_json(value) {
            Data::DArray(a) => Ok(a),
            other => Err(ArrayError::TypeMismatch {
                expected: "array",
                found: other.type_name(),
            }),
        }
    }

    #[cfg(feature = "serde_support")]
    pub fn to_json(&self) -> Value {
        if self.is_list() {
            Value::Array(self.entries.values().map(Data::to_json).collect())
        } else {
            let mut map = serde_json::Map::new();
            for (k, v) in &self.entries {
                map.insert(k.to_string(), v.to_json());
            }
            Value::Object(map)
        }
    }

    // --- Raw Access ---

    /// Returns a copy of the underlying ordered map.
    pub fn val(&self) -> Entries {
        self.entries.clone()
    }

    /// Replaces every entry and recomputes the next auto key.
    pub fn set_val<K, V, I>(&mut self, pairs: I) -> &mut Self
    where
        K: Into<Key>,
        V: Into<Data>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.entries.clear();
        self.next_index = 0;
        for (k, v) in pairs {
            self.set(k, v);
        }
        self
    }

    // --- Accessors ---
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Data> {
        self.entries.get(&key.into())
    }

    pub fn contains_key<K: Into<Key>>(&self, key: K) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// The key `push` would assign next.
    pub fn next_index(&self) -> i64 {
        self.next_index
    }

    /// Returns ```true``` if the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, k)| k.as_int() == Some(i as i64))
    }

    pub fn iter(&self) -> Iter<'_> {
        self.entries.iter()
    }

    /// Value of the first entry.
    pub fn first(&self) -> Result<&Data, ArrayError> {
        self.entries
            .first()
            .map(|(_, v)| v)
            .ok_or(ArrayError::EmptyContainer)
    }

    /// Value of the last entry.
    pub fn end(&self) -> Result<&Data, ArrayError> {
        self.entries
            .last()
            .map(|(_, v)| v)
            .ok_or(ArrayError::EmptyContainer)
    }

    // --- Mutators ---

    /// Assigns `value` to `key`, overwriting in place if the key exists.
    pub fn set<K: Into<Key>, V: Into<Data>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        if let Key::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value.into());
        self
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove<K: Into<Key>>(&mut self, key: K) -> Option<Data> {
        let removed = self.entries.shift_remove(&key.into());
        if removed.is_some() {
            self.reindex();
        }
        removed
    }

    /// Appends `data` with the next auto key.
    ///
    /// Once the key `i64::MAX` is in use there is no next key: the value is
    /// dropped with a warning and the existing entry is left alone. Use
    /// `try_push_property` to get an error instead.
    pub fn push_property(&mut self, data: Data) -> &mut Self {
        if let Err(_e) = self.try_push_property(data) {
            #[cfg(not(feature = "no_std_support"))]
            println!("Warning: OrderedArray::push_property dropped a value: {}", _e);
        }
        self
    }

    /// Appends `data` with the next auto key, or fails with
    /// `NextElementOccupied` when that key is already in use.
    pub fn try_push_property(&mut self, data: Data) -> Result<&mut Self, ArrayError> {
        let key = Key::Int(self.next_index);
        if self.entries.contains_key(&key) {
            return Err(ArrayError::NextElementOccupied);
        }
        self.next_index = self.next_index.saturating_add(1);
        self.entries.insert(key, data);
        Ok(self)
    }

    /// Appends each value with the next auto key.
    pub fn push<V, I>(&mut self, values: I) -> &mut Self
    where
        V: Into<Data>,
        I: IntoIterator<Item = V>,
    {
        for v in values {
            self.push_property(v.into());
        }
        self
    }

    /// Removes the last entry and returns its value.
    pub fn pop(&mut self) -> Result<Data, ArrayError> {
        let (key, value) = self.entries.pop().ok_or(ArrayError::EmptyContainer)?;
        if key.is_int() {
            self.reindex();
        }
        Ok(value)
    }

    fn reindex(&mut self) {
        self.next_index = self
            .entries
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map_or(0, |max| max.saturating_add(1).max(0));
    }

    // --- Extraction ---

    /// Values only, keyed `0..n-1`.
    pub fn values(&self) -> OrderedArray {
        OrderedArray::from_values(self.entries.values().cloned())
    }

    /// Keys as values, keyed `0..n-1`.
    pub fn keys(&self) -> OrderedArray {
        OrderedArray::from_values(self.entries.keys().cloned())
    }

    /// Keys whose value matches `search`, keyed `0..n-1`.
    pub fn keys_of(&self, search: &Data, strict: bool) -> OrderedArray {
        OrderedArray::from_values(
            self.entries
                .iter()
                .filter(|(_, v)| {
                    if strict {
                        v.strict_equals(search)
                    } else {
                        v.loose_equals(search)
                    }
                })
                .map(|(k, _)| k.clone()),
        )
    }

    /// The first `count` entries; empty when `count <= 0`.
    pub fn limit(&self, count: i64, preserve_keys: bool) -> OrderedArray {
        if count <= 0 {
            return OrderedArray::new();
        }
        self.slice(0, Some(count), preserve_keys)
    }

    /// A window of entries with `array_slice` bounds.
    ///
    /// A negative `offset` counts from the end. `length` of `None` takes the
    /// rest, a negative `length` stops that many entries before the end.
    /// Overflowing bounds are clamped.
    pub fn slice(&self, offset: i64, length: Option<i64>, preserve_keys: bool) -> OrderedArray {
        let size = self.len() as i64;
        let start = if offset < 0 {
            (size + offset).max(0)
        } else {
            offset.min(size)
        };
        let end = match length {
            None => size,
            Some(l) if l < 0 => (size + l).max(start),
            Some(l) => start.saturating_add(l).min(size),
        };
        rebuild(
            self.entries
                .iter()
                .skip(start as usize)
                .take((end - start) as usize),
            preserve_keys,
        )
    }

    /// Entries in reverse order. String keys are always kept.
    pub fn reverse(&self, preserve_keys: bool) -> OrderedArray {
        rebuild(self.entries.iter().rev(), preserve_keys)
    }

    /// Concatenates the values with `separator`; nested arrays are joined
    /// recursively with the same separator.
    pub fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        // fmt::Write on a String cannot fail
        let _ = write_joined(&mut out, self, separator);
        out
    }

    /// Merges `other` onto the end of a copy of this array.
    ///
    /// `other` must be an array (`OrderedArray`, `Entries` or a `Vec` of values);
    /// anything else is a `TypeMismatch`.
    pub fn append<T: Into<Data>>(&self, other: T, preserve_keys: bool) -> Result<OrderedArray, ArrayError> {
        match other.into() {
            Data::DArray(a) => Ok(self.merge(&a, preserve_keys)),
            other => Err(ArrayError::TypeMismatch {
                expected: "array",
                found: other.type_name(),
            }),
        }
    }

    /// Merges two arrays.
    ///
    /// Without `preserve_keys` integer keys from both sides are renumbered in
    /// combined order (`array_merge`). With it every entry of `other` is
    /// assigned under its own key (`array_replace`). Either way a key present
    /// on both sides keeps its first position and takes `other`'s value.
    pub fn merge(&self, other: &OrderedArray, preserve_keys: bool) -> OrderedArray {
        if preserve_keys {
            let mut out = self.clone();
            for (k, v) in other {
                out.set(k, v.clone());
            }
            out
        } else {
            rebuild(self.entries.iter().chain(other.entries.iter()), false)
        }
    }

    /// Entries whose value is truthy, keys untouched.
    pub fn clean(&self) -> OrderedArray {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_truthy())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Loose (`==`) array comparison: same keys with loosely equal values, in
    /// any order.
    pub fn loose_equals(&self, other: &OrderedArray) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k).map_or(false, |w| v.loose_equals(w)))
    }
}

/// Copies entries into a new array, renumbering integer keys unless
/// `preserve_keys` is set.
fn rebuild<'a, I>(entries: I, preserve_keys: bool) -> OrderedArray
where
    I: Iterator<Item = (&'a Key, &'a Data)>,
{
    let mut out = OrderedArray::new();
    for (k, v) in entries {
        if k.is_int() && !preserve_keys {
            out.push_property(v.clone());
        } else {
            out.set(k, v.clone());
        }
    }
    out
}

fn write_joined<W: Write>(writer: &mut W, arr: &OrderedArray, separator: &str) -> fmt::Result {
    let mut first = true;
    for v in arr.entries.values() {
        if !first {
            writer.write_str(separator)?;
        }
        first = false;
        match v {
            Data::DArray(nested) => write_joined(writer, nested, separator)?,
            scalar => writer.write_str(&scalar.as_string())?,
        }
    }
    Ok(())
}

// --- Trait Implementations ---

/// Strict comparison: same keys and values, same types, same order.
impl PartialEq for OrderedArray {
    fn eq(&self, other: &OrderedArray) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl fmt::Display for OrderedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "serde_support")]
        {
            write!(f, "{}", self.to_json())
        }
        #[cfg(not(feature = "serde_support"))]
        {
            json_util::write_array(f, self)
        }
    }
}

impl<K: Into<Key>> Index<K> for OrderedArray {
    type Output = Data;

    fn index(&self, key: K) -> &Data {
        let key = key.into();
        match self.entries.get(&key) {
            Some(v) => v,
            None => panic!("OrderedArray index failed: key '{}' not found", key),
        }
    }
}

impl From<Entries> for OrderedArray {
    fn from(entries: Entries) -> OrderedArray {
        let mut arr = OrderedArray {
            entries,
            next_index: 0,
        };
        arr.reindex();
        arr
    }
}

impl<T: Into<Data>> From<alloc::vec::Vec<T>> for OrderedArray {
    fn from(values: alloc::vec::Vec<T>) -> OrderedArray {
        OrderedArray::from_values(values)
    }
}

impl<K: Into<Key>, V: Into<Data>> FromIterator<(K, V)> for OrderedArray {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> OrderedArray {
        OrderedArray::from_entries(iter)
    }
}

impl<K: Into<Key>, V: Into<Data>> Extend<(K, V)> for OrderedArray {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a OrderedArray {
    type Item = (&'a Key, &'a Data);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.entries.iter()
    }
}

impl IntoIterator for OrderedArray {
    type Item = (Key, Data);
    type IntoIter = indexmap::map::IntoIter<Key, Data>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
