extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::key::Key;
use crate::orderedarray::*;

#[cfg(feature = "serde_support")]
use serde_json::{json, Value};

/// Represents a value stored in an `OrderedArray`
///
/// Arrays are held by value: cloning a ```Data::DArray``` copies the whole nested array.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
  /// Contains an i64 value
  ///
  /// ```
  /// # use ordarray::Data;
  /// let d = Data::DInt(99);
  /// ```
  DInt(i64),
  /// Contains an f64 value
  ///
  /// ```
  /// # use ordarray::Data;
  /// let d = Data::DFloat(99.99);
  /// ```
  DFloat(f64),
  /// Contains a bool value
  DBoolean(bool),
  /// Contains a String value
  ///
  /// ```
  /// # use ordarray::Data;
  /// let d = Data::DString("hello world".to_owned());
  /// ```
  DString(String),
  /// Contains a nested array
  ///
  /// ```
  /// # use ordarray::{ary, Data};
  /// let d = Data::DArray(ary![1, 2, 3]);
  /// ```
  DArray(OrderedArray),
  /// Contains no value
  DNull,
}

/// A number recognized inside a numeric string.
#[derive(Debug, Clone, Copy)]
enum Number {
  Int(i64),
  Float(f64),
}

impl Number {
  fn as_f64(self) -> f64 {
    match self {
      Number::Int(i) => i as f64,
      Number::Float(f) => f,
    }
  }

  fn equals(self, other: Number) -> bool {
    match (self, other) {
      (Number::Int(a), Number::Int(b)) => a == b,
      (a, b) => a.as_f64() == b.as_f64(),
    }
  }
}

impl Data {
  /// Returns ```true``` if the value is of type ```DInt``` or ```DFloat```.
  pub fn is_number(&self) -> bool {
    self.is_int() || self.is_float()
  }

  /// Returns ```true``` if the value is of type ```DInt```.
  pub fn is_int(&self) -> bool {
    matches!(self, Data::DInt(_))
  }

  /// Returns ```true``` if the value is of type ```DFloat```.
  pub fn is_float(&self) -> bool {
    matches!(self, Data::DFloat(_))
  }

  /// Returns ```true``` if the value is of type ```DString```.
  pub fn is_string(&self) -> bool {
    matches!(self, Data::DString(_))
  }

  /// Returns ```true``` if the value is of type ```DBoolean```.
  pub fn is_boolean(&self) -> bool {
    matches!(self, Data::DBoolean(_))
  }

  /// Returns ```true``` if the value is of type ```DArray```.
  pub fn is_array(&self) -> bool {
    matches!(self, Data::DArray(_))
  }

  /// Returns ```true``` if the value is of type ```DNull```.
  pub fn is_null(&self) -> bool {
    matches!(self, Data::DNull)
  }

  /// Returns the underlying ```i64``` value, or panics if not ```DInt```.
  pub fn int(&self) -> i64 {
    if let Data::DInt(i) = self { *i } else { panic!("Not an int: {:?}", self); }
  }

  /// Returns the underlying ```f64``` value, or panics if not ```DFloat```.
  pub fn float(&self) -> f64 {
    if let Data::DFloat(f) = self { *f } else { panic!("Not a float: {:?}", self); }
  }

  /// Returns the underlying ```bool``` value, or panics if not ```DBoolean```.
  pub fn boolean(&self) -> bool {
    if let Data::DBoolean(b) = self { *b } else { panic!("Not a boolean: {:?}", self); }
  }

  /// Returns the underlying string slice, or panics if not ```DString```.
  pub fn string(&self) -> &str {
    if let Data::DString(s) = self { s } else { panic!("Not a string: {:?}", self); }
  }

  /// Returns the nested array, or panics if not ```DArray```.
  pub fn array(&self) -> &OrderedArray {
    if let Data::DArray(a) = self { a } else { panic!("Not an array: {:?}", self); }
  }

  pub fn as_array(&self) -> Option<&OrderedArray> {
    if let Data::DArray(a) = self { Some(a) } else { None }
  }

  /// Name of the value's type, as reported in errors.
  pub fn type_name(&self) -> &'static str {
    match self {
      Data::DInt(_) => "int",
      Data::DFloat(_) => "float",
      Data::DBoolean(_) => "boolean",
      Data::DString(_) => "string",
      Data::DArray(_) => "array",
      Data::DNull => "null",
    }
  }

  /// Returns the PHP string conversion of a scalar value.
  ///
  /// `true` becomes `"1"`, `false` and null become `""`, floats use PHP's
  /// formatting (`1.0` is `"1"`, `1e25` is `"1.0E+25"`). Arrays have no scalar
  /// form and are rendered as their JSON text instead.
  pub fn as_string(&self) -> String {
    match self {
      Data::DInt(i) => i.to_string(),
      Data::DFloat(f) => format_float(*f),
      Data::DBoolean(true) => "1".to_string(),
      Data::DBoolean(false) | Data::DNull => String::new(),
      Data::DString(s) => s.clone(),
      Data::DArray(a) => a.to_string(),
    }
  }

  /// The truthiness rule used by `OrderedArray::clean`.
  ///
  /// Falsy: `false`, `""`, null, an empty array, `0` and `0.0`. Everything else
  /// is truthy, including negative numbers, `NaN` and the string `"0"`.
  pub fn is_truthy(&self) -> bool {
    match self {
      Data::DNull => false,
      Data::DBoolean(b) => *b,
      Data::DInt(i) => *i != 0,
      Data::DFloat(f) => *f != 0.0,
      Data::DString(s) => !s.is_empty(),
      Data::DArray(a) => !a.is_empty(),
    }
  }

  /// Identity comparison: same type and same value. Arrays must hold the same
  /// pairs in the same order, compared strictly.
  pub fn strict_equals(&self, other: &Data) -> bool {
    self == other
  }

  /// Type-juggling comparison with PHP 8 `==` semantics.
  ///
  /// | left            | right           | rule                                         |
  /// |-----------------|-----------------|----------------------------------------------|
  /// | null            | null            | equal                                        |
  /// | bool            | any             | compare with the other's boolean cast        |
  /// | null            | string          | equal iff the string is empty                |
  /// | null            | any other       | equal iff the other casts to `false`         |
  /// | int / float     | int / float     | numeric comparison                           |
  /// | int / float     | numeric string  | numeric comparison                           |
  /// | int / float     | other string    | number's string form compared to the string  |
  /// | string          | string          | numeric if both are numeric, else bytewise   |
  /// | array           | array           | same keys, values loosely equal, any order   |
  /// | array           | scalar          | never equal                                  |
  ///
  /// The boolean cast is `is_truthy` except that `"0"` casts to `false`.
  /// Numeric strings may have surrounding whitespace, a sign, a fraction and an
  /// exponent; `"inf"` and `"nan"` are not numeric.
  pub fn loose_equals(&self, other: &Data) -> bool {
    match (self, other) {
      (Data::DNull, Data::DNull) => true,
      (Data::DBoolean(b), x) | (x, Data::DBoolean(b)) => *b == x.to_bool(),
      (Data::DNull, Data::DString(s)) | (Data::DString(s), Data::DNull) => s.is_empty(),
      (Data::DNull, x) | (x, Data::DNull) => !x.to_bool(),
      (Data::DString(a), Data::DString(b)) => match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.equals(y),
        _ => a == b,
      },
      (Data::DString(s), n) | (n, Data::DString(s)) => match (n.number(), numeric(s)) {
        (Some(x), Some(y)) => x.equals(y),
        (Some(_), None) => n.as_string() == *s,
        _ => false,
      },
      (Data::DArray(a), Data::DArray(b)) => a.loose_equals(b),
      (a, b) => match (a.number(), b.number()) {
        (Some(x), Some(y)) => x.equals(y),
        _ => false,
      },
    }
  }

  // PHP boolean cast; unlike is_truthy, "0" is false here
  fn to_bool(&self) -> bool {
    match self {
      Data::DString(s) if s == "0" => false,
      other => other.is_truthy(),
    }
  }

  fn number(&self) -> Option<Number> {
    match self {
      Data::DInt(i) => Some(Number::Int(*i)),
      Data::DFloat(f) => Some(Number::Float(*f)),
      _ => None,
    }
  }

  #[cfg(feature = "serde_support")]
  pub fn from_json(value: Value) -> Data {
    match value {
      Value::String(s) => Data::DString(s),
      Value::Bool(b) => Data::DBoolean(b),
      Value::Number(n) => match n.as_i64() {
        Some(i) => Data::DInt(i),
        None => Data::DFloat(n.as_f64().unwrap_or(f64::NAN)),
      },
      Value::Object(map) => Data::DArray(
        map.into_iter().map(|(k, v)| (Key::parse(&k), Data::from_json(v))).collect(),
      ),
      Value::Array(values) => {
        Data::DArray(OrderedArray::from_values(values.into_iter().map(Data::from_json)))
      }
      Value::Null => Data::DNull,
    }
  }

  #[cfg(feature = "serde_support")]
  pub fn to_json(&self) -> Value {
    match self {
      Data::DInt(i) => json!(i),
      Data::DFloat(f) => json!(f),
      Data::DBoolean(b) => json!(b),
      Data::DString(s) => json!(s),
      Data::DArray(a) => a.to_json(),
      Data::DNull => Value::Null,
    }
  }
}

/// The default for ```Data``` is ```DNull```.
impl Default for Data {
  fn default() -> Data {
    Data::DNull
  }
}

/// Significant digits PHP uses when converting a float to a string.
const FLOAT_PRECISION: i32 = 14;

/// Formats a float the way PHP converts it to a string.
///
/// Rounds to 14 significant digits and drops trailing zeros. Exponents below
/// -4 or at least 14 switch to `1.0E+25` notation.
pub(crate) fn format_float(f: f64) -> String {
  if f.is_nan() {
    return "NAN".to_string();
  }
  if f.is_infinite() {
    return if f > 0.0 { "INF".to_string() } else { "-INF".to_string() };
  }
  if f == 0.0 {
    return if f.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
  }

  // d.ddddddddddddde<exp>, already rounded to FLOAT_PRECISION digits
  let sci = format!("{:.*e}", (FLOAT_PRECISION - 1) as usize, f);
  let (mantissa, exp) = match sci.split_once('e') {
    Some(parts) => parts,
    None => return sci,
  };
  let exp: i32 = exp.parse().unwrap_or(0);
  let sign = if f < 0.0 { "-" } else { "" };
  let digits: String = mantissa
    .chars()
    .filter(|c| c.is_ascii_digit())
    .collect::<String>()
    .trim_end_matches('0')
    .to_string();

  if exp < -4 || exp >= FLOAT_PRECISION {
    let (lead, rest) = digits.split_at(1);
    let rest = if rest.is_empty() { "0" } else { rest };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    return format!("{}{}.{}E{}{}", sign, lead, rest, exp_sign, exp.abs());
  }

  let point = exp + 1;
  if point <= 0 {
    format!("{}0.{}{}", sign, "0".repeat((-point) as usize), digits)
  } else if point as usize >= digits.len() {
    format!("{}{}{}", sign, digits, "0".repeat(point as usize - digits.len()))
  } else {
    let (int_part, frac_part) = digits.split_at(point as usize);
    format!("{}{}.{}", sign, int_part, frac_part)
  }
}

/// Recognizes a PHP numeric string.
fn numeric(s: &str) -> Option<Number> {
  let t = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
  let body = t.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(t);
  let bytes = body.as_bytes();

  let mut i = 0;
  let int_digits = count_digits(&bytes[i..]);
  i += int_digits;
  let mut frac_digits = 0;
  let mut is_float = false;
  if bytes.get(i) == Some(&b'.') {
    is_float = true;
    i += 1;
    frac_digits = count_digits(&bytes[i..]);
    i += frac_digits;
  }
  if int_digits + frac_digits == 0 {
    return None;
  }
  if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
    is_float = true;
    i += 1;
    if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
      i += 1;
    }
    let exp_digits = count_digits(&bytes[i..]);
    if exp_digits == 0 {
      return None;
    }
    i += exp_digits;
  }
  if i != bytes.len() {
    return None;
  }

  if !is_float {
    if let Ok(n) = t.parse::<i64>() {
      return Some(Number::Int(n));
    }
  }
  t.parse::<f64>().ok().map(Number::Float)
}

fn count_digits(bytes: &[u8]) -> usize {
  bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// --- Conversions ---

impl From<i64> for Data {
  fn from(i: i64) -> Data { Data::DInt(i) }
}

impl From<i32> for Data {
  fn from(i: i32) -> Data { Data::DInt(i as i64) }
}

impl From<usize> for Data {
  fn from(i: usize) -> Data { Data::DInt(i as i64) }
}

impl From<f64> for Data {
  fn from(f: f64) -> Data { Data::DFloat(f) }
}

impl From<bool> for Data {
  fn from(b: bool) -> Data { Data::DBoolean(b) }
}

impl From<&str> for Data {
  fn from(s: &str) -> Data { Data::DString(s.to_string()) }
}

impl From<String> for Data {
  fn from(s: String) -> Data { Data::DString(s) }
}

impl From<OrderedArray> for Data {
  fn from(a: OrderedArray) -> Data { Data::DArray(a) }
}

impl From<&OrderedArray> for Data {
  fn from(a: &OrderedArray) -> Data { Data::DArray(a.clone()) }
}

impl From<Entries> for Data {
  fn from(entries: Entries) -> Data { Data::DArray(OrderedArray::from(entries)) }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
  fn from(values: Vec<T>) -> Data { Data::DArray(OrderedArray::from_values(values)) }
}

impl From<Key> for Data {
  fn from(k: Key) -> Data {
    match k {
      Key::Int(i) => Data::DInt(i),
      Key::Str(s) => Data::DString(s),
    }
  }
}
