use pretty_assertions::assert_eq;

use crate::ary;
use crate::data::*;
use crate::key::Key;

fn s(v: &str) -> Data {
  Data::DString(v.to_string())
}

#[test]
fn test_type_checks() {
  assert!(Data::DInt(1).is_int() && Data::DInt(1).is_number());
  assert!(Data::DFloat(1.0).is_float() && Data::DFloat(1.0).is_number());
  assert!(s("x").is_string());
  assert!(Data::DBoolean(true).is_boolean());
  assert!(Data::DArray(ary![]).is_array());
  assert!(Data::DNull.is_null());
  assert_eq!(Data::default(), Data::DNull);
  assert_eq!(Data::DArray(ary![1]).type_name(), "array");
  assert_eq!(s("x").string(), "x");
  assert_eq!(Data::from(ary![1, 2]).array().len(), 2);
}

#[test]
#[should_panic]
fn test_wrong_accessor_panics() {
  s("not a number").int();
}

#[test]
fn test_as_string() {
  assert_eq!(Data::DInt(-42).as_string(), "-42");
  assert_eq!(Data::DFloat(1.0).as_string(), "1");
  assert_eq!(Data::DFloat(0.1).as_string(), "0.1");
  assert_eq!(Data::DFloat(1e25).as_string(), "1.0E+25");
  assert_eq!(Data::DFloat(1.5e-7).as_string(), "1.5E-7");
  assert_eq!(Data::DFloat(f64::NAN).as_string(), "NAN");
  assert_eq!(Data::DFloat(f64::NEG_INFINITY).as_string(), "-INF");
  assert_eq!(Data::DBoolean(true).as_string(), "1");
  assert_eq!(Data::DBoolean(false).as_string(), "");
  assert_eq!(Data::DNull.as_string(), "");
  assert_eq!(s("text").as_string(), "text");
}

#[test]
fn test_as_string_rounds_to_fourteen_digits() {
  assert_eq!(Data::DFloat(0.1 + 0.2).as_string(), "0.3");
  assert_eq!(Data::DFloat(1.0 / 3.0).as_string(), "0.33333333333333");
  assert_eq!(Data::DFloat(1e14).as_string(), "1.0E+14");
  assert_eq!(Data::DFloat(12345678901234.0).as_string(), "12345678901234");
  assert_eq!(Data::DFloat(-2.5e20).as_string(), "-2.5E+20");
  assert_eq!(Data::DFloat(-0.0).as_string(), "-0");
  assert_eq!(Data::DFloat(-1.5).as_string(), "-1.5");
  assert_eq!(Data::DFloat(100.0).as_string(), "100");
  assert_eq!(Data::DFloat(0.0001).as_string(), "0.0001");
  assert_eq!(Data::DFloat(0.00001).as_string(), "1.0E-5");
}

#[test]
fn test_truthiness() {
  for falsy in [Data::DNull, Data::DBoolean(false), Data::DInt(0), Data::DFloat(0.0), Data::DFloat(-0.0), s(""), Data::DArray(ary![])] {
    assert!(!falsy.is_truthy(), "{:?} should be falsy", falsy);
  }
  for truthy in [Data::DBoolean(true), Data::DInt(-1), Data::DFloat(0.5), Data::DFloat(f64::NAN), s("0"), s(" "), Data::DArray(ary![Data::DNull])] {
    assert!(truthy.is_truthy(), "{:?} should be truthy", truthy);
  }
}

#[test]
fn test_strict_equality() {
  assert!(Data::DInt(1).strict_equals(&Data::DInt(1)));
  assert!(!Data::DInt(1).strict_equals(&Data::DFloat(1.0)));
  assert!(!Data::DInt(1).strict_equals(&s("1")));
  assert!(!Data::DNull.strict_equals(&Data::DBoolean(false)));
  assert!(Data::from(ary![1, 2]).strict_equals(&Data::from(ary![1, 2])));
  // same pairs, different order
  assert!(!Data::from(ary![1 => "b", 0 => "a"]).strict_equals(&Data::from(ary!["a", "b"])));
}

#[test]
fn test_loose_equality_null_and_bool() {
  assert!(Data::DNull.loose_equals(&Data::DNull));
  assert!(Data::DNull.loose_equals(&Data::DBoolean(false)));
  assert!(Data::DNull.loose_equals(&Data::DInt(0)));
  assert!(Data::DNull.loose_equals(&s("")));
  assert!(!Data::DNull.loose_equals(&s("0")));
  assert!(Data::DNull.loose_equals(&Data::DArray(ary![])));
  assert!(Data::DBoolean(false).loose_equals(&s("0")));
  assert!(Data::DBoolean(true).loose_equals(&s("abc")));
  assert!(Data::DBoolean(true).loose_equals(&Data::DInt(-3)));
  assert!(!Data::DBoolean(true).loose_equals(&Data::DArray(ary![])));
}

#[test]
fn test_loose_equality_numbers_and_strings() {
  assert!(Data::DInt(1).loose_equals(&Data::DFloat(1.0)));
  assert!(Data::DInt(1).loose_equals(&s("1")));
  assert!(Data::DInt(1).loose_equals(&s(" 1")));
  assert!(Data::DInt(100).loose_equals(&s("1e2")));
  assert!(Data::DFloat(1.5).loose_equals(&s("1.50")));
  assert!(!Data::DInt(1).loose_equals(&s("1abc")));
  assert!(!Data::DInt(0).loose_equals(&s("a")));
  assert!(s("1").loose_equals(&s("01")));
  assert!(s("10").loose_equals(&s("1e1")));
  assert!(!s("abc").loose_equals(&s("ABC")));
  assert!(!s("inf").loose_equals(&Data::DFloat(f64::INFINITY)));
  assert!(!Data::DInt(1).loose_equals(&Data::DArray(ary![1])));
}

#[test]
fn test_loose_equality_arrays() {
  let a = Data::from(ary!["x" => 1, "y" => "2"]);
  let b = Data::from(ary!["y" => 2, "x" => "1"]);
  assert!(a.loose_equals(&b));
  assert!(!a.strict_equals(&b));
  assert!(!a.loose_equals(&Data::from(ary!["x" => 1])));
}

#[test]
fn test_conversions() {
  assert_eq!(Data::from(5i64), Data::DInt(5));
  assert_eq!(Data::from(5usize), Data::DInt(5));
  assert_eq!(Data::from(2.5), Data::DFloat(2.5));
  assert_eq!(Data::from(String::from("x")), s("x"));
  assert_eq!(Data::from(vec![1, 2]), Data::DArray(ary![1, 2]));
  assert_eq!(Data::from(Key::Int(3)), Data::DInt(3));
  assert_eq!(Data::from(Key::from("k")), s("k"));
}

#[test]
fn test_key_parse() {
  assert_eq!(Key::parse("0"), Key::Int(0));
  assert_eq!(Key::parse("42"), Key::Int(42));
  assert_eq!(Key::parse("-7"), Key::Int(-7));
  assert_eq!(Key::parse("-0"), Key::from("-0"));
  assert_eq!(Key::parse("07"), Key::from("07"));
  assert_eq!(Key::parse("+7"), Key::from("+7"));
  assert_eq!(Key::parse("1.5"), Key::from("1.5"));
  assert_eq!(Key::parse(""), Key::from(""));
  assert_eq!(Key::parse("99999999999999999999"), Key::from("99999999999999999999"));
  assert_eq!(Key::Int(3).to_string(), "3");
  assert_eq!(Key::from("k").as_str(), Some("k"));
  assert!(Key::from("k").is_str() && Key::Int(1).is_int());
}
