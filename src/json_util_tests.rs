use crate::json_util::array_to_string;
use crate::json_util::array_from_string;
use crate::json_util::ParseError;
use crate::json_util::unescape;

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use crate::ary;
  use crate::data::*;
  use crate::orderedarray::OrderedArray;

  // --- Serialization Tests ---

  #[test]
  fn test_list_to_string() {
    let arr = ary!["hello", 42, false, Data::DNull, 2.0, 0.25];
    assert_eq!(array_to_string(&arr), r#"["hello",42,false,null,2.0,0.25]"#);
    assert_eq!(arr.to_string(), array_to_string(&arr));
  }

  #[test]
  fn test_map_to_string() {
    let arr = ary!["a" => 1, "b" => 3, 99 => 4, 5];
    assert_eq!(array_to_string(&arr), r#"{"a":1,"b":3,"99":4,"100":5}"#);

    // integer keys that are not 0..n-1 in order
    let arr = ary![1 => "x", 0 => "y"];
    assert_eq!(array_to_string(&arr), r#"{"1":"x","0":"y"}"#);
  }

  #[test]
  fn test_nested_to_string() {
    let arr = ary!["list" => ary![1, "two"], "map" => ary!["k" => ary![]]];
    assert_eq!(array_to_string(&arr), r#"{"list":[1,"two"],"map":{"k":[]}}"#);
  }

  #[test]
  fn test_escaped_to_string() {
    let arr = ary!["key\"with\\quotes" => "value\nwith\tescapes"];
    assert_eq!(array_to_string(&arr), r#"{"key\"with\\quotes":"value\nwith\tescapes"}"#);
  }

  #[test]
  fn test_non_finite_float_to_null() {
    let arr = ary![f64::NAN, f64::INFINITY];
    assert_eq!(array_to_string(&arr), "[null,null]");
  }

  #[test]
  fn test_empty_to_string() {
    assert_eq!(array_to_string(&OrderedArray::new()), "[]");
  }

  // --- Deserialization Tests ---

  #[test]
  fn test_array_from_string() {
    let arr = array_from_string(r#" [ "hello", 42, -7, 1.5, 2.0, true, null ] "#).unwrap();
    assert_eq!(arr, ary!["hello", 42, -7, 1.5, 2.0, true, Data::DNull]);
  }

  #[test]
  fn test_object_from_string() {
    let arr = array_from_string(r#"{"a":1,"7":"seven","07":"zero seven","n":{"x":[]}}"#).unwrap();
    assert_eq!(arr, ary!["a" => 1, 7 => "seven", "07" => "zero seven", "n" => ary!["x" => ary![]]]);
    assert_eq!(arr.next_index(), 8);
  }

  #[test]
  fn test_duplicate_object_keys_overwrite() {
    let arr = array_from_string(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(arr, ary!["a" => 3, "b" => 2]);
  }

  #[test]
  fn test_round_trip() {
    let arr = ary!["a" => 1, "b" => ary![1.5, "x\u{1F600}"], 10 => Data::DNull, 11 => true];
    assert_eq!(array_from_string(&array_to_string(&arr)).unwrap(), arr);
    assert_eq!(OrderedArray::from_string(&arr.to_string()).unwrap(), arr);
  }

  #[test]
  fn test_large_numbers() {
    let arr = array_from_string("[9223372036854775807, 99999999999999999999, 1e3]").unwrap();
    assert_eq!(arr[0], Data::DInt(i64::MAX));
    assert_eq!(arr[1], Data::DFloat(1e20));
    assert_eq!(arr[2], Data::DFloat(1000.0));
  }

  #[test]
  fn test_unicode_escapes() {
    let arr = array_from_string(r#"["é", "😀", "a\/b"]"#).unwrap();
    assert_eq!(arr, ary!["é", "\u{1F600}", "a/b"]);
  }

  #[test]
  fn test_parse_errors() {
    assert_eq!(array_from_string(""), Err(ParseError::UnexpectedEof));
    assert_eq!(array_from_string("42"), Err(ParseError::NotAContainer));
    assert_eq!(array_from_string(r#""text""#), Err(ParseError::NotAContainer));
    assert_eq!(array_from_string("[1,]"), Err(ParseError::ExpectedValue));
    assert_eq!(array_from_string("[1 2]"), Err(ParseError::ExpectedComma));
    assert_eq!(array_from_string("[1"), Err(ParseError::UnexpectedEof));
    assert_eq!(array_from_string(r#"{"a" 1}"#), Err(ParseError::UnexpectedCharacter('1')));
    assert_eq!(array_from_string(r#"{"a":1,}"#), Err(ParseError::ExpectedCharacter('"')));
    assert_eq!(array_from_string("[1] x"), Err(ParseError::TrailingCharacters("x".to_string())));
    assert_eq!(array_from_string("[tru]"), Err(ParseError::ExpectedValue));
    assert_eq!(array_from_string(r#"["abc"#), Err(ParseError::UnexpectedEof));
    assert_eq!(
      array_from_string(r#"["\x"]"#),
      Err(ParseError::InvalidEscapeSequence("\\x".to_string()))
    );
    assert!(matches!(array_from_string(r#"["\ud83d"]"#), Err(ParseError::InvalidUnicodeEscape(_))));
    assert!(matches!(array_from_string("[-]"), Err(ParseError::InvalidNumber(_))));
  }

  #[test]
  fn test_number_leading_zeros() {
    assert_eq!(array_from_string("[0123]"), Err(ParseError::InvalidNumber("0123".to_string())));
    assert_eq!(array_from_string("[-012]"), Err(ParseError::InvalidNumber("-012".to_string())));
    assert_eq!(array_from_string("[-]"), Err(ParseError::InvalidNumber("-".to_string())));
    assert_eq!(array_from_string("[-.5]"), Err(ParseError::InvalidNumber("-".to_string())));
    assert_eq!(
      array_from_string("[0, -0, 0.5, 10, 0e1]").unwrap(),
      ary![0, 0, 0.5, 10, 0.0]
    );
  }

  // --- Unescape Tests ---

  #[test]
  fn test_unescape() {
    assert_eq!(unescape(r#"line\nbreak \"quoted\" A"#), Ok("line\nbreak \"quoted\" A".to_string()));
    assert_eq!(unescape(r"\q"), Err(ParseError::InvalidEscapeSequence("\\q".to_string())));
    assert_eq!(unescape(r#"bare " quote"#), Err(ParseError::UnexpectedCharacter('"')));
  }

  #[test]
  fn test_parse_error_display() {
    assert_eq!(ParseError::UnexpectedCharacter('x').to_string(), "Unexpected character: 'x'");
    assert_eq!(ParseError::NotAContainer.to_string(), "Expected a JSON array or object at top level");
  }
}
