extern crate alloc;

use crate::data::*;
use crate::key::Key;
use crate::orderedarray::*;

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

#[cfg(not(feature = "no_std_support"))]
use std::println;


// --- Error Type ---

/// Error type for JSON parsing failures.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
  /// Unexpected end of input data.
  UnexpectedEof,
  /// Unexpected character encountered.
  UnexpectedCharacter(char),
  /// Expected a specific character, but found something else.
  ExpectedCharacter(char),
  /// Expected a JSON value (string, number, bool, null, object, array).
  ExpectedValue,
  /// Expected a comma separator in an array or object.
  ExpectedComma,
  /// Invalid JSON string escape sequence.
  InvalidEscapeSequence(String),
  /// Invalid Unicode escape sequence (\uXXXX).
  InvalidUnicodeEscape(String),
  /// Invalid number format.
  InvalidNumber(String),
  /// Trailing characters found after the main JSON value.
  TrailingCharacters(String),
  /// The top-level value is a scalar instead of an array or object.
  NotAContainer,
  /// General parsing failure with a message.
  Message(String),
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
      ParseError::UnexpectedCharacter(c) => write!(f, "Unexpected character: '{}'", c),
      ParseError::ExpectedCharacter(c) => write!(f, "Expected character: '{}'", c),
      ParseError::ExpectedValue => write!(f, "Expected JSON value"),
      ParseError::ExpectedComma => write!(f, "Expected comma separator"),
      ParseError::InvalidEscapeSequence(s) => write!(f, "Invalid escape sequence: {}", s),
      ParseError::InvalidUnicodeEscape(s) => write!(f, "Invalid Unicode escape sequence: {}", s),
      ParseError::InvalidNumber(s) => write!(f, "Invalid number format: {}", s),
      ParseError::TrailingCharacters(s) => write!(f, "Trailing characters after JSON value: {}", s),
      ParseError::NotAContainer => write!(f, "Expected a JSON array or object at top level"),
      ParseError::Message(msg) => write!(f, "JSON parsing error: {}", msg),
    }
  }
}

#[cfg(not(feature="no_std_support"))]
impl std::error::Error for ParseError {}


// --- Serialization ---

/// Create a JSON string from an OrderedArray.
///
/// A list (keys `0..n-1` in order) is written as a JSON array, anything else
/// as a JSON object whose keys are the stringified array keys.
pub fn array_to_string(a: &OrderedArray) -> String {
  let mut s = String::new();
  // fmt::Write on a String cannot fail
  let _ = write_array(&mut s, a);
  s
}

pub(crate) fn write_array<W: fmt::Write>(writer: &mut W, a: &OrderedArray) -> fmt::Result {
  if a.is_list() {
    writer.write_char('[')?;
    let mut first = true;
    for (_, p) in a {
      if !first {
        writer.write_char(',')?;
      }
      first = false;
      write_data(writer, p)?;
    }
    writer.write_char(']')
  } else {
    writer.write_char('{')?;
    let mut first = true;
    for (key, p) in a {
      if !first {
        writer.write_char(',')?;
      }
      first = false;
      writer.write_char('"')?;
      match key {
        Key::Int(i) => write!(writer, "{}", i)?,
        Key::Str(s) => write_escaped_str(writer, s)?,
      }
      writer.write_char('"')?;
      writer.write_char(':')?;
      write_data(writer, p)?;
    }
    writer.write_char('}')
  }
}

// Recursive helper to write any Data variant
fn write_data<W: fmt::Write>(writer: &mut W, data: &Data) -> fmt::Result {
  match data {
    Data::DNull => writer.write_str("null"),
    Data::DBoolean(b) => writer.write_str(if *b { "true" } else { "false" }),
    Data::DInt(i) => write!(writer, "{}", i),
    Data::DFloat(f) if !f.is_finite() => {
      #[cfg(not(feature = "no_std_support"))]
      println!("Warning: non-finite float {} written to JSON as null", f);
      writer.write_str("null")
    }
    // Keep a fraction so the value reads back as a float
    Data::DFloat(f) if (-1e15..1e15).contains(f) && (*f as i64) as f64 == *f => write!(writer, "{:.1}", f),
    Data::DFloat(f) if !(-1e15..1e15).contains(f) => write!(writer, "{:e}", f),
    Data::DFloat(f) => write!(writer, "{}", f),
    Data::DString(s) => {
      writer.write_char('"')?;
      write_escaped_str(writer, s)?;
      writer.write_char('"')
    }
    Data::DArray(a) => write_array(writer, a),
  }
}

// Helper to write JSON escaped string efficiently
fn write_escaped_str<W: fmt::Write>(writer: &mut W, s: &str) -> fmt::Result {
  for c in s.chars() {
    match c {
      '"'  => writer.write_str("\\\"")?,
      '\\' => writer.write_str("\\\\")?,
      '/'  => writer.write_str("\\/")?,
      '\x08' => writer.write_str("\\b")?,
      '\x0c' => writer.write_str("\\f")?,
      '\n' => writer.write_str("\\n")?,
      '\r' => writer.write_str("\\r")?,
      '\t' => writer.write_str("\\t")?,
      '\x00'..='\x1f' => write!(writer, "\\u{:04x}", c as u32)?,
      _ => writer.write_char(c)?,
    }
  }
  Ok(())
}


// --- Deserialization ---

/// Create a new OrderedArray from a JSON array or object. Returns `ParseError` on failure.
///
/// Array elements are keyed `0..n-1`. Object keys that are canonical integers
/// (`"7"`, not `"07"`) become integer keys.
pub fn array_from_string(s: &str) -> Result<OrderedArray, ParseError> {
  let mut input = s.trim();
  if input.is_empty() {
    return Err(ParseError::UnexpectedEof);
  }
  let value = parse_value(&mut input)?;
  if !input.trim().is_empty() {
    return Err(ParseError::TrailingCharacters(input.trim().to_string()));
  }
  match value {
    Data::DArray(a) => Ok(a),
    _ => Err(ParseError::NotAContainer),
  }
}

// --- Unescape Function ---

/// Helper function to parse 4 hex digits from a character iterator.
fn parse_hex4<I>(chars: &mut I) -> Result<u32, ParseError>
where
I: Iterator<Item = char>,
{
  let mut hex_str = String::with_capacity(4);
  for _ in 0..4 {
    match chars.next() {
      Some(hc) if hc.is_ascii_hexdigit() => hex_str.push(hc),
      Some(bad_char) => {
        return Err(ParseError::InvalidUnicodeEscape(format!(
          "\\u{}<-- invalid char '{}'", hex_str, bad_char
        )));
      }
      None => {
        return Err(ParseError::InvalidUnicodeEscape(format!(
          "\\u{} (unexpected EOF)", hex_str
        )));
      }
    }
  }
  u32::from_str_radix(&hex_str, 16)
  .map_err(|_| ParseError::InvalidUnicodeEscape(format!("\\u{} (internal parsing failed)", hex_str)))
}

/// Unescapes the *content* of a JSON string (without the surrounding quotes).
/// Handles the standard escapes and UTF-16 surrogate pairs.
///
/// Stops at the first unescaped `"` and returns the number of bytes consumed,
/// including that quote when present.
fn unescape_until_quote(s: &str) -> Result<(String, usize, bool), ParseError> {
  let mut output = String::with_capacity(s.len());
  let mut chars = s.char_indices();

  while let Some((pos, c)) = chars.next() {
    match c {
      '"' => return Ok((output, pos + 1, true)),
      '\\' => {
        match chars.next().map(|(_, e)| e) {
          Some('"') => output.push('"'),
          Some('\\') => output.push('\\'),
          Some('/') => output.push('/'),
          Some('b') => output.push('\x08'),
          Some('f') => output.push('\x0c'),
          Some('n') => output.push('\n'),
          Some('r') => output.push('\r'),
          Some('t') => output.push('\t'),
          Some('u') => {
            let mut hex = chars.by_ref().map(|(_, h)| h);
            let code1 = parse_hex4(&mut hex)?;
            let code = if (0xD800..=0xDBFF).contains(&code1) {
              // A high surrogate must be followed by \u and a low surrogate
              let backslash = chars.next().map(|(_, x)| x);
              let u = chars.next().map(|(_, x)| x);
              if backslash != Some('\\') || u != Some('u') {
                return Err(ParseError::InvalidUnicodeEscape(format!(
                  "Lone high surrogate \\u{:04X}", code1
                )));
              }
              let mut hex = chars.by_ref().map(|(_, h)| h);
              let code2 = parse_hex4(&mut hex)?;
              if !(0xDC00..=0xDFFF).contains(&code2) {
                return Err(ParseError::InvalidUnicodeEscape(format!(
                  "\\u{:04X} followed by non-low surrogate \\u{:04X}", code1, code2
                )));
              }
              (((code1 - 0xD800) * 0x400) + (code2 - 0xDC00)) + 0x10000
            } else {
              code1
            };
            match core::char::from_u32(code) {
              Some(unicode_char) => output.push(unicode_char),
              None => return Err(ParseError::InvalidUnicodeEscape(format!(
                "\\u{:04X} (invalid code point)", code
              ))),
            }
          }
          Some(other) => return Err(ParseError::InvalidEscapeSequence(format!("\\{}", other))),
          None => return Err(ParseError::UnexpectedEof),
        }
      }
      '\x00'..='\x1f' => return Err(ParseError::UnexpectedCharacter(c)),
      _ => output.push(c),
    }
  }

  Ok((output, s.len(), false))
}

/// Unescapes a string slice that represents the *content* of a JSON string
/// (without the surrounding quotes). Handles standard JSON escapes like \n, \t, \\, \", \uXXXX etc.
///
/// Returns an error if an invalid escape sequence or an unescaped quote is found.
pub fn unescape(s: &str) -> Result<String, ParseError> {
  let (output, _, hit_quote) = unescape_until_quote(s)?;
  if hit_quote {
    return Err(ParseError::UnexpectedCharacter('"'));
  }
  Ok(output)
}


// --- Parsing Helper Functions ---

// Consume whitespace from the beginning of the slice.
fn skip_whitespace(input: &mut &str) {
  *input = input.trim_start();
}

// Consume the next character if it matches `expected`.
fn consume_char(input: &mut &str, expected: char) -> Result<(), ParseError> {
  if input.starts_with(expected) {
    *input = &input[expected.len_utf8()..];
    Ok(())
  } else {
    match input.chars().next() {
      Some(c) => Err(ParseError::UnexpectedCharacter(c)),
      None => Err(ParseError::UnexpectedEof),
    }
  }
}

// Input slice should start *after* the opening quote; consumes the closing quote.
fn parse_string_content(input: &mut &str) -> Result<String, ParseError> {
  let (output, consumed, closed) = unescape_until_quote(input)?;
  if !closed {
    return Err(ParseError::UnexpectedEof);
  }
  *input = &input[consumed..];
  Ok(output)
}

// Parse a JSON number (integer or float)
fn parse_number(input: &mut &str) -> Result<Data, ParseError> {
  let mut len = 0;
  let mut is_float = false;
  let bytes = input.as_bytes();

  if bytes.first() == Some(&b'-') {
    len += 1;
  }
  // integer part: a single 0, or a nonzero digit followed by digits
  let int_digits = count_digits(&bytes[len..]);
  if int_digits == 0 || (int_digits > 1 && bytes[len] == b'0') {
    return Err(ParseError::InvalidNumber(input[..len + int_digits].to_string()));
  }
  len += int_digits;

  while len < bytes.len() {
    match bytes[len] {
      b'0'..=b'9' => len += 1,
      b'.' | b'e' | b'E' => {
        is_float = true;
        len += 1;
        if matches!(bytes[len - 1], b'e' | b'E') && matches!(bytes.get(len), Some(b'+') | Some(b'-')) {
          len += 1;
        }
      }
      _ => break,
    }
  }

  let num_str = &input[..len];
  *input = &input[len..];

  if !is_float {
    if let Ok(i) = num_str.parse::<i64>() {
      return Ok(Data::DInt(i));
    }
    // too large for i64, fall through to f64
  }

  match num_str.parse::<f64>() {
    Ok(f) => Ok(Data::DFloat(f)),
    Err(_) => Err(ParseError::InvalidNumber(num_str.to_string())),
  }
}

fn count_digits(bytes: &[u8]) -> usize {
  bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// Parse a JSON value (string, number, boolean, null, object, array)
fn parse_value(input: &mut &str) -> Result<Data, ParseError> {
  skip_whitespace(input);

  let first_char = match input.chars().next() {
    Some(c) => c,
    None => return Err(ParseError::UnexpectedEof),
  };

  match first_char {
    '"' => {
      consume_char(input, '"')?;
      Ok(Data::DString(parse_string_content(input)?))
    }
    '{' => Ok(Data::DArray(parse_object(input)?)),
    '[' => Ok(Data::DArray(parse_array(input)?)),
    't' => parse_literal(input, "true", Data::DBoolean(true)),
    'f' => parse_literal(input, "false", Data::DBoolean(false)),
    'n' => parse_literal(input, "null", Data::DNull),
    '-' | '0'..='9' => parse_number(input),
    _ => Err(ParseError::UnexpectedCharacter(first_char)),
  }
}

fn parse_literal(input: &mut &str, word: &str, value: Data) -> Result<Data, ParseError> {
  if input.starts_with(word) {
    *input = &input[word.len()..];
    Ok(value)
  } else {
    Err(ParseError::ExpectedValue)
  }
}

// Parse a JSON object: { "key": value, ... }
fn parse_object(input: &mut &str) -> Result<OrderedArray, ParseError> {
  consume_char(input, '{')?;
  skip_whitespace(input);

  let mut obj = OrderedArray::new();
  if input.starts_with('}') {
    consume_char(input, '}')?;
    return Ok(obj);
  }

  loop {
    skip_whitespace(input);
    if input.starts_with('}') {
      // trailing comma
      return Err(ParseError::ExpectedCharacter('"'));
    }
    consume_char(input, '"')?;
    let key = parse_string_content(input)?;

    skip_whitespace(input);
    consume_char(input, ':')?;

    let val = parse_value(input)?;
    obj.set(Key::parse(&key), val);

    skip_whitespace(input);
    if input.starts_with('}') {
      consume_char(input, '}')?;
      return Ok(obj);
    }
    if input.is_empty() {
      return Err(ParseError::UnexpectedEof);
    }
    if !input.starts_with(',') {
      return Err(ParseError::ExpectedComma);
    }
    consume_char(input, ',')?;
  }
}

// Parse a JSON array: [ value, ... ]
fn parse_array(input: &mut &str) -> Result<OrderedArray, ParseError> {
  consume_char(input, '[')?;
  skip_whitespace(input);

  let mut arr = OrderedArray::new();
  if input.starts_with(']') {
    consume_char(input, ']')?;
    return Ok(arr);
  }

  loop {
    skip_whitespace(input);
    if input.starts_with(']') {
      // trailing comma
      return Err(ParseError::ExpectedValue);
    }
    let val = parse_value(input)?;
    arr.push_property(val);

    skip_whitespace(input);
    if input.starts_with(']') {
      consume_char(input, ']')?;
      return Ok(arr);
    }
    if input.is_empty() {
      return Err(ParseError::UnexpectedEof);
    }
    if !input.starts_with(',') {
      return Err(ParseError::ExpectedComma);
    }
    consume_char(input, ',')?;
  }
}
