//! Canonical JSON
//!
//! The commitment hash is taken over one exact byte string, so the JSON
//! encoding is fixed here rather than left to serializer defaults:
//!
//! - object keys sorted by code point, recursively
//! - `", "` between items and `": "` between key and value
//! - pure ASCII output: every code point from U+007F upward is written as
//!   a lowercase `\uXXXX` escape (UTF-16 surrogate pairs above U+FFFF)
//!
//! Example: `{"nonce": "00…", "timestamp": "2025-01-15T10:30:00+09:00"}`

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;

/// serde_json formatter emitting spaced separators and ASCII-only strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        // Quotes, backslashes and C0 controls never reach this point; the
        // serializer escapes those itself.
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if (ch as u32) < 0x7f {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize `value` canonically.
///
/// The value is first lowered to a `serde_json::Value` so that struct field
/// order never leaks into the output.
pub fn canonical_json<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    let value = sort_keys(serde_json::to_value(value)?);

    let mut out = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut serializer)?;

    // The formatter only ever writes ASCII.
    Ok(out.into_iter().map(char::from).collect())
}

/// Rebuild objects with their entries in key order, at every depth.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

// =============================================================================
// TESTS
// =============================================================================
