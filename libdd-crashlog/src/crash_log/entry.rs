// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Decoding of a single record line.
//!
//! None of the functions here fail: a line that does not carry the expected
//! prefix yields `None`, and so does a value that does not decode. Callers
//! turn that into an absent field.

use crate::shared::constants::{FIELD_SEPARATOR, KEY_VALUE_SEPARATOR};
use base64::Engine;
use std::collections::HashMap;
use uuid::Uuid;

/// The `key: value` pairs of one record line.
pub type Entry = HashMap<String, String>;

/// Decodes the body of `line` if, and only if, it starts with `prefix`.
///
/// The body is split on `", "` into fields, and each field on `": "` into a
/// key and a value. Fields that do not split into exactly two pieces are
/// dropped. A value that itself contains one of the separators is therefore
/// mangled; the format has no escaping.
pub fn entry_map(line: &str, prefix: &str) -> Option<Entry> {
    let body = line.strip_prefix(prefix)?;
    let mut entry = Entry::new();
    for field in body.split(FIELD_SEPARATOR) {
        let mut pieces = field.split(KEY_VALUE_SEPARATOR);
        if let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next()) {
            entry.insert(key.to_string(), value.to_string());
        }
    }
    Some(entry)
}

/// Decodes a radix-prefixed hexadecimal number such as `0x7fff345ab000`.
///
/// The first two characters are the radix marker and are skipped without
/// being inspected, so at least three characters are required. Every
/// remaining character must be a hex digit.
pub fn decode_hex(value: &str) -> Option<u64> {
    let mut chars = value.char_indices();
    chars.next()?;
    chars.next()?;
    let (digits_start, _) = chars.next()?;
    let digits = &value[digits_start..];
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Decodes standard, padded base64 holding UTF-8 text.
pub fn decode_base64_text(value: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(value)
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Rebuilds a uuid from its 32 hex digits written without separators,
/// e.g. `a64d10a6fe1739ce93926615be54e10e`.
///
/// The digits are grouped 8-4-4-4-12 and uppercased before parsing, which
/// yields `A64D10A6-FE17-39CE-9392-6615BE54E10E`.
pub fn decode_plain_uuid(value: &str) -> Option<Uuid> {
    if value.chars().count() != 32 || !value.is_ascii() {
        return None;
    }
    let grouped = format!(
        "{}-{}-{}-{}-{}",
        &value[..8],
        &value[8..12],
        &value[12..16],
        &value[16..20],
        &value[20..]
    );
    Uuid::parse_str(&grouped.to_uppercase()).ok()
}
