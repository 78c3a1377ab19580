// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::consts::BYTES_TYPE_TAG;
use crate::types::{RawField, RenderedField};
use crate::utils::{decode_hex, hex_with_prefix};
use scale_value::{Primitive, Value, ValueDef};

/// How the value of a field is turned into text, chosen by its type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecoding {
    /// Bytes that conventionally hold text: hex encode, then read the bytes
    /// behind the hex string as UTF-8. Falls back to the hex string.
    ByteString,
    /// The value's default string form
    Display,
}

impl FieldDecoding {
    pub fn for_type_tag(type_tag: &str) -> Self {
        match type_tag {
            BYTES_TYPE_TAG => Self::ByteString,
            _ => Self::Display,
        }
    }

    pub fn decode(self, value: &Value<()>) -> String {
        match self {
            Self::ByteString => decode_byte_string(value),
            Self::Display => value.to_string(),
        }
    }
}

/// Render one event field for display. Never fails.
pub fn render(field: &RawField) -> RenderedField {
    RenderedField {
        type_tag: field.type_tag.clone(),
        text: FieldDecoding::for_type_tag(&field.type_tag).decode(&field.value),
    }
}

fn decode_byte_string(value: &Value<()>) -> String {
    let Some(bytes) = value_bytes(value) else {
        tracing::debug!("Byte string field does not hold bytes, using default form");
        return value.to_string();
    };

    let hex = hex_with_prefix(&bytes);
    match hex_to_utf8(&hex) {
        Some(text) => text,
        None => {
            tracing::debug!(hex = %hex, "Byte string field is not valid UTF-8");
            hex
        }
    }
}

fn hex_to_utf8(hex: &str) -> Option<String> {
    let bytes = decode_hex(hex).ok()?;
    String::from_utf8(bytes).ok()
}

/// The bytes of a decoded `Vec<u8>`, looking through newtype wrappers.
fn value_bytes(value: &Value<()>) -> Option<Vec<u8>> {
    let ValueDef::Composite(composite) = &value.value else {
        return None;
    };

    let items: Vec<&Value<()>> = composite.values().collect();
    if let [inner] = items.as_slice()
        && matches!(inner.value, ValueDef::Composite(_))
    {
        return value_bytes(inner);
    }

    items
        .iter()
        .map(|item| match &item.value {
            ValueDef::Primitive(Primitive::U128(n)) => u8::try_from(*n).ok(),
            _ => None,
        })
        .collect()
}
