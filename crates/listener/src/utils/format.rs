// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting utilities for hex encoding and decoding.

use std::num::ParseIntError;

/// Format bytes as hex string with "0x" prefix
pub fn hex_with_prefix(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode a hex string, with or without the "0x" prefix
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex_str.strip_prefix("0x").unwrap_or(hex_str))
}

/// Parse a hex-encoded number as returned in header JSON (e.g. "0x1a2b")
pub fn parse_hex_number(hex_str: &str) -> Result<u64, ParseIntError> {
    u64::from_str_radix(hex_str.trim_start_matches("0x"), 16)
}
