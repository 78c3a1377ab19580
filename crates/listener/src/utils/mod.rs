// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod format;

pub use format::{decode_hex, hex_with_prefix, parse_hex_number};
