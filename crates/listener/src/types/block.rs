// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::utils::parse_hex_number;
use serde::{Deserialize, Deserializer};
use std::fmt;

pub type BlockNumber = u64;

/// Block hash as hex string (with 0x prefix), as returned by the node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockHash(String);

impl BlockHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

/// Inclusive range of blocks to scan.
///
/// Construction does not check the bounds; the range scanner validates them
/// against the best block before fetching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from: BlockNumber,
    pub to: BlockNumber,
}

impl BlockRange {
    pub const fn new(from: BlockNumber, to: BlockNumber) -> Self {
        Self { from, to }
    }

    /// Number of blocks in the range, 0 when `from > to`
    pub fn len(&self) -> u64 {
        if self.from > self.to {
            0
        } else {
            self.to - self.from + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The part of a block header the listener cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Header {
    #[serde(deserialize_with = "deserialize_hex_number")]
    pub number: BlockNumber,
}

fn deserialize_hex_number<'de, D>(deserializer: D) -> Result<BlockNumber, D::Error>
where
    D: Deserializer<'de>,
{
    let number_hex = String::deserialize(deserializer)?;
    parse_hex_number(&number_hex).map_err(|e| {
        serde::de::Error::custom(format!("invalid block number '{}': {}", number_hex, e))
    })
}
