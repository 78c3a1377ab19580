// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::block::BlockNumber;
use scale_value::Value;

/// One decoded field of an event, tagged with the name of its type
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    pub type_tag: String,
    pub value: Value<()>,
}

impl RawField {
    pub fn new(type_tag: impl Into<String>, value: Value<()>) -> Self {
        Self {
            type_tag: type_tag.into(),
            value,
        }
    }
}

/// One event emitted in a block
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Emitting module, lower case (e.g. "asset")
    pub module: String,
    /// Event name as declared by the module (e.g. "Transfer")
    pub name: String,
    pub fields: Vec<RawField>,
}

/// Display form of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub type_tag: String,
    pub text: String,
}

/// A matching event ready to be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutput {
    pub block_number: BlockNumber,
    pub module: String,
    pub name: String,
    pub fields: Vec<RenderedField>,
}
