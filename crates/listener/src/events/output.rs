// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented text output on stdout.

use crate::consts::EVENT_SEPARATOR;
use crate::source::NodeInfo;
use crate::types::{BlockNumber, EventOutput};
use std::io::{self, Write};

pub fn write_event<W: Write>(out: &mut W, event: &EventOutput) -> io::Result<()> {
    writeln!(
        out,
        "EventName - {} at block number {}",
        event.name, event.block_number
    )?;
    for field in &event.fields {
        writeln!(out, "{} : {}", field.type_tag, field.text)?;
    }
    writeln!(out, "{}", EVENT_SEPARATOR)
}

pub fn write_new_head<W: Write>(out: &mut W, number: BlockNumber) -> io::Result<()> {
    writeln!(out, "Chain is at block: #{}", number)
}

pub fn write_node_info<W: Write>(out: &mut W, info: &NodeInfo) -> io::Result<()> {
    writeln!(
        out,
        "You are connected to chain {} using {} v{}",
        info.chain, info.name, info.version
    )
}
