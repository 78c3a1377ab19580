// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Values passed between the block source and the event pipeline
//!
//! Everything here is built once (from user input or from a fetched block)
//! and only read afterwards.

pub mod block;
pub mod event;
pub mod filter;

pub use block::{BlockHash, BlockNumber, BlockRange, Header};
pub use event::{EventOutput, EventRecord, RawField, RenderedField};
pub use filter::FilterSpec;
