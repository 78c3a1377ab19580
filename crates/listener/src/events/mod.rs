// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event pipeline: fetch the events of a block, keep the ones selected by a
//! [`FilterSpec`] and render their fields.
//!
//! [`scan`] walks a closed range of blocks, [`subscribe`] follows new
//! headers. Both share [`fetch_matching_events`].

pub mod filter;
pub mod output;
pub mod render;
pub mod scan;
pub mod subscribe;

pub use filter::matches;
pub use output::{write_event, write_new_head, write_node_info};
pub use render::{FieldDecoding, render};
pub use scan::{EventStream, ScanError, scan};
pub use subscribe::{SubscribeError, SubscribeOptions, Subscription, SubscriptionItem, subscribe};

use crate::source::{BlockSource, FetchError};
use crate::types::{BlockNumber, EventOutput, EventRecord, FilterSpec};

/// Fetch the events of block `number` and render those matching `filter`,
/// in the order they were emitted.
pub async fn fetch_matching_events<S>(
    source: &S,
    number: BlockNumber,
    filter: &FilterSpec,
) -> Result<Vec<EventOutput>, FetchError>
where
    S: BlockSource + ?Sized,
{
    let hash = source.block_hash_of(number).await?;
    let records = source.events_at(&hash).await?;

    tracing::debug!(block = number, hash = %hash, events = records.len(), "Fetched block events");

    Ok(records
        .into_iter()
        .filter(|record| matches(record, filter))
        .map(|record| to_output(number, record))
        .collect())
}

fn to_output(block_number: BlockNumber, record: EventRecord) -> EventOutput {
    EventOutput {
        block_number,
        fields: record.fields.iter().map(render).collect(),
        module: record.module,
        name: record.name,
    }
}
