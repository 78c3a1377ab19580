// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::fetch_matching_events;
use crate::source::{BlockSource, FetchError};
use crate::types::{BlockNumber, BlockRange, EventOutput, FilterSpec};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::collections::VecDeque;
use thiserror::Error;

/// Matching events of a block range, in block order then in-block order
pub type EventStream<'a> = BoxStream<'a, Result<EventOutput, FetchError>>;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid block range: 'from' ({from}) is greater than 'to' ({to})")]
    FromAfterTo { from: BlockNumber, to: BlockNumber },

    #[error("Invalid block range: 'to' ({to}) is beyond the best block ({best})")]
    ToBeyondBest { to: BlockNumber, best: BlockNumber },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

struct ScanState {
    next: Option<BlockNumber>,
    pending: VecDeque<EventOutput>,
}

/// Validate `range` and return a stream of the events in it matching `filter`.
///
/// The range is checked before anything is fetched: `from > to` is rejected
/// without touching the source, then `to` is compared with the current best
/// block. Blocks are fetched one at a time, each only once the previous
/// block's events have been yielded. The first fetch error is yielded and
/// ends the stream.
pub async fn scan<'a, S>(
    source: &'a S,
    range: BlockRange,
    filter: &'a FilterSpec,
) -> Result<EventStream<'a>, ScanError>
where
    S: BlockSource + ?Sized,
{
    if range.is_empty() {
        return Err(ScanError::FromAfterTo {
            from: range.from,
            to: range.to,
        });
    }

    let best = source.best_block_number().await?;
    if range.to > best {
        return Err(ScanError::ToBeyondBest { to: range.to, best });
    }

    tracing::debug!(
        from = range.from,
        to = range.to,
        blocks = range.len(),
        best,
        "Scanning block range"
    );

    let state = ScanState {
        next: Some(range.from),
        pending: VecDeque::new(),
    };

    let events = stream::try_unfold(state, move |mut state| async move {
        loop {
            if let Some(output) = state.pending.pop_front() {
                return Ok::<_, FetchError>(Some((output, state)));
            }

            let Some(number) = state.next else {
                tracing::debug!(to = range.to, "Reached end of range");
                return Ok(None);
            };

            state.pending = fetch_matching_events(source, number, filter).await?.into();
            state.next = (number < range.to).then(|| number + 1);
        }
    });

    Ok(events.boxed())
}
