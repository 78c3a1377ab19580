// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! The two run modes, writing their output to any [`Write`].

use crate::events::{
    SubscribeOptions, SubscriptionItem, scan, subscribe, write_event, write_new_head,
};
use crate::source::BlockSource;
use crate::types::{BlockNumber, BlockRange, FilterSpec};
use futures::StreamExt;
use std::future::Future;
use std::io::Write;

/// Print the matching events of blocks `from..=to`. `to` defaults to the
/// current best block.
///
/// Returns the number of events printed.
pub async fn run_range<S, W>(
    source: &S,
    filter: &FilterSpec,
    from: BlockNumber,
    to: Option<BlockNumber>,
    out: &mut W,
) -> anyhow::Result<usize>
where
    S: BlockSource + ?Sized,
    W: Write,
{
    let to = match to {
        Some(to) => to,
        None => source.best_block_number().await?,
    };

    tracing::info!(module = %filter.module, event = ?filter.event_name, from, to, "Scanning blocks");

    let mut events = scan(source, BlockRange::new(from, to), filter).await?;
    let mut printed = 0;
    while let Some(event) = events.next().await {
        write_event(out, &event?)?;
        printed += 1;
    }
    out.flush()?;

    tracing::info!(printed, "Finished scanning blocks");
    Ok(printed)
}

/// Print matching events of new blocks until the header stream ends, a
/// fetch fails (unless skipped), or `shutdown` completes.
pub async fn run_subscribe<S, W, F>(
    source: &S,
    filter: &FilterSpec,
    options: SubscribeOptions,
    shutdown: F,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: BlockSource + ?Sized,
    W: Write,
    F: Future<Output = ()>,
{
    tracing::info!(module = %filter.module, event = ?filter.event_name, heads = ?options.heads, "Subscribing to new blocks");

    let mut subscription = subscribe(source, filter, options).await?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down subscription");
                subscription.cancel();
                break;
            }
            item = subscription.next() => match item {
                Some(Ok(SubscriptionItem::NewHead(number))) => write_new_head(out, number)?,
                Some(Ok(SubscriptionItem::Event(event))) => write_event(out, &event)?,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    tracing::info!("Subscription ended");
                    break;
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}
