// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Live subscription to new block headers.
//!
//! Headers are received by a spawned task and pushed into a bounded channel.
//! The [`Subscription`] stream drains that channel and fetches the events of
//! up to `max_in_flight` headers at once. Results are yielded in the order
//! the headers were received, whatever order the fetches complete in. A full
//! channel makes the receiver task wait, so a slow consumer holds back the
//! header stream instead of growing a queue without bound.

use super::fetch_matching_events;
use crate::source::{BlockSource, FetchError};
use crate::types::{BlockNumber, EventOutput, FilterSpec, Header};
use config::{FetchErrorPolicy, HeadKind, SubscriptionConfig};
use futures::channel::mpsc;
use futures::stream::{self, BoxStream};
use futures::{SinkExt, Stream, StreamExt, future};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("Failed to subscribe to {heads:?} heads")]
    Subscribe {
        heads: HeadKind,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub heads: HeadKind,
    pub channel_capacity: usize,
    pub max_in_flight: usize,
    pub on_fetch_error: FetchErrorPolicy,
}

impl From<&SubscriptionConfig> for SubscribeOptions {
    fn from(config: &SubscriptionConfig) -> Self {
        Self {
            heads: config.heads,
            channel_capacity: config.channel_capacity,
            max_in_flight: config.max_in_flight,
            on_fetch_error: config.on_fetch_error,
        }
    }
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self::from(&SubscriptionConfig::default())
    }
}

/// Output of the subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionItem {
    /// A header was received; its matching events or fetch error follow
    NewHead(BlockNumber),
    Event(EventOutput),
}

/// Header number (absent when the header stream itself failed) and the
/// matching events of that block
type Unit = (Option<BlockNumber>, Result<Vec<EventOutput>, FetchError>);

/// Unbounded stream of [`SubscriptionItem`]s.
///
/// Dropping the subscription stops the header receiver task.
pub struct Subscription<'a> {
    receiver_task: JoinHandle<()>,
    items: BoxStream<'a, Result<SubscriptionItem, SubscribeError>>,
}

impl Subscription<'_> {
    /// Stop receiving headers. Units already received are still processed,
    /// then the stream ends.
    pub fn cancel(&self) {
        tracing::debug!("Cancelling subscription");
        self.receiver_task.abort();
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        self.receiver_task.abort();
    }
}

impl Stream for Subscription<'_> {
    type Item = Result<SubscriptionItem, SubscribeError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.items.poll_next_unpin(cx)
    }
}

/// Subscribe to new headers and yield the events of each block matching
/// `filter`.
///
/// Must be called within a tokio runtime.
pub async fn subscribe<'a, S>(
    source: &'a S,
    filter: &'a FilterSpec,
    options: SubscribeOptions,
) -> Result<Subscription<'a>, SubscribeError>
where
    S: BlockSource + ?Sized,
{
    let mut headers = source
        .header_stream(options.heads)
        .await
        .map_err(|source| SubscribeError::Subscribe {
            heads: options.heads,
            source,
        })?;

    let (mut sender, receiver) =
        mpsc::channel::<Result<Header, FetchError>>(options.channel_capacity);

    let receiver_task = tokio::spawn(async move {
        while let Some(header) = headers.next().await {
            if sender.send(header).await.is_err() {
                tracing::debug!("Subscription dropped, no longer receiving headers");
                return;
            }
        }
        tracing::info!("Header stream ended");
    });

    let on_fetch_error = options.on_fetch_error;

    let units = receiver
        .map(move |header| async move {
            match header {
                Ok(header) => {
                    tracing::debug!(block = header.number, "Received header");
                    let events = fetch_matching_events(source, header.number, filter).await;
                    (Some(header.number), events)
                }
                Err(e) => (None, Err(e)),
            }
        })
        .buffered(options.max_in_flight.max(1));

    // Every received header is announced, whether its fetch succeeds or not
    let items = units
        .scan(false, move |failed, (number, events): Unit| {
            if *failed {
                return future::ready(None);
            }

            let mut items: Vec<Result<SubscriptionItem, SubscribeError>> = number
                .map(|number| Ok(SubscriptionItem::NewHead(number)))
                .into_iter()
                .collect();

            match events {
                Ok(events) => items.extend(
                    events
                        .into_iter()
                        .map(|event| Ok(SubscriptionItem::Event(event))),
                ),
                Err(e) => match on_fetch_error {
                    FetchErrorPolicy::Abort => {
                        *failed = true;
                        items.push(Err(SubscribeError::Fetch(e)));
                    }
                    FetchErrorPolicy::Skip => {
                        tracing::warn!(
                            block = ?number,
                            error = %e,
                            "Skipping header after failed fetch"
                        );
                    }
                },
            }

            future::ready(Some(stream::iter(items)))
        })
        .flatten()
        .boxed();

    Ok(Subscription {
        receiver_task,
        items,
    })
}
