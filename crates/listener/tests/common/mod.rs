// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory block source recording every call made to it.

#![allow(dead_code)]

use async_trait::async_trait;
use config::HeadKind;
use event_listener::source::{BlockSource, FetchError, HeaderStream};
use event_listener::types::{BlockHash, BlockNumber, EventRecord, Header, RawField};
use futures::StreamExt;
use futures::stream;
use scale_value::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    BestBlockNumber,
    BlockHashOf(BlockNumber),
    EventsAt(BlockHash),
    HeaderStream(HeadKind),
}

pub struct MemorySource {
    best: BlockNumber,
    blocks: HashMap<BlockNumber, Vec<EventRecord>>,
    failing: HashSet<BlockNumber>,
    headers: Vec<BlockNumber>,
    keep_open: bool,
    calls: Mutex<Vec<Call>>,
}

impl MemorySource {
    /// Chain of empty blocks `1..=best`
    pub fn new(best: BlockNumber) -> Self {
        Self {
            best,
            blocks: HashMap::new(),
            failing: HashSet::new(),
            headers: Vec::new(),
            keep_open: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(mut self, number: BlockNumber, events: Vec<EventRecord>) -> Self {
        self.blocks.insert(number, events);
        self
    }

    /// Fetching the events of `number` fails
    pub fn failing_at(mut self, number: BlockNumber) -> Self {
        self.failing.insert(number);
        self
    }

    /// Headers pushed by `header_stream`, in order
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = BlockNumber>) -> Self {
        self.headers = headers.into_iter().collect();
        self
    }

    /// Keep the header stream open after the last header
    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Block numbers passed to `block_hash_of`, in call order
    pub fn hash_lookups(&self) -> Vec<BlockNumber> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::BlockHashOf(number) => Some(number),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn hash_of(number: BlockNumber) -> BlockHash {
    BlockHash::new(format!("0x{:064x}", number))
}

fn number_of(hash: &BlockHash) -> BlockNumber {
    u64::from_str_radix(hash.as_str().trim_start_matches("0x"), 16).unwrap()
}

#[async_trait]
impl BlockSource for MemorySource {
    async fn best_block_number(&self) -> Result<BlockNumber, FetchError> {
        self.record(Call::BestBlockNumber);
        Ok(self.best)
    }

    async fn block_hash_of(&self, number: BlockNumber) -> Result<BlockHash, FetchError> {
        self.record(Call::BlockHashOf(number));
        if number > self.best {
            return Err(FetchError::BlockNotFound(number));
        }
        Ok(hash_of(number))
    }

    async fn events_at(&self, hash: &BlockHash) -> Result<Vec<EventRecord>, FetchError> {
        self.record(Call::EventsAt(hash.clone()));
        let number = number_of(hash);
        if self.failing.contains(&number) {
            return Err(FetchError::BlockNotFound(number));
        }
        Ok(self.blocks.get(&number).cloned().unwrap_or_default())
    }

    async fn header_stream(&self, heads: HeadKind) -> Result<HeaderStream, FetchError> {
        self.record(Call::HeaderStream(heads));
        let headers = stream::iter(
            self.headers
                .clone()
                .into_iter()
                .map(|number| Ok(Header { number })),
        );

        if self.keep_open {
            Ok(headers.chain(stream::pending()).boxed())
        } else {
            Ok(headers.boxed())
        }
    }
}

pub fn event(module: &str, name: &str, fields: Vec<RawField>) -> EventRecord {
    EventRecord {
        module: module.to_string(),
        name: name.to_string(),
        fields,
    }
}

/// `asset.Transfer` carrying the bytes 0x48656c6c6f ("Hello")
pub fn hello_transfer() -> EventRecord {
    event(
        "asset",
        "Transfer",
        vec![RawField::new("Bytes", Value::from_bytes(b"Hello"))],
    )
}
