// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Where blocks and their events come from.
//!
//! The event pipeline only talks to a [`BlockSource`]. [`RpcBlockSource`]
//! implements it over a node's JSON-RPC interface; tests drive the pipeline
//! with an in-memory implementation.

pub mod decode;
pub mod metadata;
pub mod rpc;

pub use decode::{DecodeError, decode_events, type_tag};
pub use metadata::{EventsMetadata, MetadataCache, MetadataError};
pub use rpc::{NodeInfo, RpcBlockSource};

use crate::types::{BlockHash, BlockNumber, EventRecord, Header};
use async_trait::async_trait;
use config::HeadKind;
use futures::stream::BoxStream;
use thiserror::Error;

/// Stream of headers pushed by the node
pub type HeaderStream = BoxStream<'static, Result<Header, FetchError>>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to connect to node at {url}")]
    Connect {
        url: String,
        #[source]
        source: subxt_rpcs::Error,
    },

    #[error("RPC call failed")]
    RpcFailed(#[source] subxt_rpcs::Error),

    #[error("Block at height {0} not found")]
    BlockNotFound(BlockNumber),

    #[error("Invalid hex in {what} of block {block}")]
    InvalidHex {
        what: &'static str,
        block: BlockHash,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Runtime version of block {0} has no specVersion")]
    SpecVersionMissing(BlockHash),

    #[error("Unusable metadata at block {block}")]
    Metadata {
        block: BlockHash,
        #[source]
        source: MetadataError,
    },

    #[error("Failed to decode events of block {block}")]
    Decode {
        block: BlockHash,
        #[source]
        source: DecodeError,
    },
}

/// Blocks, their events and new headers, as provided by a node.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Number of the current best block
    async fn best_block_number(&self) -> Result<BlockNumber, FetchError>;

    async fn block_hash_of(&self, number: BlockNumber) -> Result<BlockHash, FetchError>;

    /// Events recorded in the block, in the order they were emitted
    async fn events_at(&self, hash: &BlockHash) -> Result<Vec<EventRecord>, FetchError>;

    /// Subscribe to headers of newly imported (or finalized) blocks
    async fn header_stream(&self, heads: HeadKind) -> Result<HeaderStream, FetchError>;
}
