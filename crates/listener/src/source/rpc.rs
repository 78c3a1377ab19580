// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`BlockSource`] backed by a Substrate node's JSON-RPC interface.

use super::decode::decode_events;
use super::metadata::{EventsMetadata, MetadataCache};
use super::{BlockSource, FetchError, HeaderStream};
use crate::consts::{EVENTS_STORAGE_ITEM, SYSTEM_PALLET};
use crate::types::{BlockHash, BlockNumber, EventRecord, Header};
use crate::utils::decode_hex;
use async_trait::async_trait;
use config::{HeadKind, SubstrateConfig};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use subxt_rpcs::RpcClient;
use subxt_rpcs::client::rpc_params;

/// Name, implementation and version of the connected node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub chain: String,
    pub name: String,
    pub version: String,
}

/// Storage key of `System.Events`: `twox128("System") ++ twox128("Events")`
pub fn system_events_key() -> String {
    let pallet = sp_crypto_hashing::twox_128(SYSTEM_PALLET.as_bytes());
    let entry = sp_crypto_hashing::twox_128(EVENTS_STORAGE_ITEM.as_bytes());
    format!("0x{}{}", hex::encode(pallet), hex::encode(entry))
}

pub struct RpcBlockSource {
    rpc_client: RpcClient,
    metadata: MetadataCache,
    events_key: String,
}

impl RpcBlockSource {
    pub fn new(rpc_client: RpcClient) -> Self {
        Self {
            rpc_client,
            metadata: MetadataCache::new(),
            events_key: system_events_key(),
        }
    }

    /// Connect to the node configured in `config`
    pub async fn connect(config: &SubstrateConfig) -> Result<Self, FetchError> {
        let rpc_client = if config.is_insecure() {
            RpcClient::from_insecure_url(&config.url).await
        } else {
            RpcClient::from_url(&config.url).await
        }
        .map_err(|source| FetchError::Connect {
            url: config.url.clone(),
            source,
        })?;

        tracing::info!(url = %config.url, "Connected to node");
        Ok(Self::new(rpc_client))
    }

    pub async fn node_info(&self) -> Result<NodeInfo, FetchError> {
        let (chain_result, name_result, version_result) = tokio::join!(
            self.rpc_client
                .request::<String>("system_chain", rpc_params![]),
            self.rpc_client.request::<String>("system_name", rpc_params![]),
            self.rpc_client
                .request::<String>("system_version", rpc_params![]),
        );

        Ok(NodeInfo {
            chain: chain_result.map_err(FetchError::RpcFailed)?,
            name: name_result.map_err(FetchError::RpcFailed)?,
            version: version_result.map_err(FetchError::RpcFailed)?,
        })
    }

    async fn spec_version_at(&self, hash: &BlockHash) -> Result<u32, FetchError> {
        let runtime_version: Value = self
            .rpc_client
            .request("state_getRuntimeVersion", rpc_params![hash.as_str()])
            .await
            .map_err(FetchError::RpcFailed)?;

        runtime_version
            .get("specVersion")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| FetchError::SpecVersionMissing(hash.clone()))
    }

    /// Metadata of the runtime that produced the block `hash`
    async fn events_metadata_at(
        &self,
        hash: &BlockHash,
    ) -> Result<Arc<EventsMetadata>, FetchError> {
        let spec_version = self.spec_version_at(hash).await?;
        if let Some(metadata) = self.metadata.get(spec_version).await {
            return Ok(metadata);
        }

        tracing::debug!(spec_version, block = %hash, "Fetching runtime metadata");

        let metadata_hex: String = self
            .rpc_client
            .request("state_getMetadata", rpc_params![hash.as_str()])
            .await
            .map_err(FetchError::RpcFailed)?;

        let metadata_bytes = decode_hex(&metadata_hex).map_err(|source| FetchError::InvalidHex {
            what: "metadata",
            block: hash.clone(),
            source,
        })?;

        let metadata =
            EventsMetadata::from_bytes(&metadata_bytes).map_err(|source| FetchError::Metadata {
                block: hash.clone(),
                source,
            })?;

        tracing::info!(spec_version, "Loaded runtime metadata");
        Ok(self.metadata.insert(spec_version, metadata).await)
    }
}

#[async_trait]
impl BlockSource for RpcBlockSource {
    async fn best_block_number(&self) -> Result<BlockNumber, FetchError> {
        let header: Header = self
            .rpc_client
            .request("chain_getHeader", rpc_params![])
            .await
            .map_err(FetchError::RpcFailed)?;
        Ok(header.number)
    }

    async fn block_hash_of(&self, number: BlockNumber) -> Result<BlockHash, FetchError> {
        let hash: Option<String> = self
            .rpc_client
            .request("chain_getBlockHash", rpc_params![number])
            .await
            .map_err(FetchError::RpcFailed)?;

        hash.map(BlockHash::from)
            .ok_or(FetchError::BlockNotFound(number))
    }

    async fn events_at(&self, hash: &BlockHash) -> Result<Vec<EventRecord>, FetchError> {
        let metadata = self.events_metadata_at(hash).await?;

        let storage: Option<String> = self
            .rpc_client
            .request(
                "state_getStorage",
                rpc_params![self.events_key.as_str(), hash.as_str()],
            )
            .await
            .map_err(FetchError::RpcFailed)?;

        // No events were deposited in this block
        let Some(events_hex) = storage else {
            return Ok(Vec::new());
        };

        let bytes = decode_hex(&events_hex).map_err(|source| FetchError::InvalidHex {
            what: "events",
            block: hash.clone(),
            source,
        })?;

        decode_events(&bytes, metadata.events_type_id, &metadata.registry).map_err(|source| {
            FetchError::Decode {
                block: hash.clone(),
                source,
            }
        })
    }

    async fn header_stream(&self, heads: HeadKind) -> Result<HeaderStream, FetchError> {
        let (subscribe, unsubscribe) = match heads {
            HeadKind::Best => ("chain_subscribeNewHeads", "chain_unsubscribeNewHeads"),
            HeadKind::Finalized => (
                "chain_subscribeFinalizedHeads",
                "chain_unsubscribeFinalizedHeads",
            ),
        };

        let subscription = self
            .rpc_client
            .subscribe::<Header>(subscribe, rpc_params![], unsubscribe)
            .await
            .map_err(FetchError::RpcFailed)?;

        tracing::info!(method = subscribe, "Subscribed to block headers");
        Ok(subscription
            .map(|header| header.map_err(FetchError::RpcFailed))
            .boxed())
    }
}
