// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::consts::{EVENTS_STORAGE_ITEM, SYSTEM_PALLET};
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use scale_info::PortableRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to decode metadata")]
    DecodeFailed(#[source] parity_scale_codec::Error),

    #[error("Unsupported metadata version {0}, only V14 and V15 are supported")]
    UnsupportedVersion(u32),

    #[error("Pallet 'System' has no 'Events' storage entry")]
    EventsEntryNotFound,

    #[error("'System.Events' is not a plain storage value")]
    EventsEntryNotPlain,
}

/// The part of the runtime metadata needed to decode `System.Events`
#[derive(Debug)]
pub struct EventsMetadata {
    pub registry: PortableRegistry,
    pub events_type_id: u32,
}

impl EventsMetadata {
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, MetadataError> {
        use parity_scale_codec::Decode;

        let prefixed =
            RuntimeMetadataPrefixed::decode(&mut bytes).map_err(MetadataError::DecodeFailed)?;
        Self::from_metadata(prefixed)
    }

    pub fn from_metadata(metadata: RuntimeMetadataPrefixed) -> Result<Self, MetadataError> {
        use frame_metadata::v14::StorageEntryType;

        let version = metadata.1.version();

        let (registry, entry_type) = match metadata.1 {
            RuntimeMetadata::V14(m) => {
                let entry_type = m
                    .pallets
                    .into_iter()
                    .find(|p| p.name == SYSTEM_PALLET)
                    .and_then(|p| p.storage)
                    .and_then(|s| s.entries.into_iter().find(|e| e.name == EVENTS_STORAGE_ITEM))
                    .map(|e| e.ty)
                    .ok_or(MetadataError::EventsEntryNotFound)?;
                (m.types, entry_type)
            }
            RuntimeMetadata::V15(m) => {
                let entry_type = m
                    .pallets
                    .into_iter()
                    .find(|p| p.name == SYSTEM_PALLET)
                    .and_then(|p| p.storage)
                    .and_then(|s| s.entries.into_iter().find(|e| e.name == EVENTS_STORAGE_ITEM))
                    .map(|e| e.ty)
                    .ok_or(MetadataError::EventsEntryNotFound)?;
                (m.types, entry_type)
            }
            _ => return Err(MetadataError::UnsupportedVersion(version)),
        };

        let StorageEntryType::Plain(ty) = entry_type else {
            return Err(MetadataError::EventsEntryNotPlain);
        };

        Ok(Self {
            registry,
            events_type_id: ty.id,
        })
    }
}

/// Decoding metadata per runtime spec version.
///
/// Blocks produced by the same runtime share one entry, so metadata is only
/// fetched again after a runtime upgrade.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<u32, Arc<EventsMetadata>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, spec_version: u32) -> Option<Arc<EventsMetadata>> {
        self.entries.read().await.get(&spec_version).cloned()
    }

    /// Store metadata for `spec_version`, keeping an entry inserted
    /// concurrently by another lookup if there is one.
    pub async fn insert(&self, spec_version: u32, metadata: EventsMetadata) -> Arc<EventsMetadata> {
        self.entries
            .write()
            .await
            .entry(spec_version)
            .or_insert_with(|| Arc::new(metadata))
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
