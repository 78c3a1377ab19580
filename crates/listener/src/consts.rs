// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

/// Type tag given to `Vec<u8>` fields. Their bytes are printed as UTF-8 text.
pub const BYTES_TYPE_TAG: &str = "Bytes";

/// Pallet and storage item holding the events of a block
pub const SYSTEM_PALLET: &str = "System";
pub const EVENTS_STORAGE_ITEM: &str = "Events";

/// Line printed after every matching event
pub const EVENT_SEPARATOR: &str = "***************************************";
