// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::{EventRecord, FilterSpec};

/// Whether `record` is selected by `filter`.
///
/// The module must be equal; the event name too when the filter has one.
/// Both comparisons are exact. Module names are lower case on both sides,
/// event names are compared as given.
pub fn matches(record: &EventRecord, filter: &FilterSpec) -> bool {
    record.module == filter.module
        && filter
            .event_name
            .as_ref()
            .is_none_or(|event_name| &record.name == event_name)
}
