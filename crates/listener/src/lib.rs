// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod app;
pub mod consts;
pub mod events;
pub mod logging;
pub mod source;
pub mod types;
pub mod utils;
