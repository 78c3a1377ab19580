// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Channel capacity must be greater than 0")]
    ZeroChannelCapacity,

    #[error("Max in-flight blocks must be greater than 0")]
    ZeroMaxInFlight,
}

/// Which headers the node should push to the subscriber
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadKind {
    /// Every new best block (`chain_subscribeNewHeads`)
    #[default]
    Best,
    /// Finalized blocks only (`chain_subscribeFinalizedHeads`)
    Finalized,
}

/// What the subscriber does when fetching the events of one header fails
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorPolicy {
    /// End the subscription with the error
    #[default]
    Abort,
    /// Log the error and carry on with the next header
    Skip,
}

#[derive(Debug, Clone)]
pub struct SubscriptionConfig {
    /// Header kind to subscribe to
    ///
    /// Env: EVL_SUBSCRIPTION_HEADS
    /// Valid values: best, finalized
    /// Default: best
    pub heads: HeadKind,

    /// Number of received headers buffered before the receiver waits
    ///
    /// Env: EVL_SUBSCRIPTION_CHANNEL_CAPACITY
    /// Default: 64
    pub channel_capacity: usize,

    /// Number of headers whose events may be fetched concurrently
    ///
    /// Env: EVL_SUBSCRIPTION_MAX_IN_FLIGHT
    /// Default: 4
    pub max_in_flight: usize,

    /// Env: EVL_SUBSCRIPTION_ON_FETCH_ERROR
    /// Valid values: abort, skip
    /// Default: abort
    pub on_fetch_error: FetchErrorPolicy,
}

pub(crate) fn default_channel_capacity() -> usize {
    64
}

pub(crate) fn default_max_in_flight() -> usize {
    4
}

impl SubscriptionConfig {
    pub fn validate(&self) -> Result<(), SubscriptionError> {
        if self.channel_capacity == 0 {
            return Err(SubscriptionError::ZeroChannelCapacity);
        }
        if self.max_in_flight == 0 {
            return Err(SubscriptionError::ZeroMaxInFlight);
        }
        Ok(())
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            heads: HeadKind::default(),
            channel_capacity: default_channel_capacity(),
            max_in_flight: default_max_in_flight(),
            on_fetch_error: FetchErrorPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subscription_config() {
        let config = SubscriptionConfig::default();
        assert_eq!(config.heads, HeadKind::Best);
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.max_in_flight, 4);
        assert_eq!(config.on_fetch_error, FetchErrorPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = SubscriptionConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SubscriptionError::ZeroChannelCapacity)
        ));
    }

    #[test]
    fn test_validate_zero_in_flight() {
        let config = SubscriptionConfig {
            max_in_flight: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SubscriptionError::ZeroMaxInFlight)
        ));
    }

    #[test]
    fn test_enum_deserialization() {
        let heads: HeadKind = serde_json::from_str(r#""finalized""#).unwrap();
        assert_eq!(heads, HeadKind::Finalized);

        let policy: FetchErrorPolicy = serde_json::from_str(r#""skip""#).unwrap();
        assert_eq!(policy, FetchErrorPolicy::Skip);

        assert!(serde_json::from_str::<FetchErrorPolicy>(r#""retry""#).is_err());
    }
}
