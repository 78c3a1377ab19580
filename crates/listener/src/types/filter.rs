// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::SelectionArgs;

/// Which events are printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Module name, expected in lower case
    pub module: String,
    /// Exact event name; every event of the module matches when `None`
    pub event_name: Option<String>,
}

impl FilterSpec {
    /// Build a filter from values that are already normalized
    pub fn new(module: impl Into<String>, event_name: Option<String>) -> Self {
        Self {
            module: module.into(),
            event_name,
        }
    }

    /// Build a filter from user input. The module name is lower-cased, the
    /// event name is kept as typed.
    pub fn from_user_input(module: &str, event_name: Option<&str>) -> Self {
        Self {
            module: module.trim().to_lowercase(),
            event_name: event_name.map(|name| name.trim().to_string()),
        }
    }
}

impl From<&SelectionArgs> for FilterSpec {
    fn from(selection: &SelectionArgs) -> Self {
        Self::from_user_input(&selection.module, selection.event_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_lowercases_module_only() {
        let filter = FilterSpec::from_user_input("Asset", Some("Transfer"));
        assert_eq!(filter.module, "asset");
        assert_eq!(filter.event_name.as_deref(), Some("Transfer"));
    }

    #[test]
    fn test_from_selection() {
        let selection = SelectionArgs {
            module: " IDENTITY ".to_string(),
            event_name: None,
        };
        let filter = FilterSpec::from(&selection);
        assert_eq!(filter, FilterSpec::new("identity", None));
    }
}
