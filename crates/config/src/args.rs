// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.polymesh)
    #[arg(short, long, default_value = ".env", global = true)]
    pub env_file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Get the events of a module over a closed range of blocks
    Range(RangeArgs),

    /// Subscribe to the events of a module as new blocks are produced
    Subscribe(SelectionArgs),
}

/// Which events to print
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct SelectionArgs {
    /// Module whose events should be printed (matched in lower case)
    #[arg(short, long, default_value = "asset")]
    pub module: String,

    /// Only print events with exactly this name (case-sensitive)
    #[arg(short = 'n', long = "event")]
    pub event_name: Option<String>,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct RangeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// First block of the range (inclusive)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub from: u64,

    /// Last block of the range (inclusive). Defaults to the best block.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub to: Option<u64>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_defaults() {
        let args = Args::try_parse_from(["event-listener", "range"]).unwrap();
        assert_eq!(args.env_file, ".env");
        assert_eq!(
            args.command,
            Command::Range(RangeArgs {
                selection: SelectionArgs {
                    module: "asset".to_string(),
                    event_name: None,
                },
                from: 1,
                to: None,
            })
        );
    }

    #[test]
    fn test_range_with_event_filter() {
        let args = Args::try_parse_from([
            "event-listener",
            "range",
            "--module",
            "Identity",
            "--event",
            "DidCreated",
            "--from",
            "10",
            "--to",
            "20",
        ])
        .unwrap();

        let Command::Range(range) = args.command else {
            panic!("expected range command");
        };
        assert_eq!(range.selection.module, "Identity");
        assert_eq!(range.selection.event_name.as_deref(), Some("DidCreated"));
        assert_eq!(range.from, 10);
        assert_eq!(range.to, Some(20));
    }

    #[test]
    fn test_range_rejects_block_zero() {
        assert!(Args::try_parse_from(["event-listener", "range", "--from", "0"]).is_err());
        assert!(Args::try_parse_from(["event-listener", "range", "--to", "0"]).is_err());
    }

    #[test]
    fn test_subscribe_with_env_file() {
        let args = Args::try_parse_from([
            "event-listener",
            "subscribe",
            "-m",
            "asset",
            "--env-file",
            ".env.local",
        ])
        .unwrap();

        assert_eq!(args.env_file, ".env.local");
        assert_eq!(
            args.command,
            Command::Subscribe(SelectionArgs {
                module: "asset".to_string(),
                event_name: None,
            })
        );
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Args::try_parse_from(["event-listener"]).is_err());
    }
}
