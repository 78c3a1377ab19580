// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::{Args, Command, ListenerConfig};
use event_listener::app;
use event_listener::events::{SubscribeOptions, write_node_info};
use event_listener::logging::{self, LoggingConfig};
use event_listener::source::RpcBlockSource;
use event_listener::types::FilterSpec;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = ListenerConfig::load(&args.env_file)?;
    let _log_guard = logging::init_with_config(LoggingConfig::from(&config.log))?;

    tracing::info!("Log level: {}", config.log.level);
    tracing::info!("Substrate URL: {}", config.substrate.url);

    let source = RpcBlockSource::connect(&config.substrate).await?;
    let node_info = source.node_info().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_node_info(&mut out, &node_info)?;

    match args.command {
        Command::Range(range) => {
            let filter = FilterSpec::from(&range.selection);
            app::run_range(&source, &filter, range.from, range.to, &mut out).await?;
        }
        Command::Subscribe(selection) => {
            let filter = FilterSpec::from(&selection);
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            };
            app::run_subscribe(
                &source,
                &filter,
                SubscribeOptions::from(&config.subscription),
                shutdown,
                &mut out,
            )
            .await?;
        }
    }

    Ok(())
}
