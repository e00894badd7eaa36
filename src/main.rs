mod cli;
mod config;
mod error;
mod model;
mod service;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::cli::Cli;
use crate::config::RawOptions;
use crate::service::onesky::{OneSkyClient, TranslationStage};
use crate::service::output::OutputSink;
use crate::util::path::collect_inputs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 保持 guard 存活，否则文件日志会丢
    let _guard = init_tracing(cli.log_dir.as_deref())?;

    run(cli).await
}

fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 控制台输出层（带颜色）
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(filter.clone());

    // 文件输出层（无颜色，按日期滚动）
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "onesky_sync.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> Result<()> {
    let config = RawOptions::load(&cli.config, cli.overrides())
        .and_then(RawOptions::into_config)
        .context("Invalid configuration")?;

    let inputs = collect_inputs(&cli.inputs)
        .await
        .context("Failed to read input files")?;

    let client = OneSkyClient::new()?;
    let stage = TranslationStage::new(config, client);

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let output = stage
        .run_bounded(inputs, cancel)
        .await
        .context("Failed to fetch translations from OneSky")?;

    let sink = OutputSink::new(&cli.dest);
    let files = output.into_combined();

    if cli.dry_run {
        for file in &files {
            println!("{}", sink.resolve(&file.path).display());
        }
        return Ok(());
    }

    let written = sink
        .write_all(&files)
        .await
        .with_context(|| format!("Failed to write output under {}", sink.root().display()))?;
    tracing::info!("🎉 wrote {} file(s) under {}", written.len(), sink.root().display());

    Ok(())
}
