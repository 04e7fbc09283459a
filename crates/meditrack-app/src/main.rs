use std::path::Path;

use meditrack_app::projection::{parse_now, project, read_input};
use meditrack_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        anyhow::bail!("usage: meditrack-schedule <anchors.json> [now]");
    };
    let now = parse_now(args.next().as_deref())?;

    let input = read_input(Path::new(&path))?;
    tracing::debug!(
        path = %path,
        appointments = input.appointments.len(),
        prescriptions = input.prescriptions.len(),
        "Loaded anchors"
    );

    let output = project(&input, now, config.schedule.window_days)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
