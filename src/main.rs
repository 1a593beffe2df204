use movil::Result;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use movil::daemon;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let base_filter = EnvFilter::new("info");
    let (filter_layer, filter_handle) = reload::Layer::new(base_filter);
    let timer = tracing_subscriber::fmt::time::UtcTime::new(
        time::format_description::parse("[hour]:[minute]:[second]").unwrap(),
    );

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_level(false)
                .with_timer(timer)
                .with_writer(std::io::stderr),
        )
        .init();

    let cfg = daemon::config::DaemonConfig::load()?;

    tracing::info!(
        "Movil v{} started (carrier={}, battery={}%, balance={} Bs)",
        env!("CARGO_PKG_VERSION"),
        cfg.settings.network.carrier,
        cfg.settings.battery.initial_level,
        cfg.settings.credit.initial_balance,
    );

    daemon::run::run_with_config_and_logger(&cfg, filter_handle).await
}
