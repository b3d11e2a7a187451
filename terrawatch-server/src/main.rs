use clap::Parser;
use std::time::Duration;
use tokio::sync::watch;
use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};

use terrawatch_core::LocationStatus;
use terrawatch_server::snapshot::load_snapshot;
use terrawatch_server::{Cli, Monitor, MonitorError, MonitorHandle, ReplayProvider};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let snapshot = load_snapshot(&cli.snapshot)?;
    let provider = ReplayProvider::from_file(&cli.track)?;
    let config = cli.monitor_config();
    log::debug!("{:?}", config);

    let (monitor, handle) = Monitor::new(provider, &config);
    let status_rx = handle.subscribe();
    handle.update_snapshot(snapshot);

    Toplevel::new(|s: SubsystemHandle| async move {
        s.start(SubsystemBuilder::new("monitor", move |subsys| {
            run_monitor(subsys, monitor, handle)
        }));
        s.start(SubsystemBuilder::new("status", move |subsys| {
            report_status(subsys, status_rx)
        }));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(|e| anyhow::anyhow!("terrawatch shut down with errors: {}", e))
}

async fn run_monitor(
    subsys: SubsystemHandle,
    monitor: Monitor<ReplayProvider>,
    handle: MonitorHandle,
) -> Result<(), MonitorError> {
    let run = monitor.run();
    tokio::pin!(run);

    tokio::select! {
        _ = &mut run => return Ok(()),
        _ = subsys.on_shutdown_requested() => {
            log::debug!("Shutdown requested, stopping monitor");
            handle.stop();
        }
    }

    run.await;
    Ok(())
}

/// Stand-in for the presentation layer: log every published status and
/// announce banner changes
async fn report_status(
    subsys: SubsystemHandle,
    mut status_rx: watch::Receiver<LocationStatus>,
) -> Result<(), MonitorError> {
    let mut shown = None;

    loop {
        tokio::select! {
            _ = subsys.on_shutdown_requested() => return Ok(()),
            changed = status_rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
        }

        let status = status_rx.borrow_and_update().clone();
        if let Ok(json) = serde_json::to_string(&status) {
            log::debug!("status {}", json);
        }

        let banner = status.banner();
        if banner != shown {
            match &banner {
                Some(b) => log::info!("ALERT: {}", b),
                None => log::info!("Alert cleared"),
            }
            shown = banner;
        }
        log::info!(
            "Zone color {:?}{}",
            status.zone_color(),
            status
                .error
                .as_deref()
                .map(|e| format!(" (last check failed: {})", e))
                .unwrap_or_default()
        );
    }
}
