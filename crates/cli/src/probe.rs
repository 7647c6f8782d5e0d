use anyhow::Context;
use cube_cache_application::BatchReportTrigger;
use cube_cache_domain::Config;
use cube_cache_infrastructure::{build_report_sink, CachedOpenInterceptor};
use cube_cache_jobs::HitRateMonitor;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::ProbeArgs;

pub async fn run(config: &Config, args: ProbeArgs) -> anyhow::Result<()> {
    let paths = collect_paths(&args)?;
    if paths.is_empty() {
        anyhow::bail!("No dataset paths given (pass paths or --manifest)");
    }

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping probe");
            signal_token.cancel();
        }
    });

    let monitor = HitRateMonitor::configure_with_cancellation(
        config.stats.cache_label.clone(),
        config.stats.report_interval(),
        build_report_sink(config.stats.sink),
        shutdown.clone(),
    )
    .await?;

    let interceptor = Arc::new(CachedOpenInterceptor::new(
        &config.interceptor,
        monitor.counter(),
    ));
    let trigger = config
        .stats
        .report_every_batches
        .map(|every| BatchReportTrigger::new(monitor.counter(), every))
        .transpose()?;

    info!(
        files = paths.len(),
        passes = args.passes,
        root_dir = %config.interceptor.root_dir,
        cache_dir = %config.interceptor.cache_dir,
        enabled = interceptor.is_enabled(),
        "Probing dataset files"
    );

    let passes = args.passes;
    let worker_token = shutdown.clone();
    let failed = tokio::task::spawn_blocking(move || {
        let mut failed = 0u64;
        'passes: for _ in 0..passes {
            for path in &paths {
                if worker_token.is_cancelled() {
                    break 'passes;
                }
                if let Err(e) = load_file(&interceptor, path) {
                    warn!(path = %path.display(), error = %e, "Failed to open dataset file");
                    failed += 1;
                }
                if let Some(trigger) = &trigger {
                    trigger.on_batch_fetched();
                }
            }
        }
        failed
    })
    .await
    .context("probe worker panicked")?;

    monitor.shutdown().await;
    let report = monitor.report();

    info!(
        total_requests = report.lifetime.request_count,
        hit_rate = report.lifetime.hit_rate,
        failed,
        "Probe finished"
    );

    Ok(())
}

fn load_file(interceptor: &CachedOpenInterceptor, path: &Path) -> io::Result<u64> {
    let mut file = interceptor.open(path)?;
    io::copy(&mut file, &mut io::sink())
}

fn collect_paths(args: &ProbeArgs) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = args.paths.clone();

    if let Some(manifest) = &args.manifest {
        let contents = std::fs::read_to_string(manifest)
            .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
        paths.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(PathBuf::from),
        );
    }

    Ok(paths)
}
