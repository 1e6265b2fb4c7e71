use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use holehe_common::capability::Capability;
use holehe_common::config::Config;
use holehe_common::email;
use holehe_common::record::ResultRecord;
use holehe_core::aggregate::{self, RunResult, RunStats};
use holehe_core::dispatcher::Dispatcher;
use holehe_core::output;
use holehe_core::registry::Registry;
use tracing::{Instrument, info, info_span, warn};

use crate::commands::CommandLine;
use crate::terminal::{colors, print, progress};

pub async fn check(commands: &CommandLine) -> anyhow::Result<()> {
    let email: &str = email::validate(commands.email())?;
    let cfg: Config = commands.config();

    let registry: Registry = Registry::from_capabilities(holehe_modules::all())?;
    if registry.is_empty() {
        warn!("No services are registered, the result will be empty");
    }
    let selected: Vec<Arc<dyn Capability>> = registry.select(&cfg);

    print::header(&format!("checking {} of {} services", selected.len(), registry.len()));
    info!("Target {}", email.color(colors::PRIMARY));

    let span = info_span!("check", indicatif.pb_show = true);
    progress::prepare(&span, selected.len());

    let start_time: Instant = Instant::now();
    let dispatcher: Dispatcher = Dispatcher::new(&cfg)
        .context("preparing the http client")?
        .with_progress(progress::tracker(span.clone()));
    let records: Vec<ResultRecord> = dispatcher.run(email, selected).instrument(span).await?;

    let stats: RunStats = RunStats::from_records(&records);
    let result: RunResult = aggregate::classify(records);
    print_summary(&stats, start_time.elapsed());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::emit(&result, commands.output.as_deref(), &mut out).context("writing results")?;
    out.flush()?;
    Ok(())
}

fn print_summary(stats: &RunStats, total_time: Duration) {
    let found: ColoredString = format!("{} found", stats.found).bold().green();
    let limited: ColoredString = format!("{} rate limited", stats.rate_limited).bold().yellow();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    print::fat_separator();
    info!(
        "{} services checked in {}: {}, {}",
        stats.checked, total_time, found, limited
    );
    if stats.faulted > 0 {
        warn!("{} checks failed and were left out", stats.faulted);
    }
}
