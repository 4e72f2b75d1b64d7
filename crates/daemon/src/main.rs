// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jrd` - job runner daemon
//!
//! Reads job directories dropped into `<WORKING_DIR>/running`, runs them and
//! bundles results in `<WORKING_DIR>/done` for pickup.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use jr_core::SystemClock;
use jr_daemon::logging::{self, LogTarget};
use jr_daemon::{lifecycle, privileges, shutdown, Config, Runner};
use tracing::error;

/// Exit status for startup failures (-1 as seen by the shell)
const STARTUP_FAILURE: u8 = 255;

#[derive(Parser)]
#[command(name = "jrd", version, about = "Job runner daemon")]
struct Cli {
    /// Directory holding the running/ and done/ job areas
    working_dir: PathBuf,

    /// Run in background (daemonize)
    #[arg(short, long)]
    background: bool,

    /// Change effective group
    #[arg(short, long, value_name = "GROUP")]
    group: Option<String>,

    /// Log to standard out
    #[arg(short = 'l', long)]
    stdout_log: bool,

    /// Seconds between polls of the running directory [default: 15]
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval: Option<u64>,

    /// Directory for the rolling log file [default: /var/log/jrd]
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jrd: cannot start: {e:#}");
            ExitCode::from(STARTUP_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(group) = &cli.group {
        eprintln!("Setting effective group to '{group}'");
        privileges::set_effective_group(group)?;
    }

    let working_dir = lifecycle::enter_working_dir(&cli.working_dir)?;
    let mut config = Config::new(working_dir);
    if let Some(secs) = cli.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }

    let mut daemon = lifecycle::startup(&config)?;

    // Fork before any thread exists: the log writer and the runtime.
    if cli.background {
        privileges::daemonize()?;
        daemon.record_pid()?;
    }

    let target =
        if cli.stdout_log { LogTarget::Stdout } else { LogTarget::File(config.log_dir.clone()) };
    let _log_guard = logging::init(&target)?;

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(async {
        let shutdown = shutdown::install_shutdown_handler()?;
        let store = daemon.prepare_store()?;
        let mut runner = Runner::new(store, SystemClock);
        runner.run(config.poll_interval, shutdown).await;
        Ok::<_, anyhow::Error>(())
    });

    if let Err(e) = &result {
        error!(critical = true, error = %e, "daemon failed");
    }
    daemon.shutdown();
    result
}
