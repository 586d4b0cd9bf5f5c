use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use shared::domain::{FrameType, ShiftParameters};
use shift_core::{CommitOutcome, HttpShiftAgent, ParameterStore, ShiftController};
use tracing::info;

mod config;
mod console;

use config::load_settings;
use console::ConsoleHost;

/// Shift a frame interval through the shifting agent.
#[derive(Parser, Debug)]
struct Args {
    /// Current frame; the interval starts collapsed onto it.
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    frame: i32,
    #[arg(long, default_value = "control")]
    frame_type: FrameType,
    #[arg(long)]
    start: Option<i32>,
    #[arg(long)]
    end: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    displacement: Option<i32>,
    /// Overrides `agent_url` from settings.
    #[arg(long)]
    agent_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(agent_url) = args.agent_url.clone() {
        settings.agent_url = agent_url;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let agent = Arc::new(HttpShiftAgent::new(
        &settings.agent_url,
        settings.request_timeout(),
    )?);
    info!(endpoint = %agent.endpoint(), "using shifting agent");

    let parameters = ParameterStore::new(ShiftParameters {
        frame_type: args.frame_type,
        ..ShiftParameters::default()
    });
    let host = Arc::new(ConsoleHost::new(args.frame, parameters.clone()));
    let controller = ShiftController::new(host.clone(), agent);

    controller.begin();
    let edited = parameters.edit(|params| {
        if let Some(start) = args.start {
            params.start = start;
        }
        if let Some(end) = args.end {
            params.end = end;
        }
        if let Some(displacement) = args.displacement {
            params.displacement = displacement;
        }
    });
    let params = match edited {
        Ok(params) => params,
        Err(err) => {
            controller.cancel();
            return Err(err.into());
        }
    };
    info!(?params, "time shift prepared");

    let mut busy = controller.subscribe_busy();
    let indicator = tokio::spawn(async move {
        while busy.changed().await.is_ok() {
            let committing = *busy.borrow_and_update();
            info!(committing, "commit indicator changed");
        }
    });

    let outcome = controller.commit().await;
    indicator.abort();
    info!(notifications = host.notification_count(), "time shift finished");

    match outcome {
        CommitOutcome::Applied => Ok(()),
        CommitOutcome::Failed(err) => Err(anyhow::Error::new(err).context("time shift failed")),
        CommitOutcome::AlreadyInFlight => bail!("a time shift is already in flight"),
        CommitOutcome::Skipped(reason) => bail!("time shift skipped: {reason:?}"),
    }
}
