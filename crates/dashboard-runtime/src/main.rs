//! `shieldnet`: command-line front end for the SHIELD-NET dashboard core.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use dashboard_runtime::login::LoginService;
use dashboard_runtime::preferences::PreferencesStore;
use dashboard_runtime::{DashboardConfig, DashboardRuntime};
use shared_types::{Clock, RandomSource, SystemClock, ThreadRandom};
use shield_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use sn_01_verification_flow::{FaultInjectingVerifier, FlowOutcome, SimulatedStepVerifier};
use sn_02_event_feed::UplinkConfig;

/// SHIELD-NET security dashboard core
#[derive(Parser, Debug)]
#[command(name = "shieldnet")]
#[command(about = "Run the SHIELD-NET verification flow and simulated event feed")]
struct Args {
    /// Log level filter (overrides SN_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the secure handshake and print the log panel
    Verify {
        /// Make this step (1-4) fail on its first attempt
        #[arg(long)]
        fail_step: Option<u8>,
    },
    /// Run the event feed and print the dashboard
    Feed {
        /// How long to run
        #[arg(long, default_value = "15")]
        seconds: u64,

        /// Uplink URL; replaces the demo threat producer
        #[arg(long)]
        uplink: Option<String>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or cycle the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Cosmetic login; stores the granted role
    Login {
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Next,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    let _telemetry = init_telemetry(telemetry).context("failed to initialize telemetry")?;

    let config = DashboardConfig::from_env();

    match args.command {
        Command::Verify { fail_step } => verify(config, fail_step).await?,
        Command::Feed {
            seconds,
            uplink,
            json,
        } => feed(config, seconds, uplink, json).await?,
        Command::Theme { action } => theme(&config, action)?,
        Command::Login { username, password } => login(config, &username, &password).await?,
    }

    if args.metrics {
        println!("{}", encode_metrics().context("failed to encode metrics")?);
    }

    Ok(())
}

async fn verify(config: DashboardConfig, fail_step: Option<u8>) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

    let runtime = match fail_step {
        Some(step) => {
            let inner = Arc::new(SimulatedStepVerifier::new(
                clock.clone(),
                random.clone(),
                &config.flow,
            ));
            let verifier = FaultInjectingVerifier::new(inner, step, "injected failure").once();
            DashboardRuntime::with_verifier(config, clock, random, Arc::new(verifier))
        }
        None => DashboardRuntime::with_sources(config, clock, random),
    };

    let mut outcome = runtime.verify().await;
    if let FlowOutcome::Aborted { step, reason, .. } = &outcome {
        info!(step, %reason, "Handshake aborted, retrying");
        outcome = runtime.verify().await;
    }

    for entry in runtime.dashboard().with_state(|s| s.log.chronological().cloned().collect::<Vec<_>>()) {
        println!("{:<8} {}", entry.category.as_str(), entry);
    }

    match outcome {
        FlowOutcome::Redirected { destination, .. } => {
            println!("-> {}", destination);
            Ok(())
        }
        FlowOutcome::Aborted { step, reason, .. } => bail!("step {} failed: {}", step, reason),
        FlowOutcome::NavigationFailed { reason, .. } => bail!("navigation failed: {}", reason),
        FlowOutcome::Ignored => bail!("a verification run was already in progress"),
    }
}

async fn feed(
    mut config: DashboardConfig,
    seconds: u64,
    uplink: Option<String>,
    json: bool,
) -> Result<()> {
    if let Some(url) = uplink {
        config.uplink = UplinkConfig {
            url: Some(url),
            ..config.uplink
        };
    }

    let mut runtime = DashboardRuntime::new(config);
    runtime.start_feed();
    runtime.run_for(Duration::from_secs(seconds)).await;
    runtime.shutdown().await;

    let snapshot = runtime.snapshot();
    if json {
        println!("{}", snapshot.to_json().context("failed to encode snapshot")?);
    } else {
        print!("{}", snapshot);
    }
    Ok(())
}

fn theme(config: &DashboardConfig, action: Option<ThemeAction>) -> Result<()> {
    let mut prefs = PreferencesStore::open(&config.preferences_path)
        .context("failed to open preferences")?;

    let theme = match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => prefs.theme(),
        ThemeAction::Next => prefs.cycle_theme().context("failed to store theme")?,
    };
    println!("{}", theme);
    Ok(())
}

async fn login(config: DashboardConfig, username: &str, password: &str) -> Result<()> {
    let mut prefs = PreferencesStore::open(&config.preferences_path)
        .context("failed to open preferences")?;

    let runtime = DashboardRuntime::new(config);
    let service: LoginService = runtime.login_service();
    let role = service
        .login(&mut prefs, username, password)
        .await
        .context("login failed")?;

    println!("Access level: {}", role);
    if let Some(page) = runtime.dashboard().location() {
        println!("-> {}", page);
    }
    Ok(())
}
