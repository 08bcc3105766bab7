/// Soul Headless - scripted playback sessions without an audio device
use anyhow::Context;
use clap::{Parser, Subcommand};
use soul_headless::{run_session, HeadlessConfig, Session};
use soul_playback::PlayerEvent;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-headless")]
#[command(about = "Replay Soul Player props sessions against a simulated transport", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SOUL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script
    Run {
        /// Session script (JSON); falls back to `session` in the config
        session: Option<PathBuf>,
        /// Print player events as JSON lines on stdout
        #[arg(long)]
        json: bool,
    },
    /// Validate a session script and print the actions each update applies
    Plan {
        /// Session script (JSON)
        session: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "soul_headless=info,soul_playback=info,soul_graph=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = HeadlessConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Run { session, json } => {
            let path = session
                .or_else(|| config.session.clone())
                .context("no session given (pass a path or set `session` in the config)")?;
            run(&config, path, json).await?;
        }
        Commands::Plan { session } => {
            plan(&config, session).await?;
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run(config: &HeadlessConfig, path: PathBuf, json: bool) -> anyhow::Result<()> {
    let session = Session::load(&path)
        .await
        .with_context(|| format!("failed to load session {:?}", path))?;
    tracing::info!("Replaying {:?} ({} steps)", path, session.len());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            report(&event, json);
        }
    });

    let summary = run_session(config, session, tx).await?;
    printer.await?;

    tracing::info!(
        "Done: finished={}, position={:.2}s",
        summary.finished,
        summary.final_position
    );
    Ok(())
}

fn report(event: &PlayerEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Failed to encode event: {}", e),
        }
        return;
    }

    match event {
        PlayerEvent::Playing { position, duration } => {
            tracing::debug!("Playing {:.2}s / {:?}", position, duration);
        }
        PlayerEvent::FinishedPlaying => tracing::info!("Finished playing"),
        PlayerEvent::Loading => tracing::info!("Loading"),
        PlayerEvent::Load => tracing::info!("Loaded"),
        PlayerEvent::VisualizationChange { values } => {
            tracing::trace!("Visualization: {:?}", values);
        }
    }
}

async fn plan(config: &HeadlessConfig, path: PathBuf) -> anyhow::Result<()> {
    let session = Session::load(&path)
        .await
        .with_context(|| format!("failed to load session {:?}", path))?;

    for (step, actions) in session.steps().iter().skip(1).zip(session.plan(&config.player)) {
        println!("{:>8}ms  {:?}", step.at_ms, actions);
    }

    Ok(())
}
