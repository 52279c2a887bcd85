/// TuneQueue - song request queue and player for the terminal
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunequeue_console::{ConsoleConfig, Session};

#[derive(Parser)]
#[command(name = "tunequeue")]
#[command(about = "Song request queue and player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Reject every play attempt, like a browser blocking autoplay
    #[arg(long)]
    fail_playback: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays the player output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunequeue_console=info,tunequeue_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if cli.fail_playback {
        config.device.fail_playback = true;
    }
    config.validate()?;

    tracing::info!("Starting TuneQueue");
    tracing::info!("Songs: {}", config.songs.len());
    tracing::info!("Track length: {}s", config.device.track_length_secs);

    let mut session = Session::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.script {
        Some(path) => {
            let script = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(script), &mut out)?;
        }
        None => session.run(io::stdin().lock(), &mut out)?,
    }

    Ok(())
}
