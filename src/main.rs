use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use matryx_power_levels::{event_type, EvaluatorConfig, PowerLevelAction, PowerLevels};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Evaluator config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// `m.room.power_levels` content (JSON)
    #[arg(long)]
    levels: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the power level of a user
    UserLevel { user: String },

    /// Check whether a user may send an event
    CanSend {
        user: String,

        #[arg(long, default_value = event_type::MESSAGE)]
        event_type: String,

        /// Check against the state event threshold
        #[arg(long)]
        state: bool,
    },

    /// Check whether a user may ban, kick, invite or redact
    Can { action: PowerLevelAction, user: String },

    /// Print the notification level for a key
    NotificationLevel { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EvaluatorConfig::load(cli.config.as_deref())?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let content = std::fs::read_to_string(&cli.levels)
        .with_context(|| format!("Failed to read {}", cli.levels.display()))?;
    let levels = PowerLevels::from_json_str(&content)?;
    debug!("Loaded power levels from {}", cli.levels.display());

    let output = run(&cli.command, &levels, &config)?;
    println!("{output}");

    Ok(())
}

/// Answer one query against the loaded power levels
fn run(command: &Commands, levels: &PowerLevels, config: &EvaluatorConfig) -> Result<String> {
    let output = match command {
        Commands::UserLevel { user } => levels.user_power_level(user).to_string(),
        Commands::CanSend { user, event_type, state } => {
            let allowed = if *state {
                levels.may_send_state_event(event_type, user)
            } else {
                levels.may_send_event_of_type(event_type, user)
            };
            allowed.to_string()
        },
        Commands::Can { action, user } => levels.user_may(*action, user).to_string(),
        Commands::NotificationLevel { key } => levels
            .notification_level_with_policy(Some(key), config.notification_fallback)?
            .to_string(),
    };

    Ok(output)
}
