//! Bot Decision Runner
//!
//! Loads a scenario snapshot, lets one bot act in the scenario's phase and
//! prints every command it published as a JSON line.

use clap::Parser;
use mech_bots::bots::Bot;
use mech_bots::core::config::BotConfig;
use mech_bots::core::error::{BotError, Result};
use mech_bots::game::{CommandPublisher, Scenario};
use tokio::runtime::Runtime;

/// Run one bot decision against a scenario file
#[derive(Parser, Debug)]
#[command(name = "bot-decide")]
#[command(about = "Ask a bot for its next commands in a saved scenario")]
struct Args {
    /// Scenario JSON file
    #[arg(long, default_value = "data/scenarios/duel.json")]
    scenario: String,

    /// Bot configuration TOML; built-in defaults when omitted
    #[arg(long)]
    config: Option<String>,

    /// Index of the player the bot controls
    #[arg(long, default_value_t = 0)]
    player: usize,
}

const COMMAND_BUFFER: usize = 256;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mech_bots=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    tracing::info!(config = %config.name, scenario = %args.scenario, "Loading scenario");

    let scenario = Scenario::load(&args.scenario)?;
    let (publisher, mut receiver) = CommandPublisher::channel(COMMAND_BUFFER);
    let game = scenario.into_game(publisher)?;
    let player_id = game
        .players()
        .get(args.player)
        .map(|p| p.id)
        .ok_or_else(|| BotError::InvalidScenario(format!("no player at index {}", args.player)))?;

    let rt = Runtime::new()?;
    let mut bot = Bot::new(player_id, &config);
    rt.block_on(async {
        let acted = bot.on_phase(&game).await?;
        if !acted {
            tracing::info!(phase = ?game.phase(), "Nothing to decide in this phase");
        }
        Ok::<_, BotError>(())
    })?;

    while let Ok(command) = receiver.try_recv() {
        println!("{}", serde_json::to_string(&command)?);
    }
    Ok(())
}
