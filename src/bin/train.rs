#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use ml_morris::ai::{Agent, DqnAgent, RandomAgent, TabularQAgent};
use ml_morris::config::AppConfig;
use ml_morris::game::Player;
use ml_morris::training::Trainer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentKind {
    Random,
    Tabular,
    Dqn,
}

/// Train mill-game agents via self-play.
#[derive(Parser)]
#[command(name = "train", about = "Train a mill-game RL agent via self-play")]
struct Cli {
    /// Agent driving the red side
    #[arg(long, value_enum, default_value_t = AgentKind::Dqn)]
    red: AgentKind,

    /// Agent driving the blue side
    #[arg(long, value_enum, default_value_t = AgentKind::Dqn)]
    blue: AgentKind,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Seed for deterministic runs (agents and orchestrator)
    #[arg(long)]
    seed: Option<u64>,
}

fn build_agent(
    kind: AgentKind,
    player: Player,
    config: &AppConfig,
    seed: Option<u64>,
) -> Box<dyn Agent> {
    // Offset per side so the two agents never share a stream.
    let side_seed = seed.map(|s| s.wrapping_add(player.index() as u64 + 1));
    match kind {
        AgentKind::Random => match side_seed {
            Some(s) => Box::new(RandomAgent::from_seed(s)),
            None => Box::new(RandomAgent::new()),
        },
        AgentKind::Tabular => match side_seed {
            Some(s) => Box::new(TabularQAgent::from_seed(player, config.tabular.clone(), s)),
            None => Box::new(TabularQAgent::new(player, config.tabular.clone())),
        },
        AgentKind::Dqn => match side_seed {
            Some(s) => Box::new(DqnAgent::from_seed(player, config.dqn.clone(), s)),
            None => Box::new(DqnAgent::new(player, config.dqn.clone())),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(episodes) = cli.episodes {
        config.training.num_episodes = episodes;
    }
    config.validate()?;

    let mut red = build_agent(cli.red, Player::Red, &config, cli.seed);
    let mut blue = build_agent(cli.blue, Player::Blue, &config, cli.seed);

    let mut trainer = match cli.seed {
        Some(s) => Trainer::from_seed(config.training.clone(), s),
        None => Trainer::new(config.training.clone()),
    };
    trainer.train(red.as_mut(), blue.as_mut())?;

    Ok(())
}
