use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::Agent;
use crate::error::TrainingError;
use crate::game::Player;
use crate::training::episode::{evaluate, play_episode};
use crate::training::metrics::TrainingMetrics;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub log_interval: usize,
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Half-move cap per episode; random movement can cycle forever
    /// without it.
    pub max_moves: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 10_000,
            log_interval: 100,
            eval_interval: 500,
            eval_games: 100,
            max_moves: 400,
        }
    }
}

/// Self-play trainer: drives episodes between two agents, tracks rolling
/// metrics, and periodically evaluates the red agent greedily against a
/// fresh random opponent.
pub struct Trainer {
    config: TrainerConfig,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed(config: TrainerConfig, seed: u64) -> Self {
        Trainer {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Run the full training loop. Returns the accumulated metrics.
    pub fn train(
        &mut self,
        red: &mut dyn Agent,
        blue: &mut dyn Agent,
    ) -> Result<TrainingMetrics, TrainingError> {
        let mut metrics = TrainingMetrics::new();

        println!(
            "Starting self-play: {} ({}) vs {} ({}) for {} episodes...",
            Player::Red.name(),
            red.name(),
            Player::Blue.name(),
            blue.name(),
            self.config.num_episodes
        );
        println!("-------------------------------------------");

        for episode in 1..=self.config.num_episodes {
            let result = play_episode(red, blue, &mut self.rng, self.config.max_moves)?;
            metrics.record_episode(result);

            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                println!(
                    "Episode {}/{} | eps: {:.3} | red({}): {:.1}% | blue({}): {:.1}% | stall: {:.1}% | avg_len: {:.1}",
                    episode,
                    self.config.num_episodes,
                    red.exploration_rate(),
                    window,
                    metrics.win_rate(Player::Red, window) * 100.0,
                    window,
                    metrics.win_rate(Player::Blue, window) * 100.0,
                    metrics.stall_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }

            if self.config.eval_interval > 0 && episode % self.config.eval_interval == 0 {
                let eval_wr = evaluate(
                    red,
                    self.config.eval_games,
                    self.config.max_moves,
                    &mut self.rng,
                )?;
                println!(
                    "  >> Eval vs Random ({} games): {:.1}% win rate",
                    self.config.eval_games,
                    eval_wr * 100.0
                );
            }
        }

        println!("-------------------------------------------");
        println!(
            "Training complete. Episodes: {} | Red wins: {} | Blue wins: {} | stalls: {}",
            metrics.total_episodes(),
            metrics.total_wins(Player::Red),
            metrics.total_wins(Player::Blue),
            metrics.total_stalls(),
        );

        Ok(metrics)
    }
}
