//! Self-play orchestration: per-turn episode driving with reward
//! shaping, the replay buffer, rolling metrics, and the training loop.

pub mod episode;
pub mod metrics;
pub mod replay_buffer;
pub mod trainer;

pub use episode::{evaluate, play_episode, play_eval_game, EpisodeResult, MILL_SETUP_BONUS};
pub use metrics::TrainingMetrics;
pub use replay_buffer::ReplayBuffer;
pub use trainer::{Trainer, TrainerConfig};
