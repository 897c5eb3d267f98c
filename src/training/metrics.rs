use std::collections::VecDeque;

use crate::game::Player;
use crate::training::episode::EpisodeResult;

/// Training metrics tracker with rolling window computations and
/// lifetime win counters.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize,
    total_wins: [usize; 2],
    total_stalls: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            total_wins: [0, 0],
            total_stalls: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        match result.winner {
            Some(player) => self.total_wins[player.index()] += 1,
            None => self.total_stalls += 1,
        }
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Lifetime win count for a side, across all recorded episodes.
    pub fn total_wins(&self, player: Player) -> usize {
        self.total_wins[player.index()]
    }

    pub fn total_stalls(&self) -> usize {
        self.total_stalls
    }

    /// Win rate for a side over the last N episodes.
    pub fn win_rate(&self, player: Player, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let wins = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.winner == Some(player))
            .count();
        wins as f32 / n as f32
    }

    /// Fraction of the last N episodes that ended in a stall.
    pub fn stall_rate(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let stalls = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.stalled)
            .count();
        stalls as f32 / n as f32
    }

    /// Average half-move count over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(player: Player, game_length: usize) -> EpisodeResult {
        EpisodeResult {
            winner: Some(player),
            game_length,
            stalled: false,
        }
    }

    fn stall(game_length: usize) -> EpisodeResult {
        EpisodeResult {
            winner: None,
            game_length,
            stalled: true,
        }
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = TrainingMetrics::new();
        assert_eq!(metrics.total_episodes(), 0);
        assert_eq!(metrics.win_rate(Player::Red, 100), 0.0);
        assert_eq!(metrics.average_game_length(100), 0.0);
    }

    #[test]
    fn test_win_and_stall_rates() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_episode(win(Player::Red, 60));
        metrics.record_episode(win(Player::Blue, 80));
        metrics.record_episode(win(Player::Red, 70));
        metrics.record_episode(stall(400));

        assert_eq!(metrics.total_episodes(), 4);
        assert_eq!(metrics.total_wins(Player::Red), 2);
        assert_eq!(metrics.total_wins(Player::Blue), 1);
        assert_eq!(metrics.total_stalls(), 1);
        assert!((metrics.win_rate(Player::Red, 4) - 0.5).abs() < 1e-6);
        assert!((metrics.stall_rate(4) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_rolling_window_drops_old_episodes() {
        let mut metrics = TrainingMetrics::with_capacity(2);
        metrics.record_episode(win(Player::Red, 10));
        metrics.record_episode(win(Player::Blue, 20));
        metrics.record_episode(win(Player::Blue, 30));

        // Window holds the last two (both Blue); lifetime counts keep all.
        assert_eq!(metrics.win_rate(Player::Red, 10), 0.0);
        assert_eq!(metrics.total_wins(Player::Red), 1);
        assert_eq!(metrics.total_episodes(), 3);
    }

    #[test]
    fn test_average_game_length_window() {
        let mut metrics = TrainingMetrics::new();
        metrics.record_episode(win(Player::Red, 50));
        metrics.record_episode(win(Player::Blue, 100));
        assert!((metrics.average_game_length(2) - 75.0).abs() < 1e-6);
        assert!((metrics.average_game_length(1) - 100.0).abs() < 1e-6);
    }
}
