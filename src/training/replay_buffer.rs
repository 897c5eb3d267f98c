use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::ai::Experience;

/// Fixed-capacity ring buffer of training experiences with uniform
/// random sampling. Oldest entries are evicted first; the buffer is
/// agent-owned and survives game resets.
pub struct ReplayBuffer {
    buffer: Vec<Experience>,
    capacity: usize,
    position: usize,
    len: usize,
    rng: StdRng,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        ReplayBuffer {
            buffer: Vec::with_capacity(capacity),
            capacity,
            position: 0,
            len: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Add an experience to the buffer. Overwrites oldest when full.
    pub fn push(&mut self, experience: Experience) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(experience);
        } else {
            self.buffer[self.position] = experience;
        }
        self.position = (self.position + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Sample a random batch of experiences.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Experience> {
        assert!(batch_size <= self.len, "Not enough experiences to sample");
        let indices = index::sample(&mut self.rng, self.len, batch_size);
        indices.iter().map(|i| self.buffer[i].clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, GameState, Player, Position};

    fn experience_with_reward(reward: f32) -> Experience {
        let state = GameState::initial();
        let action = Position::from_name("a1").unwrap();
        let next_state = state.apply(Action::Place(action)).unwrap();
        Experience {
            state,
            action: action.index(),
            reward,
            next_state,
            done: false,
            player: Player::Red,
        }
    }

    #[test]
    fn test_push_and_len() {
        let mut buf = ReplayBuffer::new(10);
        assert!(buf.is_empty());

        buf.push(experience_with_reward(0.0));
        assert_eq!(buf.len(), 1);

        for _ in 0..9 {
            buf.push(experience_with_reward(0.0));
        }
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn test_ring_buffer_overwrites_oldest() {
        let mut buf = ReplayBuffer::new(5);
        for i in 0..10 {
            buf.push(experience_with_reward(i as f32));
        }
        assert_eq!(buf.len(), 5);

        // Only the newest five rewards (5..10) remain retrievable.
        let batch = buf.sample(5);
        for exp in batch {
            assert!(exp.reward >= 5.0, "evicted reward {} still present", exp.reward);
        }
    }

    #[test]
    fn test_sample_returns_requested_size() {
        let mut buf = ReplayBuffer::new(100);
        for _ in 0..50 {
            buf.push(experience_with_reward(0.0));
        }
        let batch = buf.sample(10);
        assert_eq!(batch.len(), 10);
    }

    #[test]
    #[should_panic(expected = "Not enough experiences")]
    fn test_sample_too_many() {
        let mut buf = ReplayBuffer::new(10);
        buf.push(experience_with_reward(0.0));
        buf.sample(5);
    }
}
