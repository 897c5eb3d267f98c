use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::TensorData;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Action, GameState, Phase, Player, Position, POSITION_COUNT};
use crate::training::replay_buffer::ReplayBuffer;

use super::agent::{Agent, Experience};
use super::network::{QNetwork, QNetworkConfig};
use super::state_encoding::{encode_state, encode_states_batch};

type InferBackend = NdArray<f32>;
type TrainBackend = Autodiff<InferBackend>;

/// DQN hyperparameters. Defaults follow the reference agent: constant
/// exploration, a small replay buffer, and a hard target sync every
/// thousand gradient steps.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DqnConfig {
    pub learning_rate: f64,
    pub gamma: f32,
    pub epsilon: f32,
    pub batch_size: usize,
    pub replay_capacity: usize,
    pub target_update_interval: usize,
}

impl Default for DqnConfig {
    fn default() -> Self {
        DqnConfig {
            learning_rate: 1e-3,
            gamma: 0.9,
            epsilon: 0.2,
            batch_size: 32,
            replay_capacity: 10_000,
            target_update_interval: 1000,
        }
    }
}

/// Deep Q-learning agent with policy + target networks, an experience
/// replay buffer, and an Adam optimizer.
///
/// Only placement actions are learned: in the moving and removal phases
/// the agent falls back to a uniform random legal action and records no
/// experience for it. The last *placement* selection stays anchored so
/// the terminal reward still reaches it at game end.
pub struct DqnAgent {
    player: Player,
    config: DqnConfig,
    epsilon: f32,
    policy_net: QNetwork<TrainBackend>,
    target_net: QNetwork<InferBackend>,
    optimizer: burn::optim::adaptor::OptimizerAdaptor<
        burn::optim::Adam,
        QNetwork<TrainBackend>,
        TrainBackend,
    >,
    replay_buffer: ReplayBuffer,
    device: <TrainBackend as Backend>::Device,
    step_count: usize,
    last: Option<(GameState, usize)>,
    awaiting_outcome: bool,
    rng: StdRng,
}

impl DqnAgent {
    pub fn new(player: Player, config: DqnConfig) -> Self {
        Self::with_rng(player, config, StdRng::from_os_rng())
    }

    pub fn from_seed(player: Player, config: DqnConfig, seed: u64) -> Self {
        Self::with_rng(player, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(player: Player, config: DqnConfig, rng: StdRng) -> Self {
        let device = Default::default();
        let net_config = QNetworkConfig {};
        let policy_net: QNetwork<TrainBackend> = net_config.init(&device);
        let target_net: QNetwork<InferBackend> = net_config.init(&device);
        let optimizer = AdamConfig::new().init();
        let replay_buffer = ReplayBuffer::new(config.replay_capacity);
        let epsilon = config.epsilon;

        DqnAgent {
            player,
            config,
            epsilon,
            policy_net,
            target_net,
            optimizer,
            replay_buffer,
            device,
            step_count: 0,
            last: None,
            awaiting_outcome: false,
            rng,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Gradient steps taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn buffered_experiences(&self) -> usize {
        self.replay_buffer.len()
    }

    /// Raw policy-network scores for every position, in canonical order.
    pub fn q_values(&self, state: &GameState) -> Vec<f32> {
        let input =
            encode_state::<InferBackend>(state, self.player, &self.device).unsqueeze::<2>();
        self.policy_net
            .valid()
            .forward(input)
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction")
    }

    /// Greedy placement: score every position with the policy network,
    /// mask occupied positions, arg-max with lowest-index tie-break.
    fn greedy_placement(&self, state: &GameState, empties: &[Position]) -> usize {
        let q_vec = self.q_values(state);
        let mut best = empties[0].index();
        let mut best_q = f32::NEG_INFINITY;
        for &p in empties {
            if q_vec[p.index()] > best_q {
                best_q = q_vec[p.index()];
                best = p.index();
            }
        }
        best
    }

    /// Perform one gradient update step from the replay buffer.
    fn train_step(&mut self) -> f32 {
        let batch = self.replay_buffer.sample(self.config.batch_size);
        let batch_size = batch.len();

        let states: Vec<(GameState, Player)> =
            batch.iter().map(|e| (e.state, e.player)).collect();
        let next_states: Vec<(GameState, Player)> =
            batch.iter().map(|e| (e.next_state, e.player)).collect();
        let actions: Vec<usize> = batch.iter().map(|e| e.action).collect();
        let rewards: Vec<f32> = batch.iter().map(|e| e.reward).collect();
        let dones: Vec<bool> = batch.iter().map(|e| e.done).collect();

        // Forward pass on current states: [B, 24]
        let state_tensors = encode_states_batch::<TrainBackend>(&states, &self.device);
        let q_all = self.policy_net.forward(state_tensors);

        // One-hot action mask [B, 24] to extract Q(s, a)
        let mut action_mask_data = vec![0.0f32; batch_size * POSITION_COUNT];
        for (i, &a) in actions.iter().enumerate() {
            action_mask_data[i * POSITION_COUNT + a] = 1.0;
        }
        let action_mask = Tensor::<TrainBackend, 1>::from_data(
            TensorData::from(action_mask_data.as_slice()),
            &self.device,
        )
        .reshape([batch_size as i32, POSITION_COUNT as i32]);

        // Q(s, a) = sum(q_all * mask, dim=1) -> [B, 1]
        let q_taken = (q_all * action_mask).sum_dim(1);

        // Targets from the target network (inference backend, no grad):
        // reward + gamma * max_a' Q_target(s') * (1 - done), with the max
        // taken over all positions.
        let next_state_tensors = encode_states_batch::<InferBackend>(&next_states, &self.device);
        let next_q_all = self.target_net.forward(next_state_tensors);
        let next_q_data: Vec<f32> = next_q_all
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction");

        let mut target_data = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            if dones[i] {
                target_data.push(rewards[i]);
            } else {
                let max_q = next_q_data[i * POSITION_COUNT..(i + 1) * POSITION_COUNT]
                    .iter()
                    .fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
                target_data.push(rewards[i] + self.config.gamma * max_q);
            }
        }

        let targets = Tensor::<TrainBackend, 1>::from_data(
            TensorData::from(target_data.as_slice()),
            &self.device,
        )
        .reshape([batch_size as i32, 1]);

        // MSE loss
        let diff = q_taken - targets;
        let loss = (diff.clone() * diff).mean();

        let loss_val: f32 = loss
            .clone()
            .into_data()
            .to_vec::<f32>()
            .expect("f32 loss tensor extraction")[0];

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.policy_net);

        // Optimizer step: consumes the network, returns the updated one
        self.policy_net =
            self.optimizer
                .step(self.config.learning_rate, self.policy_net.clone(), grads);

        // Periodic hard sync of the target network
        self.step_count += 1;
        if self.step_count % self.config.target_update_interval == 0 {
            self.target_net = self.policy_net.valid();
        }

        loss_val
    }
}

impl Agent for DqnAgent {
    fn select_action(&mut self, state: &GameState) -> Option<Action> {
        match state.phase() {
            Phase::Placing => {
                let empties: Vec<Position> = state.board().empty_positions().collect();
                if empties.is_empty() {
                    return None;
                }
                let index = if self.rng.random_range(0.0..1.0) < self.epsilon {
                    empties[self.rng.random_range(0..empties.len())].index()
                } else {
                    self.greedy_placement(state, &empties)
                };
                self.last = Some((*state, index));
                self.awaiting_outcome = true;
                Position::new(index).map(Action::Place)
            }
            // Non-learning fallback: uniform random legal action, never
            // recorded. The placement anchor is left untouched so the
            // terminal reward can still reach it.
            _ => {
                let actions = state.legal_actions();
                if actions.is_empty() {
                    return None;
                }
                self.awaiting_outcome = false;
                Some(actions[self.rng.random_range(0..actions.len())])
            }
        }
    }

    fn record_outcome(&mut self, reward: f32, next_state: &GameState, done: bool) {
        let Some((state, action)) = self.last else {
            return;
        };
        // Shaping rewards only apply to a just-selected placement;
        // terminal rewards always anchor to the last placement.
        if !done && !self.awaiting_outcome {
            return;
        }
        self.replay_buffer.push(Experience {
            state,
            action,
            reward,
            next_state: *next_state,
            done,
            player: self.player,
        });
        self.awaiting_outcome = false;
        if done {
            self.last = None;
        }
        if self.replay_buffer.len() >= self.config.batch_size {
            self.train_step();
        }
    }

    fn name(&self) -> &str {
        "DQN"
    }

    fn exploration_rate(&self) -> f32 {
        self.epsilon
    }

    fn set_exploration_rate(&mut self, epsilon: f32) {
        self.epsilon = epsilon;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Cell};

    fn pos(name: &str) -> Position {
        Position::from_name(name).unwrap()
    }

    fn small_config() -> DqnConfig {
        DqnConfig {
            batch_size: 4,
            replay_capacity: 64,
            target_update_interval: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_greedy_selection_is_legal_placement() {
        let mut agent = DqnAgent::from_seed(Player::Red, small_config(), 5);
        agent.set_exploration_rate(0.0);
        let mut state = GameState::initial();
        for name in ["a1", "d5", "g7"] {
            state = state.apply(Action::Place(pos(name))).unwrap();
        }
        for _ in 0..10 {
            let action = agent.select_action(&state).unwrap();
            let Action::Place(p) = action else {
                panic!("expected a placement, got {:?}", action);
            };
            assert!(state.board().is_empty_at(p));
        }
    }

    #[test]
    fn test_exploring_selection_is_legal_placement() {
        let mut agent = DqnAgent::from_seed(Player::Blue, small_config(), 6);
        agent.set_exploration_rate(1.0);
        let state = GameState::initial()
            .apply(Action::Place(pos("b4")))
            .unwrap();
        for _ in 0..50 {
            let action = agent.select_action(&state).unwrap();
            assert_ne!(action, Action::Place(pos("b4")));
            assert!(state.legal_actions().contains(&action));
        }
    }

    #[test]
    fn test_movement_fallback_is_legal_and_unrecorded() {
        let mut board = Board::new();
        for name in ["a1", "c4", "e3"] {
            board.set(pos(name), Cell::Red);
        }
        for name in ["g1", "e4", "g7"] {
            board.set(pos(name), Cell::Blue);
        }
        let state = GameState::from_parts(
            board,
            Player::Red,
            Phase::Moving,
            [12, 12],
            [9, 9],
        );

        let mut agent = DqnAgent::from_seed(Player::Red, small_config(), 8);
        let action = agent.select_action(&state).unwrap();
        assert!(matches!(action, Action::Move(_, _)));
        assert!(state.legal_actions().contains(&action));

        // A shaping outcome after a fallback move records nothing.
        let next = state.apply(action).unwrap();
        agent.record_outcome(0.0, &next, false);
        assert_eq!(agent.buffered_experiences(), 0);
    }

    #[test]
    fn test_record_outcome_without_selection_is_noop() {
        let mut agent = DqnAgent::from_seed(Player::Red, small_config(), 9);
        let state = GameState::initial();
        agent.record_outcome(1.0, &state, true);
        assert_eq!(agent.buffered_experiences(), 0);
    }

    #[test]
    fn test_training_triggers_once_buffer_reaches_batch_size() {
        let mut agent = DqnAgent::from_seed(Player::Red, small_config(), 10);
        let state = GameState::initial();

        for i in 0..6 {
            let action = agent.select_action(&state).unwrap();
            let next = state.apply(action).unwrap();
            agent.record_outcome(0.0, &next, false);
            assert_eq!(agent.buffered_experiences(), i + 1);
        }

        // batch_size is 4: training started on the fourth record.
        assert!(agent.step_count() >= 3);
    }

    #[test]
    fn test_terminal_outcome_anchors_last_placement() {
        let mut agent = DqnAgent::from_seed(Player::Red, small_config(), 11);
        let state = GameState::initial();
        let action = agent.select_action(&state).unwrap();
        let next = state.apply(action).unwrap();
        agent.record_outcome(0.3, &next, false);
        assert_eq!(agent.buffered_experiences(), 1);

        // Terminal reward produces one more transition for the same
        // placement, then clears the anchor.
        agent.record_outcome(-1.0, &next, true);
        assert_eq!(agent.buffered_experiences(), 2);
        agent.record_outcome(-1.0, &next, true);
        assert_eq!(agent.buffered_experiences(), 2);
    }

    #[test]
    fn test_q_values_one_per_position() {
        let agent = DqnAgent::from_seed(Player::Red, small_config(), 12);
        let q = agent.q_values(&GameState::initial());
        assert_eq!(q.len(), POSITION_COUNT);
    }
}
