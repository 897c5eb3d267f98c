use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::{GameState, Player, Position, POSITION_COUNT};

/// Encode a board player-relatively as one entry per position in
/// canonical order: 0.0 empty, +1.0 owned by `player`, -1.0 opponent.
pub fn encode_cells(state: &GameState, player: Player) -> [f32; POSITION_COUNT] {
    let mut data = [0.0f32; POSITION_COUNT];
    let own = player.to_cell();
    let theirs = player.other().to_cell();
    for pos in Position::all() {
        let cell = state.board().get(pos);
        if cell == own {
            data[pos.index()] = 1.0;
        } else if cell == theirs {
            data[pos.index()] = -1.0;
        }
    }
    data
}

/// The same encoding as a hashable key for the tabular agent.
pub fn encode_key(state: &GameState, player: Player) -> [i8; POSITION_COUNT] {
    let cells = encode_cells(state, player);
    let mut key = [0i8; POSITION_COUNT];
    for (k, v) in key.iter_mut().zip(cells) {
        *k = v as i8;
    }
    key
}

/// Encode a single state as a tensor of shape [24].
pub fn encode_state<B: Backend>(
    state: &GameState,
    player: Player,
    device: &B::Device,
) -> Tensor<B, 1> {
    let data = encode_cells(state, player);
    Tensor::<B, 1>::from_data(TensorData::from(data.as_slice()), device)
}

/// Encode multiple states (all from one agent's perspective, as stored in
/// its replay buffer) as a batched tensor of shape [batch, 24].
pub fn encode_states_batch<B: Backend>(
    states: &[(GameState, Player)],
    device: &B::Device,
) -> Tensor<B, 2> {
    let batch_size = states.len();
    let mut flat = Vec::with_capacity(batch_size * POSITION_COUNT);
    for (state, player) in states {
        flat.extend_from_slice(&encode_cells(state, *player));
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([batch_size as i32, POSITION_COUNT as i32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn pos(name: &str) -> Position {
        Position::from_name(name).unwrap()
    }

    #[test]
    fn test_encode_initial_state_is_zero() {
        let state = GameState::initial();
        let cells = encode_cells(&state, Player::Red);
        assert!(cells.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_encoding_is_player_relative() {
        let state = GameState::initial()
            .apply(Action::Place(pos("a1")))
            .unwrap();
        let red_view = encode_cells(&state, Player::Red);
        let blue_view = encode_cells(&state, Player::Blue);
        let a1 = pos("a1").index();
        assert_eq!(red_view[a1], 1.0);
        assert_eq!(blue_view[a1], -1.0);
    }

    #[test]
    fn test_key_matches_cells() {
        let state = GameState::initial()
            .apply(Action::Place(pos("d5")))
            .unwrap();
        let cells = encode_cells(&state, Player::Blue);
        let key = encode_key(&state, Player::Blue);
        for (c, k) in cells.iter().zip(key) {
            assert_eq!(*c as i8, k);
        }
    }

    #[test]
    fn test_encode_state_shape() {
        let state = GameState::initial();
        let device = Default::default();
        let tensor = encode_state::<TestBackend>(&state, Player::Red, &device);
        assert_eq!(tensor.shape().dims, [24]);
    }

    #[test]
    fn test_encode_batch_shape() {
        let s1 = GameState::initial();
        let s2 = s1.apply(Action::Place(pos("g7"))).unwrap();
        let device = Default::default();
        let batch = encode_states_batch::<TestBackend>(
            &[(s1, Player::Red), (s2, Player::Red)],
            &device,
        );
        assert_eq!(batch.shape().dims, [2, 24]);
    }
}
