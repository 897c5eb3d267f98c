use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use crate::game::POSITION_COUNT;

/// Q-network architecture for the placing phase.
///
/// ```text
/// Input:  [batch, 24]  (0 empty, +1 own, -1 opponent, canonical order)
/// FC1:    24 -> 128, ReLU
/// FC2:    128 -> 64, ReLU
/// FC3:    64 -> 24   (Q-values, one per board position)
/// ```
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct QNetworkConfig {}

impl QNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            fc1: LinearConfig::new(POSITION_COUNT, 128).init(device),
            fc2: LinearConfig::new(128, 64).init(device),
            fc3: LinearConfig::new(64, POSITION_COUNT).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: input [batch, 24] -> output [batch, 24] Q-values.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(input));
        let x = self.relu.forward(self.fc2.forward(x));
        self.fc3.forward(x)
    }
}
