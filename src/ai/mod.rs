mod agent;
mod dqn;
mod network;
mod random;
pub mod state_encoding;
mod tabular;

pub use agent::{Agent, Experience};
pub use dqn::{DqnAgent, DqnConfig};
pub use network::{QNetwork, QNetworkConfig};
pub use random::RandomAgent;
pub use tabular::{TabularConfig, TabularQAgent};
