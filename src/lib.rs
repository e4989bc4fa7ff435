//! Tabular and linear Q-learning agents.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::for_kv_map)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod agents;
pub mod envs;
pub mod features;
pub mod logging;
pub mod utils;

pub use agents::{BuildAgentError, LinearQAgent, QAgent, QLearningConfig, TabularQLearningAgent};
pub use envs::{Environment, Game};
pub use features::{FeatureExtractor, FeatureVector, IndicatorFeatures};

/// Pseudo-random number generator type used by agents and environments.
pub type Prng = rand_chacha::ChaCha8Rng;
