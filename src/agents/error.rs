//! Agent errors
use thiserror::Error;

/// Error building an agent
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BuildAgentError {
    #[error("discount factor {0} is not in [0, 1]")]
    InvalidDiscountFactor(f64),
    #[error("learning rate {0} is not in (0, 1]")]
    InvalidLearningRate(f64),
    #[error("exploration rate {0} is not in [0, 1]")]
    InvalidExplorationRate(f64),
    #[error("exploration bonus {0} must be finite and non-negative")]
    InvalidExplorationBonus(f64),
}
