//! Action selection shared by the Q-learning agents.
use crate::utils::iter::{MaximaByKey, PartialMax, PartialMaxError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default scale of the count-based exploration bonus.
pub const DEFAULT_EXPLORATION_BONUS: f64 = 1.5;

/// Count-based optimism applied when extracting a policy from Q-values.
///
/// An action's score is `q + scale / (visit_count + 1)`,
/// favouring state-action pairs that have been updated less often.
/// The bonus never enters the stored estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationBonus {
    pub scale: f64,
}

impl ExplorationBonus {
    pub const fn new(scale: f64) -> Self {
        Self { scale }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, q_value: f64, visit_count: u64) -> f64 {
        q_value + self.scale / (visit_count as f64 + 1.0)
    }
}

impl Default for ExplorationBonus {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_BONUS)
    }
}

/// Epsilon-greedy exploration.
///
/// With probability `exploration_rate` take a uniform random action,
/// otherwise take the greedy action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    pub exploration_rate: f64,
}

impl EpsilonGreedy {
    pub const fn new(exploration_rate: f64) -> Self {
        Self { exploration_rate }
    }

    /// Draw whether the next action explores.
    ///
    /// Uses exactly one draw from `rng`, independent of the draws that pick the action.
    pub fn explore<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.exploration_rate
    }
}

/// Uniformly random element of `items`, or `None` if there are none.
pub fn uniform_choice<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        let index = rng.gen_range(0..items.len());
        Some(items.swap_remove(index))
    }
}

/// An action with the maximum score, with exact ties broken uniformly at random.
///
/// Returns `None` if `actions` is empty or every score is NaN.
pub fn argmax_ties<A, F, R>(actions: Vec<A>, score: F, rng: &mut R) -> Option<A>
where
    F: FnMut(&A) -> f64,
    R: Rng + ?Sized,
{
    uniform_choice(actions.into_iter().maxima_by_key(score), rng)
}

/// Maximum of `q_value` over `actions`; 0 if there are no actions.
pub fn state_value<A, F>(actions: &[A], q_value: F) -> f64
where
    F: FnMut(&A) -> f64,
{
    match actions.iter().map(q_value).partial_max() {
        Ok(value) => value,
        Err(PartialMaxError::Empty) => 0.0,
        Err(PartialMaxError::Incomparable) => f64::NAN,
    }
}
