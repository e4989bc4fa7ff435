//! Q-learning agents
mod config;
mod error;
mod linear;
pub mod policy;
mod tables;
mod tabular;
#[cfg(test)]
pub mod testing;

pub use config::QLearningConfig;
pub use error::BuildAgentError;
pub use linear::LinearQAgent;
pub use policy::{EpsilonGreedy, ExplorationBonus, DEFAULT_EXPLORATION_BONUS};
pub use tables::{QTable, StateActionTable, VisitCounts, Weights};
pub use tabular::TabularQLearningAgent;

use crate::logging::Logger;

/// A Q-learning agent.
///
/// Estimates action values `Q(s, a)` from observed transitions
/// and acts epsilon-greedily with respect to those estimates.
///
/// An agent learns from the transitions it is given through [`QAgent::update`];
/// it never steps the environment itself.
pub trait QAgent<S, A> {
    /// Estimated value of taking `action` in `state`.
    ///
    /// Is exactly 0 for a pair that has never contributed to an update.
    fn q_value(&self, state: &S, action: &A) -> f64;

    /// Estimated value of `state`: `max_a Q(state, a)`.
    ///
    /// Is 0 if `state` has no available actions.
    fn value(&self, state: &S) -> f64;

    /// The greedy action in `state` according to exploration-bonus-adjusted Q-values.
    ///
    /// Exact ties are broken uniformly at random.
    ///
    /// # Panics
    /// If `state` has no available actions. Use [`QAgent::act`] when that may be the case.
    fn best_policy(&mut self, state: &S) -> A;

    /// Choose an action in `state`, exploring with the configured probability.
    ///
    /// Returns `None` if `state` has no available actions.
    fn act(&mut self, state: &S) -> Option<A> {
        self.act_logged(state, &mut ())
    }

    /// Choose an action as in [`QAgent::act`], logging whether it explored.
    fn act_logged(&mut self, state: &S, logger: &mut dyn Logger) -> Option<A>;

    /// Update the estimates from a transition `state --action--> next_state` yielding `reward`.
    ///
    /// Returns the updated estimate of `Q(state, action)`.
    fn update(&mut self, state: &S, action: &A, next_state: &S, reward: f64) -> f64 {
        self.update_logged(state, action, next_state, reward, &mut ())
    }

    /// Update as in [`QAgent::update`], logging statistics of the update.
    fn update_logged(
        &mut self,
        state: &S,
        action: &A,
        next_state: &S,
        reward: f64,
        logger: &mut dyn Logger,
    ) -> f64;
}
