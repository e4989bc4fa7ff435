//! Games that agents learn to play
mod bandits;
mod chain;
#[cfg(test)]
pub mod testing;

pub use bandits::DeterministicBandit;
pub use chain::{Chain, Move};

use crate::Prng;

/// The action structure of a game.
///
/// This is all a Q-learning agent needs to know about its environment:
/// which actions are available in each state.
pub trait Game {
    type State;
    type Action;

    /// The actions available in `state`.
    ///
    /// A state with no actions is terminal.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;
}

impl<G: Game + ?Sized> Game for &G {
    type State = G::State;
    type Action = G::Action;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        G::actions(self, state)
    }
}

impl<G: Game + ?Sized> Game for Box<G> {
    type State = G::State;
    type Action = G::Action;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        G::actions(self, state)
    }
}

/// A game with known dynamics that can be simulated.
///
/// Agents never call these methods; they exist for whatever drives the agent.
pub trait Environment: Game {
    /// The state in which each episode starts.
    fn initial_state(&self) -> Self::State;

    /// Sample a state transition.
    ///
    /// # Returns
    /// * `state`: The resulting state.
    /// * `reward`: The reward value for this transition.
    fn step(
        &self,
        state: &Self::State,
        action: &Self::Action,
        rng: &mut Prng,
    ) -> (Self::State, f64);

    /// A lower and upper bound on possible reward values.
    ///
    /// These bounds are not required to be tight but ideally will be as tight as possible.
    fn reward_range(&self) -> (f64, f64);
}
