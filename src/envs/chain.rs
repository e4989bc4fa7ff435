//! Chain environment
use super::{Environment, Game};
use crate::Prng;
use rand::Rng;

/// Chain Environment
///
/// Consists of n states in a line with 2 actions.
/// * Action `Left` moves back to the start for 2 reward.
/// * Action `Right` moves forward for 0 reward in all states but the last.
///     In the last state, taking `Right` is a self-transition with 10 reward.
/// * Every action has a `slip_prob` chance of "slipping" and taking the opposite action.
///
/// Described in "Bayesian Q-learning" by Dearden, Friedman and Russel (1998)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chain {
    pub size: u64,
    pub slip_prob: f64,
}

impl Chain {
    pub const fn new(size: u64, slip_prob: f64) -> Self {
        Self { size, slip_prob }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(5, 0.2)
    }
}

impl Game for Chain {
    type State = u64;
    type Action = Move;

    fn actions(&self, _state: &u64) -> Vec<Move> {
        vec![Move::Left, Move::Right]
    }
}

impl Environment for Chain {
    fn initial_state(&self) -> u64 {
        0
    }

    fn step(&self, state: &u64, action: &Move, rng: &mut Prng) -> (u64, f64) {
        let mut action = *action;
        if rng.gen::<f64>() < self.slip_prob {
            action = action.swap();
        }
        match action {
            Move::Left => (0, 2.0),
            Move::Right => {
                if *state + 1 >= self.size {
                    (*state, 10.0)
                } else {
                    (*state + 1, 0.0)
                }
            }
        }
    }

    fn reward_range(&self) -> (f64, f64) {
        (0.0, 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
}

impl Move {
    const fn swap(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}
