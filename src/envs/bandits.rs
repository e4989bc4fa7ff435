use super::{Environment, Game};
use crate::Prng;
use std::fmt;

/// A multi-armed bandit with deterministic arm rewards.
///
/// There is a single state `()` and one action per arm.
/// Pulling an arm yields its value as reward and returns to the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicBandit {
    values: Vec<f64>,
}

impl DeterministicBandit {
    /// Create a new bandit with the given arm values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn num_arms(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for DeterministicBandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DeterministicBandit({:?})", self.values)
    }
}

impl Game for DeterministicBandit {
    type State = ();
    type Action = usize;

    fn actions(&self, _state: &()) -> Vec<usize> {
        (0..self.values.len()).collect()
    }
}

impl Environment for DeterministicBandit {
    fn initial_state(&self) {}

    fn step(&self, _state: &(), action: &usize, _rng: &mut Prng) -> ((), f64) {
        ((), self.values[*action])
    }

    fn reward_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
    }
}

#[cfg(test)]
mod deterministic_bandit {
    use super::super::testing;
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn run() {
        testing::run_random(DeterministicBandit::from_values(vec![0.0, 1.0]), 1000, 0);
    }

    #[test]
    fn one_action_per_arm() {
        let env = DeterministicBandit::from_values(vec![0.5, -1.0, 2.0]);
        assert_eq!(env.actions(&()), vec![0, 1, 2]);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn reward_is_arm_value() {
        let env = DeterministicBandit::from_values(vec![0.5, -1.0, 2.0]);
        let mut rng = Prng::seed_from_u64(0);
        assert_eq!(env.step(&(), &1, &mut rng), ((), -1.0));
        assert_eq!(env.reward_range(), (-1.0, 2.0));
    }
}
