//! Agent testing utilities
use super::QAgent;
use crate::envs::{DeterministicBandit, Environment, Game};
use crate::logging::{Event, LogError, Loggable, Logger};
use crate::Prng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::hash::Hash;

/// States `0 .. num_states` where the last state is terminal.
///
/// Every other state offers the same actions. The agents never step a game
/// so no transitions are defined; tests supply them directly to `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGame {
    pub num_states: u8,
    pub actions: Vec<char>,
}

impl LineGame {
    pub fn new(num_states: u8, actions: &str) -> Self {
        Self {
            num_states,
            actions: actions.chars().collect(),
        }
    }
}

impl Game for LineGame {
    type State = u8;
    type Action = char;

    fn actions(&self, state: &u8) -> Vec<char> {
        if *state + 1 >= self.num_states {
            Vec::new()
        } else {
            self.actions.clone()
        }
    }
}

/// Logger that records every logged value.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    pub values: Vec<(Event, &'static str, Loggable)>,
    pub done: Vec<Event>,
}

impl RecordingLogger {
    /// The most recent scalar logged under `name` for `event`.
    pub fn scalar(&self, event: Event, name: &str) -> Option<f64> {
        self.values
            .iter()
            .rev()
            .find(|(e, n, _)| *e == event && *n == name)
            .and_then(|(_, _, value)| match value {
                Loggable::Scalar(x) => Some(*x),
                Loggable::Nothing => None,
            })
    }
}

impl Logger for RecordingLogger {
    fn log(&mut self, event: Event, name: &'static str, value: Loggable) -> Result<(), LogError> {
        self.values.push((event, name, value));
        Ok(())
    }

    fn done(&mut self, event: Event) {
        self.done.push(event);
    }
}

/// Count the actions chosen by [`QAgent::act`] over `num_samples` calls in `state`.
pub fn count_actions<S, A, T>(agent: &mut T, state: &S, num_samples: u64) -> HashMap<A, u64>
where
    A: Eq + Hash,
    T: QAgent<S, A>,
{
    let mut counts = HashMap::new();
    for _ in 0..num_samples {
        let action = agent.act(state).expect("state has no actions");
        *counts.entry(action).or_insert(0) += 1;
    }
    counts
}

/// Count the actions chosen by [`QAgent::best_policy`] over `num_samples` calls in `state`.
pub fn count_best_policy<S, A, T>(agent: &mut T, state: &S, num_samples: u64) -> HashMap<A, u64>
where
    A: Eq + Hash,
    T: QAgent<S, A>,
{
    let mut counts = HashMap::new();
    for _ in 0..num_samples {
        *counts.entry(agent.best_policy(state)).or_insert(0) += 1;
    }
    counts
}

/// Check that the agent can be trained to perform well on a trivial bandit environment.
///
/// The environment is a deterministic multi-armed bandit with two arms:
/// the first arm always gives 0 reward and the second 1.
/// After training, at least a `threshold` fraction of greedy actions must pick the second arm.
pub fn train_deterministic_bandit<T, F>(make_agent: F, num_train_steps: u64, threshold: f64)
where
    T: QAgent<(), usize>,
    F: FnOnce(DeterministicBandit) -> T,
{
    let env = DeterministicBandit::from_values(vec![0.0, 1.0]);
    let mut agent = make_agent(env.clone());
    let mut rng = Prng::seed_from_u64(0);

    for _ in 0..num_train_steps {
        let state = env.initial_state();
        let action = agent.act(&state).expect("bandit has no arms");
        let (next_state, reward) = env.step(&state, &action, &mut rng);
        agent.update(&state, &action, &next_state, reward);
    }

    let num_eval_steps = 1000;
    let counts = count_best_policy(&mut agent, &(), num_eval_steps);
    let action_1_count = counts.get(&1).copied().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let min_count = num_eval_steps as f64 * threshold;
    #[allow(clippy::cast_precision_loss)]
    let passed = action_1_count as f64 >= min_count;
    assert!(passed, "{:?}", counts);
}
