//! Environment testing utilities
use super::Environment;
use crate::Prng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Run an environment with uniform random actions and check that invariants are satisfied.
///
/// Stops early on reaching a terminal state.
pub fn run_random<E: Environment>(env: E, num_steps: u64, seed: u64) {
    let (min_reward, max_reward) = env.reward_range();
    let mut rng = Prng::seed_from_u64(seed);

    let mut state = env.initial_state();
    for _ in 0..num_steps {
        let actions = env.actions(&state);
        let action = match actions.choose(&mut rng) {
            Some(action) => action,
            None => return,
        };
        let (next_state, reward) = env.step(&state, action, &mut rng);
        assert!(reward >= min_reward);
        assert!(reward <= max_reward);
        state = next_state;
    }
}
