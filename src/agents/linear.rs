//! Linear function approximation agents
use super::policy::{self, EpsilonGreedy, ExplorationBonus};
use super::{QAgent, QLearningConfig, VisitCounts, Weights};
use crate::envs::Game;
use crate::features::FeatureExtractor;
use crate::logging::{Event, Logger};
use crate::Prng;
use rand::Rng;
use std::fmt;
use std::hash::Hash;

/// An epsilon-greedy Q-learning agent with a linear value function.
///
/// Action values are a weighted sum of features: `Q(s, a) = Σ_i w_i f_i(s, a)`.
/// Each update takes a semi-gradient TD(0) step
/// `w_i ← w_i + α Δ f_i(s, a)` where `Δ = r + γ V(s') - Q(s, a)`.
///
/// # Visit counts
/// Greedy actions use the same exploration bonus rule as
/// [`TabularQLearningAgent`](super::TabularQLearningAgent), but this agent's updates never
/// increment its visit counts. The bonus is therefore the same constant `C` for every action
/// and does not change which action is greedy.
pub struct LinearQAgent<G: Game, E, K: Eq + Hash, R = Prng> {
    pub game: G,
    pub extractor: E,
    pub discount_factor: f64,
    pub learning_rate: f64,
    pub exploration: EpsilonGreedy,
    pub bonus: ExplorationBonus,

    weights: Weights<K>,
    visit_counts: VisitCounts<G::State, G::Action>,
    rng: R,
}

impl<G: Game, E, K: Eq + Hash, R> LinearQAgent<G, E, K, R> {
    /// Create a new agent.
    ///
    /// The configuration is used as-is; see [`QLearningConfig::build_linear`]
    /// for a constructor that validates it.
    pub fn new(game: G, extractor: E, config: &QLearningConfig, rng: R) -> Self {
        Self {
            game,
            extractor,
            discount_factor: config.discount_factor,
            learning_rate: config.learning_rate,
            exploration: EpsilonGreedy::new(config.exploration_rate),
            bonus: ExplorationBonus::new(config.exploration_bonus),
            weights: Weights::new(),
            visit_counts: VisitCounts::new(),
            rng,
        }
    }

    /// Weight of a feature; 0 if it has never been updated.
    pub fn weight(&self, feature: &K) -> f64 {
        self.weights.get(feature)
    }

    pub const fn weights(&self) -> &Weights<K> {
        &self.weights
    }
}

impl<G, E, K, R> LinearQAgent<G, E, K, R>
where
    G: Game,
    G::State: Eq + Hash,
    G::Action: Eq + Hash,
    K: Eq + Hash,
{
    /// Number of updates counted for a state-action pair. Always 0 for this agent.
    pub fn visit_count(&self, state: &G::State, action: &G::Action) -> u64 {
        self.visit_counts.value(state, action)
    }
}

impl<G, E, K, R> LinearQAgent<G, E, K, R>
where
    G: Game,
    E: FeatureExtractor<G::State, G::Action, K>,
    K: Eq + Hash,
{
    fn approx_q_value(&self, state: &G::State, action: &G::Action) -> f64 {
        self.weights.dot(&self.extractor.extract(state, action))
    }

    fn approx_value(&self, state: &G::State) -> f64 {
        policy::state_value(&self.game.actions(state), |action| {
            self.approx_q_value(state, action)
        })
    }

    /// Temporal difference error `r + γ V(s') - Q(s, a)` of a transition.
    ///
    /// Uses the current weights for both terms.
    pub fn td_error(
        &self,
        state: &G::State,
        action: &G::Action,
        next_state: &G::State,
        reward: f64,
    ) -> f64 {
        reward + self.discount_factor * self.approx_value(next_state)
            - self.approx_q_value(state, action)
    }
}

impl<G, E, K, R> LinearQAgent<G, E, K, R>
where
    G: Game,
    G::State: Eq + Hash,
    G::Action: Eq + Hash,
    E: FeatureExtractor<G::State, G::Action, K>,
    K: Eq + Hash,
    R: Rng,
{
    /// The best of `actions` by bonus-adjusted value; `None` if there are no actions.
    fn best_of(&mut self, state: &G::State, actions: Vec<G::Action>) -> Option<G::Action> {
        let weights = &self.weights;
        let extractor = &self.extractor;
        let visit_counts = &self.visit_counts;
        let bonus = self.bonus;
        policy::argmax_ties(
            actions,
            |action| {
                bonus.score(
                    weights.dot(&extractor.extract(state, action)),
                    visit_counts.value(state, action),
                )
            },
            &mut self.rng,
        )
    }
}

impl<G: Game, E, K: Eq + Hash, R> fmt::Display for LinearQAgent<G, E, K, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LinearQAgent(γ={}, α={}, ε={}, C={})",
            self.discount_factor,
            self.learning_rate,
            self.exploration.exploration_rate,
            self.bonus.scale
        )
    }
}

impl<G, E, K, R> QAgent<G::State, G::Action> for LinearQAgent<G, E, K, R>
where
    G: Game,
    G::State: Eq + Hash,
    G::Action: Eq + Hash,
    E: FeatureExtractor<G::State, G::Action, K>,
    K: Eq + Hash,
    R: Rng,
{
    fn q_value(&self, state: &G::State, action: &G::Action) -> f64 {
        self.approx_q_value(state, action)
    }

    fn value(&self, state: &G::State) -> f64 {
        self.approx_value(state)
    }

    fn best_policy(&mut self, state: &G::State) -> G::Action {
        let actions = self.game.actions(state);
        self.best_of(state, actions)
            .expect("best_policy requires a state with available actions")
    }

    fn act_logged(&mut self, state: &G::State, logger: &mut dyn Logger) -> Option<G::Action> {
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return None;
        }
        let explore = self.exploration.explore(&mut self.rng);
        let _ = logger.log(Event::AgentAct, "explore", explore.into());
        logger.done(Event::AgentAct);

        if explore {
            policy::uniform_choice(actions, &mut self.rng)
        } else {
            self.best_of(state, actions)
        }
    }

    /// Take a TD step on the weights of the features of `(state, action)`.
    ///
    /// Returns `Q(s, a) + α Δ Σ_i f_i²`, the estimate of `Q(state, action)` after the step.
    fn update_logged(
        &mut self,
        state: &G::State,
        action: &G::Action,
        next_state: &G::State,
        reward: f64,
        logger: &mut dyn Logger,
    ) -> f64 {
        let features = self.extractor.extract(state, action);
        let old_q_value = self.weights.dot(&features);
        let target = reward + self.discount_factor * self.approx_value(next_state);
        let td_error = target - old_q_value;

        let squared_norm: f64 = features.values().map(|f| f * f).sum();
        for (feature, magnitude) in features {
            self.weights.add(feature, self.learning_rate * td_error * magnitude);
        }
        let q_value = old_q_value + self.learning_rate * td_error * squared_norm;

        let _ = logger.log(Event::AgentUpdate, "target", target.into());
        let _ = logger.log(Event::AgentUpdate, "td_error", td_error.into());
        let _ = logger.log(Event::AgentUpdate, "q_value", q_value.into());
        logger.done(Event::AgentUpdate);
        q_value
    }
}
