//! Tabular agents
use super::policy::{self, EpsilonGreedy, ExplorationBonus};
use super::{QAgent, QLearningConfig, QTable, VisitCounts};
use crate::envs::Game;
use crate::logging::{Event, Logger};
use crate::Prng;
use rand::Rng;
use std::fmt;
use std::hash::Hash;

/// An epsilon-greedy tabular Q-learning agent.
///
/// Stores an explicit estimate for each state-action pair and updates it by a running average
/// `Q(s, a) ← (1 - α) Q(s, a) + α (r + γ V(s'))`.
///
/// Greedy actions maximize `Q(s, a) + C / (n(s, a) + 1)` where `n(s, a)` counts the updates of
/// that pair. The bonus only affects action choice; the stored estimates never include it.
pub struct TabularQLearningAgent<G: Game, R = Prng> {
    pub game: G,
    pub discount_factor: f64,
    pub learning_rate: f64,
    pub exploration: EpsilonGreedy,
    pub bonus: ExplorationBonus,

    q_table: QTable<G::State, G::Action>,
    visit_counts: VisitCounts<G::State, G::Action>,
    rng: R,
}

impl<G: Game, R> TabularQLearningAgent<G, R> {
    /// Create a new agent.
    ///
    /// The configuration is used as-is; see [`QLearningConfig::build_tabular`]
    /// for a constructor that validates it.
    pub fn new(game: G, config: &QLearningConfig, rng: R) -> Self {
        Self {
            game,
            discount_factor: config.discount_factor,
            learning_rate: config.learning_rate,
            exploration: EpsilonGreedy::new(config.exploration_rate),
            bonus: ExplorationBonus::new(config.exploration_bonus),
            q_table: QTable::new(),
            visit_counts: VisitCounts::new(),
            rng,
        }
    }

    pub const fn q_table(&self) -> &QTable<G::State, G::Action> {
        &self.q_table
    }

    pub const fn visit_counts(&self) -> &VisitCounts<G::State, G::Action> {
        &self.visit_counts
    }
}

impl<G, R> TabularQLearningAgent<G, R>
where
    G: Game,
    G::State: Eq + Hash,
    G::Action: Eq + Hash,
{
    /// Number of updates applied to a state-action pair.
    pub fn visit_count(&self, state: &G::State, action: &G::Action) -> u64 {
        self.visit_counts.value(state, action)
    }
}

impl<G, R> TabularQLearningAgent<G, R>
where
    G: Game,
    G::State: Eq + Hash,
    G::Action: Eq + Hash,
    R: Rng,
{
    /// The best of `actions` by bonus-adjusted value; `None` if there are no actions.
    fn best_of(&mut self, state: &G::State, actions: Vec<G::Action>) -> Option<G::Action> {
        let q_table = &self.q_table;
        let visit_counts = &self.visit_counts;
        let bonus = self.bonus;
        policy::argmax_ties(
            actions,
            |action| {
                bonus.score(
                    q_table.value(state, action),
                    visit_counts.value(state, action),
                )
            },
            &mut self.rng,
        )
    }
}

impl<G: Game, R> fmt::Display for TabularQLearningAgent<G, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TabularQLearningAgent(γ={}, α={}, ε={}, C={})",
            self.discount_factor,
            self.learning_rate,
            self.exploration.exploration_rate,
            self.bonus.scale
        )
    }
}

impl<G, R> QAgent<G::State, G::Action> for TabularQLearningAgent<G, R>
where
    G: Game,
    G::State: Eq + Hash + Clone,
    G::Action: Eq + Hash + Clone,
    R: Rng,
{
    fn q_value(&self, state: &G::State, action: &G::Action) -> f64 {
        self.q_table.value(state, action)
    }

    fn value(&self, state: &G::State) -> f64 {
        policy::state_value(&self.game.actions(state), |action| {
            self.q_value(state, action)
        })
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

    fn update_logged(
        &mut self,
        state: &G::State,
        action: &G::Action,
        next_state: &G::State,
        reward: f64,
        logger: &mut dyn Logger,
    ) -> f64 {
        let target = reward + self.discount_factor * self.value(next_state);

        let q_value = self.q_table.entry(state, action);
        *q_value = (1.0 - self.learning_rate) * *q_value + self.learning_rate * target;
        let q_value = *q_value;
        *self.visit_counts.entry(state, action) += 1;

        let _ = logger.log(Event::AgentUpdate, "target", target.into());
        let _ = logger.log(Event::AgentUpdate, "q_value", q_value.into());
        logger.done(Event::AgentUpdate);
        q_value
    }
}
