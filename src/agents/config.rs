//! Q-learning agent configuration
use super::policy::DEFAULT_EXPLORATION_BONUS;
use super::{BuildAgentError, LinearQAgent, TabularQLearningAgent};
use crate::envs::Game;
use crate::Prng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Configuration shared by the tabular and linear Q-learning agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Discount factor `γ` applied to the value of the next state. In `[0, 1]`.
    pub discount_factor: f64,
    /// Step size `α` of each update. In `(0, 1]`.
    pub learning_rate: f64,
    /// Probability `ε` of taking a uniform random action. In `[0, 1]`.
    pub exploration_rate: f64,
    /// Scale `C` of the `C / (visit_count + 1)` bonus used when extracting the best action.
    #[serde(default = "default_exploration_bonus")]
    pub exploration_bonus: f64,
}

const fn default_exploration_bonus() -> f64 {
    DEFAULT_EXPLORATION_BONUS
}

impl QLearningConfig {
    pub const fn new(discount_factor: f64, learning_rate: f64, exploration_rate: f64) -> Self {
        Self {
            discount_factor,
            learning_rate,
            exploration_rate,
            exploration_bonus: DEFAULT_EXPLORATION_BONUS,
        }
    }

    #[must_use]
    pub const fn with_exploration_bonus(self, exploration_bonus: f64) -> Self {
        Self {
            exploration_bonus,
            ..self
        }
    }

    /// Check that every parameter is within its valid range.
    ///
    /// # Errors
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), BuildAgentError> {
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(BuildAgentError::InvalidDiscountFactor(self.discount_factor));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(BuildAgentError::InvalidLearningRate(self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(BuildAgentError::InvalidExplorationRate(
                self.exploration_rate,
            ));
        }
        if !(self.exploration_bonus.is_finite() && self.exploration_bonus >= 0.0) {
            return Err(BuildAgentError::InvalidExplorationBonus(
                self.exploration_bonus,
            ));
        }
        Ok(())
    }

    /// Build a tabular agent with a random number generator seeded from `seed`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn build_tabular<G: Game>(
        &self,
        game: G,
        seed: u64,
    ) -> Result<TabularQLearningAgent<G>, BuildAgentError> {
        self.validate()?;
        Ok(TabularQLearningAgent::new(
            game,
            self,
            Prng::seed_from_u64(seed),
        ))
    }

    /// Build a tabular agent with a random number generator seeded from system entropy.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn build_tabular_from_entropy<G: Game>(
        &self,
        game: G,
    ) -> Result<TabularQLearningAgent<G>, BuildAgentError> {
        self.validate()?;
        Ok(TabularQLearningAgent::new(game, self, Prng::from_entropy()))
    }

    /// Build a linear agent with a random number generator seeded from `seed`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn build_linear<G: Game, E, K: Eq + Hash>(
        &self,
        game: G,
        extractor: E,
        seed: u64,
    ) -> Result<LinearQAgent<G, E, K>, BuildAgentError> {
        self.validate()?;
        Ok(LinearQAgent::new(
            game,
            extractor,
            self,
            Prng::seed_from_u64(seed),
        ))
    }

    /// Build a linear agent with a random number generator seeded from system entropy.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn build_linear_from_entropy<G: Game, E, K: Eq + Hash>(
        &self,
        game: G,
        extractor: E,
    ) -> Result<LinearQAgent<G, E, K>, BuildAgentError> {
        self.validate()?;
        Ok(LinearQAgent::new(
            game,
            extractor,
            self,
            Prng::from_entropy(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0, 0.0)]
    #[case(1.0, 0.01, 1.0)]
    #[case(0.9, 0.5, 0.1)]
    fn valid(#[case] discount_factor: f64, #[case] learning_rate: f64, #[case] exploration: f64) {
        assert_eq!(
            QLearningConfig::new(discount_factor, learning_rate, exploration).validate(),
            Ok(())
        );
    }

    #[rstest]
    #[case(QLearningConfig::new(1.5, 0.5, 0.1), BuildAgentError::InvalidDiscountFactor(1.5))]
    #[case(QLearningConfig::new(-0.1, 0.5, 0.1), BuildAgentError::InvalidDiscountFactor(-0.1))]
    #[case(QLearningConfig::new(0.9, 0.0, 0.1), BuildAgentError::InvalidLearningRate(0.0))]
    #[case(QLearningConfig::new(0.9, 1.1, 0.1), BuildAgentError::InvalidLearningRate(1.1))]
    #[case(QLearningConfig::new(0.9, 0.5, 2.0), BuildAgentError::InvalidExplorationRate(2.0))]
    #[case(
        QLearningConfig::new(0.9, 0.5, 0.1).with_exploration_bonus(-1.0),
        BuildAgentError::InvalidExplorationBonus(-1.0)
    )]
    fn invalid(#[case] config: QLearningConfig, #[case] expected: BuildAgentError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn nan_is_invalid() {
        assert!(QLearningConfig::new(f64::NAN, 0.5, 0.1).validate().is_err());
        assert!(QLearningConfig::new(0.9, f64::NAN, 0.1).validate().is_err());
        assert!(QLearningConfig::new(0.9, 0.5, f64::NAN).validate().is_err());
    }

    #[test]
    fn build_rejects_invalid() {
        let game = crate::envs::DeterministicBandit::from_values(vec![0.0, 1.0]);
        let result = QLearningConfig::new(0.9, 0.0, 0.1).build_tabular(game, 0);
        assert!(matches!(
            result,
            Err(BuildAgentError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn deserialize_default_bonus() {
        let config: QLearningConfig = serde_json::from_str(
            r#"{"discount_factor": 0.9, "learning_rate": 0.5, "exploration_rate": 0.1}"#,
        )
        .unwrap();
        assert_eq!(config, QLearningConfig::new(0.9, 0.5, 0.1));
    }

    #[test]
    fn serialize_json() {
        let config = QLearningConfig::new(0.9, 0.5, 0.1).with_exploration_bonus(2.0);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<QLearningConfig>(&json).unwrap(), config);
    }
}
