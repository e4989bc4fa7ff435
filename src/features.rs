//! Feature extraction for linear value approximation
use std::collections::HashMap;
use std::hash::Hash;

/// Sparse named features of a state-action pair.
///
/// Features absent from the map have magnitude 0.
pub type FeatureVector<K> = HashMap<K, f64>;

/// Maps a state-action pair to a sparse feature vector.
pub trait FeatureExtractor<S, A, K> {
    /// Extract the features of taking `action` in `state`.
    fn extract(&self, state: &S, action: &A) -> FeatureVector<K>;
}

impl<S, A, K, F> FeatureExtractor<S, A, K> for F
where
    F: Fn(&S, &A) -> FeatureVector<K> + ?Sized,
{
    fn extract(&self, state: &S, action: &A) -> FeatureVector<K> {
        self(state, action)
    }
}

/// One-hot features: a single feature `(state, action)` with magnitude 1.
///
/// A linear agent using these features keeps one independent weight per state-action pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorFeatures;

impl<S, A> FeatureExtractor<S, A, (S, A)> for IndicatorFeatures
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    fn extract(&self, state: &S, action: &A) -> FeatureVector<(S, A)> {
        let mut features = HashMap::with_capacity(1);
        features.insert((state.clone(), action.clone()), 1.0);
        features
    }
}
