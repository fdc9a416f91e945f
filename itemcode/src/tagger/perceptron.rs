//! Averaged perceptron over BIO tags.

use super::types::BioTag;
use std::collections::HashMap;

/// Weight vector indexed by [`BioTag::index`].
pub type TagWeights = [f32; 3];

#[derive(Debug, Clone, Default)]
struct FeatureState {
    weights: TagWeights,
    totals: [f64; 3],
    stamps: [u64; 3],
}

/// Perceptron with lazily accumulated weight averages.
#[derive(Debug, Clone, Default)]
pub struct AveragedPerceptron {
    features: HashMap<String, FeatureState>,
    instances: u64,
}

impl AveragedPerceptron {
    /// Start with all weights at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously averaged weights.
    pub fn from_weights(weights: &HashMap<String, TagWeights>) -> Self {
        let features = weights
            .iter()
            .map(|(name, w)| {
                (
                    name.clone(),
                    FeatureState {
                        weights: *w,
                        ..FeatureState::default()
                    },
                )
            })
            .collect();
        Self {
            features,
            instances: 0,
        }
    }

    /// Sum the weights of `features` for every tag.
    pub fn scores<S: AsRef<str>>(&self, features: &[S]) -> TagWeights {
        score_with(|name| self.features.get(name).map(|s| &s.weights), features)
    }

    /// Highest scoring tag. Ties resolve to the earliest tag, so an untrained
    /// model predicts `Outside`.
    pub fn predict<S: AsRef<str>>(&self, features: &[S]) -> BioTag {
        best_tag(&self.scores(features))
    }

    /// Apply one perceptron update. Does nothing but advance the clock when
    /// the guess was right.
    pub fn update<S: AsRef<str>>(&mut self, truth: BioTag, guess: BioTag, features: &[S]) {
        self.instances += 1;
        if truth == guess {
            return;
        }
        for feature in features {
            self.bump(feature.as_ref(), truth, 1.0);
            self.bump(feature.as_ref(), guess, -1.0);
        }
    }

    fn bump(&mut self, feature: &str, tag: BioTag, delta: f32) {
        let idx = tag.index();
        let instances = self.instances;
        let state = self.features.entry(feature.to_string()).or_default();
        state.totals[idx] += (instances - state.stamps[idx]) as f64 * state.weights[idx] as f64;
        state.stamps[idx] = instances;
        state.weights[idx] += delta;
    }

    /// Averaged weights, dropping features whose average is zero for every tag.
    ///
    /// With no updates applied the current weights are returned unchanged.
    pub fn averaged_weights(&self) -> HashMap<String, TagWeights> {
        if self.instances == 0 {
            return self
                .features
                .iter()
                .map(|(name, state)| (name.clone(), state.weights))
                .collect();
        }

        let instances = self.instances as f64;
        self.features
            .iter()
            .filter_map(|(name, state)| {
                let mut averaged = [0.0f32; 3];
                for idx in 0..3 {
                    let total = state.totals[idx]
                        + (self.instances - state.stamps[idx]) as f64
                            * state.weights[idx] as f64;
                    averaged[idx] = (total / instances) as f32;
                }
                averaged
                    .iter()
                    .any(|w| w.abs() > f32::EPSILON)
                    .then(|| (name.clone(), averaged))
            })
            .collect()
    }
}

/// Sum weights looked up through `lookup`.
pub fn score_with<'w, F, S>(lookup: F, features: &[S]) -> TagWeights
where
    F: Fn(&str) -> Option<&'w TagWeights>,
    S: AsRef<str>,
{
    let mut scores = [0.0f32; 3];
    for feature in features {
        if let Some(weights) = lookup(feature.as_ref()) {
            for (score, w) in scores.iter_mut().zip(weights.iter()) {
                *score += w;
            }
        }
    }
    scores
}

/// Highest scoring tag, ties to the earliest.
pub fn best_tag(scores: &TagWeights) -> BioTag {
    let mut best = BioTag::Outside;
    for tag in BioTag::ALL {
        if scores[tag.index()] > scores[best.index()] {
            best = tag;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrained_predicts_outside() {
        let perceptron = AveragedPerceptron::new();
        assert_eq!(perceptron.predict(&["bias", "w=ab1234"]), BioTag::Outside);
    }

    #[test]
    fn test_update_moves_weights_toward_truth() {
        let mut perceptron = AveragedPerceptron::new();
        let features = ["w=ab1234", "shape=AA9999"];
        perceptron.update(BioTag::Begin, BioTag::Outside, &features);
        assert_eq!(perceptron.predict(&features), BioTag::Begin);
    }

    #[test]
    fn test_correct_guess_leaves_weights() {
        let mut perceptron = AveragedPerceptron::new();
        perceptron.update(BioTag::Outside, BioTag::Outside, &["w=nike"]);
        assert!(perceptron.averaged_weights().is_empty());
    }

    #[test]
    fn test_averaging_dampens_late_updates() {
        let mut perceptron = AveragedPerceptron::new();
        let features = ["w=ab1234"];
        perceptron.update(BioTag::Begin, BioTag::Outside, &features);
        for _ in 0..3 {
            perceptron.update(BioTag::Begin, BioTag::Begin, &features);
        }
        let averaged = perceptron.averaged_weights();
        let weights = averaged["w=ab1234"];
        // weight 1.0 held for 3 of 4 instances
        assert!((weights[BioTag::Begin.index()] - 0.75).abs() < 1e-6);
        assert!((weights[BioTag::Outside.index()] + 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_resume_from_weights() {
        let mut weights = HashMap::new();
        weights.insert("w=ab1234".to_string(), [0.0, 2.0, 0.0]);
        let perceptron = AveragedPerceptron::from_weights(&weights);
        assert_eq!(perceptron.predict(&["w=ab1234"]), BioTag::Begin);
        assert_eq!(perceptron.averaged_weights(), weights);
    }
}
