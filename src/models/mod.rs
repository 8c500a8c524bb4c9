//! Candidate usage models and in-sample model selection.

mod regression;
mod selection;
mod traits;
mod weekday;

pub use regression::{polynomial_features, RegressionModel};
pub use selection::{ModelSelector, Selection};
pub use traits::{BoxedModel, FeaturePoint, ModelRegistry, ModelSpec, UsageModel};
pub use weekday::WeekdayProfile;

use serde::{Deserialize, Serialize};

/// Candidate models that can be named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// OLS on (day_index, day_of_week).
    Linear,
    /// Degree-2 polynomial expansion feeding OLS.
    Polynomial,
    /// Mean usage per weekday.
    WeekdayProfile,
}

impl CandidateKind {
    /// Candidates tried when configuration does not say otherwise.
    pub const DEFAULT: [CandidateKind; 2] = [CandidateKind::Linear, CandidateKind::Polynomial];

    pub fn name(&self) -> &'static str {
        match self {
            CandidateKind::Linear => "linear",
            CandidateKind::Polynomial => "polynomial",
            CandidateKind::WeekdayProfile => "weekday_profile",
        }
    }

    pub fn spec(&self) -> ModelSpec {
        match self {
            CandidateKind::Linear => {
                ModelSpec::new(self.name(), || Box::new(RegressionModel::linear()))
            }
            CandidateKind::Polynomial => {
                ModelSpec::new(self.name(), || Box::new(RegressionModel::polynomial()))
            }
            CandidateKind::WeekdayProfile => {
                ModelSpec::new(self.name(), || Box::new(WeekdayProfile::new()))
            }
        }
    }

    /// Registry holding `kinds` in order.
    pub fn registry(kinds: &[CandidateKind]) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for kind in kinds {
            registry.register(kind.spec());
        }
        registry
    }
}
