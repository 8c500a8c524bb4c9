//! UsageModel trait defining the common interface for all candidate models.

use crate::core::DailySeries;
use crate::error::Result;

/// Regressor values for one day: its position in the window and its weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePoint {
    /// Offset from the window start; future days continue past the last index.
    pub day_index: f64,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,
}

impl FeaturePoint {
    pub fn new(day_index: f64, day_of_week: u32) -> Self {
        Self {
            day_index,
            day_of_week,
        }
    }
}

/// Common interface for daily-usage models.
///
/// This trait is object-safe and can be used with `Box<dyn UsageModel>`.
pub trait UsageModel {
    /// Fit the model to the dense daily series.
    fn fit(&mut self, series: &DailySeries) -> Result<()>;

    /// Predict usage for a single day.
    fn predict_point(&self, point: FeaturePoint) -> Result<f64>;

    /// In-sample predictions, one per day of the fitted window.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Identifier reported as the forecast method.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed model trait objects.
pub type BoxedModel = Box<dyn UsageModel>;

/// A named factory for one candidate model.
pub struct ModelSpec {
    /// Display name of the candidate.
    pub name: &'static str,
    factory: Box<dyn Fn() -> BoxedModel + Send + Sync>,
}

impl ModelSpec {
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> BoxedModel + Send + Sync + 'static,
    {
        Self {
            name,
            factory: Box::new(factory),
        }
    }

    /// Create a fresh, unfitted model instance.
    pub fn create(&self) -> BoxedModel {
        (self.factory)()
    }
}

impl std::fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSpec").field("name", &self.name).finish()
    }
}

/// Ordered collection of candidate specifications.
///
/// Registration order matters: on equal in-sample error the earlier candidate wins.
#[derive(Debug)]
pub struct ModelRegistry {
    models: Vec<ModelSpec>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Register a model specification.
    pub fn register(&mut self, spec: ModelSpec) {
        self.models.push(spec);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over model specifications.
    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
