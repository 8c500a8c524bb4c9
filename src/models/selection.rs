//! In-sample model selection.
//!
//! Every registered candidate is fitted on the full window and scored by mean
//! absolute error against that same window; the lowest score wins. Candidates
//! that fail to fit are skipped.

use crate::core::DailySeries;
use crate::models::{BoxedModel, ModelRegistry};
use crate::utils::metrics::mae;

/// The winning candidate of a selection round.
pub struct Selection {
    /// Fitted model.
    pub model: BoxedModel,
    /// In-sample mean absolute error.
    pub mae: f64,
    /// Candidate name, reported as the forecast method.
    pub name: String,
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("name", &self.name)
            .field("mae", &self.mae)
            .finish()
    }
}

/// Picks the candidate with the lowest in-sample MAE.
#[derive(Debug)]
pub struct ModelSelector<'a> {
    registry: &'a ModelRegistry,
    min_data_points: usize,
}

impl<'a> ModelSelector<'a> {
    pub fn new(registry: &'a ModelRegistry, min_data_points: usize) -> Self {
        Self {
            registry,
            min_data_points,
        }
    }

    /// Whether the series carries enough history to fit any candidate.
    ///
    /// Windows shorter than the minimum and windows with no recorded usage
    /// both go through the average fallback.
    pub fn has_enough_data(&self, series: &DailySeries) -> bool {
        series.len() >= self.min_data_points && !series.has_no_usage()
    }

    /// Fit all candidates and return the best, or `None` when the data gate
    /// rejects the series or no candidate could be fitted.
    pub fn select(&self, series: &DailySeries) -> Option<Selection> {
        if !self.has_enough_data(series) {
            tracing::debug!(
                days = series.len(),
                min_data_points = self.min_data_points,
                "insufficient history for model selection"
            );
            return None;
        }

        let actual = series.quantities();
        let mut best: Option<Selection> = None;

        for spec in self.registry.iter() {
            let mut model = spec.create();
            if let Err(err) = model.fit(series) {
                tracing::warn!(candidate = spec.name, error = %err, "candidate failed to fit");
                continue;
            }
            let Some(fitted) = model.fitted_values() else {
                tracing::warn!(candidate = spec.name, "candidate produced no fitted values");
                continue;
            };
            let score = match mae(&actual, fitted) {
                Ok(score) => score,
                Err(err) => {
                    tracing::warn!(candidate = spec.name, error = %err, "candidate could not be scored");
                    continue;
                }
            };
            tracing::debug!(candidate = spec.name, mae = score, "scored candidate");

            let better = best.as_ref().map_or(true, |b| score < b.mae);
            if better {
                best = Some(Selection {
                    name: model.name().to_string(),
                    model,
                    mae: score,
                });
            }
        }

        if best.is_none() {
            tracing::warn!("no candidate model could be fitted");
        }
        best
    }
}
