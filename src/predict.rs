//! Prediction session over the loaded artifacts.
//!
//! [`PredictContext`] is the one piece of process-wide state: the encoder
//! registry and the classifier, loaded once and immutable afterwards. It is
//! constructed explicitly and passed by reference - there are no ambient
//! globals. Each prediction is a single synchronous call with no retry, no
//! queueing, and no caching: a deterministic call either succeeds or
//! surfaces an integration defect to the caller.
//!
//! Because the context is read-only, it is `Send + Sync` and can back
//! concurrent request handling without locks; only per-request vectors and
//! results need isolation.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use ndarray::ArrayView2;

use crate::encode::{CategoricalField, EncodeError, EncoderRegistry};
use crate::features::FeatureVector;
use crate::model::{Classifier, InferenceError, Outcome};
use crate::persist::{self, ReadError};

/// Display-threshold zones for the predicted probability.
///
/// Matches the gauge bands the result is rendered with: red below 50%,
/// yellow to 80%, green above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Probability in [0%, 50%).
    Low,
    /// Probability in [50%, 80%).
    Medium,
    /// Probability in [80%, 100%].
    High,
}

impl ConfidenceBand {
    /// Band for a positive-class probability in [0, 1].
    pub fn of(probability: f32) -> Self {
        if probability < 0.5 {
            ConfidenceBand::Low
        } else if probability < 0.8 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::High
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBand::Low => write!(f, "low"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::High => write!(f, "high"),
        }
    }
}

/// One prediction: label plus positive-class probability.
///
/// Produced per invocation, never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    outcome: Outcome,
    probability: f32,
}

impl PredictionResult {
    pub(crate) fn new(outcome: Outcome, probability: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&probability));
        Self {
            outcome,
            probability,
        }
    }

    /// Predicted label.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Probability of a top-10 finish, in [0, 1].
    #[inline]
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Probability as a percentage, for display.
    #[inline]
    pub fn probability_percent(&self) -> f32 {
        self.probability * 100.0
    }

    /// Display band for the probability.
    #[inline]
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.probability)
    }
}

/// Loaded encoders + classifier: the process-wide read-only state.
///
/// # Example
///
/// ```ignore
/// let ctx = PredictContext::load("model.json", "vocabularies.json")?;
/// let result = ctx.predict(&vector)?;
/// ```
pub struct PredictContext {
    registry: EncoderRegistry,
    classifier: Box<dyn Classifier>,
}

impl fmt::Debug for PredictContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl PredictContext {
    /// Load both artifacts and build the context.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if either artifact is unreadable or invalid,
    /// or if the model's input width does not match the canonical
    /// 16-feature vector this crate assembles.
    pub fn load(
        model_path: impl AsRef<Path>,
        vocabularies_path: impl AsRef<Path>,
    ) -> Result<Self, ReadError> {
        let model = persist::load_model(model_path)?;
        if model.n_features() != crate::features::N_FEATURES {
            return Err(ReadError::Validation(format!(
                "model expects {} features, but the canonical feature vector has {}",
                model.n_features(),
                crate::features::N_FEATURES
            )));
        }
        let registry = persist::load_vocabularies(vocabularies_path)?;
        Ok(Self::new(registry, Box::new(model)))
    }

    /// Build a context from already-constructed parts.
    ///
    /// Useful for tests and for callers that obtain a classifier some other
    /// way; [`load`](Self::load) is the normal path.
    pub fn new(registry: EncoderRegistry, classifier: Box<dyn Classifier>) -> Self {
        Self {
            registry,
            classifier,
        }
    }

    /// The encoder registry.
    #[inline]
    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    /// Vocabulary for one categorical field, in training order.
    #[inline]
    pub fn classes_of(&self, field: CategoricalField) -> &[String] {
        self.registry.classes_of(field)
    }

    /// Encode one categorical value.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnknownCategory`] for values outside the
    /// field's vocabulary.
    pub fn encode(&self, field: CategoricalField, value: &str) -> Result<u32, EncodeError> {
        self.registry.encode(field, value)
    }

    /// Predict the outcome for one assembled feature vector.
    ///
    /// Queries the classifier for both the label and the class
    /// probabilities; the result carries the positive-class probability.
    ///
    /// # Errors
    ///
    /// Propagates [`InferenceError`] from the classifier.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        self.predict_row(features)
    }

    /// Predict one row of arbitrary width (the classifier checks shape).
    fn predict_row(&self, features: &[f32]) -> Result<PredictionResult, InferenceError> {
        let outcome = self.classifier.predict(features)?;
        let [_, p_top_ten] = self.classifier.predict_proba(features)?;
        Ok(PredictionResult::new(outcome, p_top_ten))
    }

    /// Predict a batch of rows, shape `[n_samples, n_features]`.
    ///
    /// The context is read-only, so batching is a plain loop; it exists so
    /// multi-request callers get one shape check per row and results in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InferenceError`] encountered; rows are not
    /// partially returned.
    pub fn predict_batch(
        &self,
        features: ArrayView2<'_, f32>,
    ) -> Result<Vec<PredictionResult>, InferenceError> {
        let mut results = Vec::with_capacity(features.nrows());
        for row in features.outer_iter() {
            let row: Cow<'_, [f32]> = match row.as_slice() {
                Some(slice) => Cow::Borrowed(slice),
                None => Cow::Owned(row.to_vec()),
            };
            results.push(self.predict_row(&row)?);
        }
        Ok(results)
    }
}
