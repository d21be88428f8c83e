//! Classifier interface and the concrete boosted tree model.
//!
//! # Overview
//!
//! - [`Classifier`]: the narrow prediction interface the session depends on
//! - [`TopTenModel`]: forest + metadata + sigmoid transform
//! - [`Outcome`] / [`InferenceError`]: prediction label and failure modes
//!
//! The session layer ([`crate::predict`]) treats the classifier as opaque:
//! anything implementing [`Classifier`] can stand in for the loaded
//! artifact, which is how tests substitute fixed-probability stubs.

mod meta;
mod transform;

pub use meta::{ModelMeta, TaskKind};

use crate::forest::Forest;

/// Errors raised by the classifier.
///
/// A wrong-shaped vector is a caller bug that must be visible immediately;
/// it is never swallowed or downgraded to a default prediction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// Input width differs from the model's trained feature count.
    #[error("feature shape mismatch: classifier expects {expected} features, got {got}")]
    FeatureShapeMismatch { expected: usize, got: usize },
}

/// Binary prediction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Predicted to finish outside the top 10 (label 0).
    OutsideTopTen,
    /// Predicted to finish in the top 10 (label 1).
    TopTen,
}

impl Outcome {
    /// Numeric label: 0 or 1.
    #[inline]
    pub fn label(self) -> u8 {
        match self {
            Outcome::OutsideTopTen => 0,
            Outcome::TopTen => 1,
        }
    }

    #[inline]
    pub fn is_top_ten(self) -> bool {
        matches!(self, Outcome::TopTen)
    }
}

/// Prediction interface over a loaded, immutable classifier.
///
/// Implementations must be deterministic: the same feature vector against
/// the same loaded artifact always produces the same output.
pub trait Classifier: Send + Sync {
    /// Trained input width.
    fn n_features(&self) -> usize;

    /// Class probabilities `[p_outside, p_top_ten]`, each in [0, 1] and
    /// summing to 1.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::FeatureShapeMismatch`] if
    /// `features.len() != n_features()`.
    fn predict_proba(&self, features: &[f32]) -> Result<[f32; 2], InferenceError>;

    /// Predicted label, thresholding the positive-class probability at 0.5.
    fn predict(&self, features: &[f32]) -> Result<Outcome, InferenceError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] >= 0.5 {
            Outcome::TopTen
        } else {
            Outcome::OutsideTopTen
        })
    }
}

/// The top-10 finish classifier: boosted tree forest with a sigmoid output.
///
/// Loaded once from the model artifact (see [`crate::persist`]) and held as
/// read-only state for the rest of the process.
#[derive(Debug, Clone)]
pub struct TopTenModel {
    forest: Forest,
    meta: ModelMeta,
}

impl TopTenModel {
    /// Create a model from a validated forest and its metadata.
    ///
    /// Artifact loading guarantees the two agree on feature count; this
    /// constructor only debug-asserts it.
    pub fn from_parts(forest: Forest, meta: ModelMeta) -> Self {
        debug_assert_eq!(forest.n_features(), meta.n_features);
        Self { forest, meta }
    }

    /// Get reference to the underlying forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Get reference to model metadata.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn check_shape(&self, features: &[f32]) -> Result<(), InferenceError> {
        if features.len() != self.meta.n_features {
            return Err(InferenceError::FeatureShapeMismatch {
                expected: self.meta.n_features,
                got: features.len(),
            });
        }
        Ok(())
    }
}

impl Classifier for TopTenModel {
    fn n_features(&self) -> usize {
        self.meta.n_features
    }

    fn predict_proba(&self, features: &[f32]) -> Result<[f32; 2], InferenceError> {
        self.check_shape(features)?;
        let p = transform::sigmoid(self.forest.margin(features));
        Ok([1.0 - p, p])
    }
}
