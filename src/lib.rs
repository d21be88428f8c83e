//! gridcast: race-day top-10 finish prediction.
//!
//! This crate is the inference core behind an interactive race-prediction
//! form: it encodes a handful of categorical race parameters against fixed
//! vocabularies, assembles a 16-element feature vector in the exact order a
//! pre-trained classifier expects, and returns the predicted outcome with
//! the positive-class probability.
//!
//! # Key Types
//!
//! - [`PredictContext`] - Loaded encoders + classifier, one per process
//! - [`EncoderRegistry`] / [`EncoderTable`] - Categorical value -> code maps
//! - [`FeatureVectorBuilder`] - Canonical-order feature vector assembly
//! - [`Classifier`] / [`TopTenModel`] - Prediction over the loaded artifact
//! - [`PredictionResult`] - Outcome label + probability + confidence band
//!
//! # Example
//!
//! ```ignore
//! use gridcast::{CategoricalField, FeatureVectorBuilder, PredictContext};
//!
//! let ctx = PredictContext::load("model.json", "vocabularies.json")?;
//!
//! let vector = FeatureVectorBuilder::new()
//!     .team_code(ctx.encode(CategoricalField::Team, "mclaren")?)
//!     .grid_position(5)
//!     // ... remaining fields ...
//!     .build()?;
//!
//! let result = ctx.predict(&vector)?;
//! println!("top-10 probability: {:.2}%", result.probability() * 100.0);
//! ```
//!
//! # Artifacts
//!
//! The classifier and the vocabularies are produced by an external training
//! pipeline and persisted as versioned JSON. See the [`persist`] module for
//! the schema. Both are loaded once at startup and are immutable afterwards,
//! so a [`PredictContext`] can be shared by reference across threads.

// Re-export approx traits for users who want to compare probabilities
pub use approx;

pub mod encode;
pub mod features;
pub mod forest;
pub mod model;
pub mod persist;
pub mod predict;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Encoding
pub use encode::{CategoricalField, EncodeError, EncoderRegistry, EncoderTable};

// Feature assembly
pub use features::{AssembleError, FeatureId, FeatureVector, FeatureVectorBuilder, N_FEATURES};

// Inference
pub use model::{Classifier, InferenceError, ModelMeta, Outcome, TopTenModel};

// Prediction session
pub use predict::{ConfidenceBand, PredictContext, PredictionResult};
