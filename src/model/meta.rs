//! Model metadata.

use serde::{Deserialize, Serialize};

/// Type of task the persisted model was trained for.
///
/// This crate only ships binary top-10 classification, but the task kind is
/// persisted and checked so that a foreign or future artifact fails loudly
/// instead of producing garbage probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Binary classification; positive class = finishes in the top 10.
    #[default]
    BinaryClassification,
}

/// Shared metadata for the loaded model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Number of input features.
    pub n_features: usize,
    /// Feature names in canonical column order (optional).
    pub feature_names: Option<Vec<String>>,
    /// Task type.
    pub task: TaskKind,
}

impl ModelMeta {
    /// Metadata for a binary classifier over `n_features` columns.
    pub fn for_binary_classification(n_features: usize) -> Self {
        Self {
            n_features,
            task: TaskKind::BinaryClassification,
            ..Default::default()
        }
    }

    /// Set feature names.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }
}
