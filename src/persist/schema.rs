//! Schema types for the persisted artifacts.
//!
//! These types provide a stable serialization format independent of runtime
//! types. Schema types are separate from runtime types for:
//! - Forward/backward compatibility (schema can evolve independently)
//! - Validation during deserialization
//! - Clear migration paths between schema versions
//!
//! Two artifacts exist, both JSON:
//! - the **model artifact** ([`ModelSchema`]): metadata, base score, trees
//! - the **vocabularies artifact** ([`VocabulariesSchema`]): one ordered
//!   class list per categorical field, in training order

use serde::{Deserialize, Serialize};

/// Current model artifact schema version.
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// Current vocabularies artifact schema version.
pub const VOCABULARIES_SCHEMA_VERSION: u32 = 1;

/// Task type for model output interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKindSchema {
    /// Binary classification.
    BinaryClassification,
}

/// Model metadata schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    /// Task type.
    pub task: TaskKindSchema,
    /// Number of input features.
    pub num_features: usize,
    /// Feature names in column order (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

/// Tree schema (SoA layout).
///
/// All per-node arrays have length `num_nodes`. A child index of 0 marks a
/// leaf; `leaf_values` is meaningful only at leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index for each internal node.
    pub split_indices: Vec<u32>,
    /// Split threshold for each internal node.
    pub thresholds: Vec<f64>,
    /// Left child index for each node (0 = leaf).
    pub children_left: Vec<u32>,
    /// Right child index for each node (0 = leaf).
    pub children_right: Vec<u32>,
    /// Default direction for missing values at each internal node.
    pub default_left: Vec<bool>,
    /// Leaf output value for each node.
    pub leaf_values: Vec<f64>,
}

/// Model artifact schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Schema version; see [`MODEL_SCHEMA_VERSION`].
    pub version: u32,
    /// Model metadata.
    pub meta: ModelMetaSchema,
    /// Base score added to every margin.
    pub base_score: f64,
    /// The tree ensemble.
    pub trees: Vec<TreeSchema>,
}

/// Vocabularies artifact schema.
///
/// Each list is one field's vocabulary in training order; a value's code is
/// its index. The order is part of the trained model and must be persisted
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabulariesSchema {
    /// Schema version; see [`VOCABULARIES_SCHEMA_VERSION`].
    pub version: u32,
    /// Team (constructor) identifiers.
    pub team: Vec<String>,
    /// Driver surnames.
    pub driver_surname: Vec<String>,
    /// Driver forenames.
    pub driver_forename: Vec<String>,
    /// Circuit identifiers.
    pub circuit: Vec<String>,
    /// Car numbers (label-encoded strings).
    pub car_number: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_schema_json_round_trip() {
        let schema = ModelSchema {
            version: MODEL_SCHEMA_VERSION,
            meta: ModelMetaSchema {
                task: TaskKindSchema::BinaryClassification,
                num_features: 16,
                feature_names: None,
            },
            base_score: 0.0,
            trees: vec![TreeSchema {
                num_nodes: 1,
                split_indices: vec![0],
                thresholds: vec![0.0],
                children_left: vec![0],
                children_right: vec![0],
                default_left: vec![false],
                leaf_values: vec![0.5],
            }],
        };

        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("\"binary_classification\""));
        // feature_names is None and must be omitted, not serialized as null
        assert!(!json.contains("feature_names"));

        let back: ModelSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, MODEL_SCHEMA_VERSION);
        assert_eq!(back.trees.len(), 1);
    }

    #[test]
    fn vocabularies_schema_json_round_trip() {
        let json = r#"{
            "version": 1,
            "team": ["ferrari", "mclaren"],
            "driver_surname": ["leclerc", "norris"],
            "driver_forename": ["charles", "lando"],
            "circuit": ["monza"],
            "car_number": ["16", "4"]
        }"#;

        let schema: VocabulariesSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.team, vec!["ferrari", "mclaren"]);
        assert_eq!(schema.car_number.len(), 2);
    }
}
