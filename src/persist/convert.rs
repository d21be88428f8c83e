//! Conversion between schema types and runtime types.
//!
//! Conversions run all structural validation: a schema that deserialized
//! cleanly can still describe a malformed tree or inconsistent metadata,
//! and must be rejected here rather than produce a model that predicts
//! garbage.

use crate::encode::EncoderRegistry;
use crate::forest::{Forest, Tree};
use crate::model::{ModelMeta, TaskKind, TopTenModel};

use super::error::ReadError;
use super::schema::{
    ModelSchema, TaskKindSchema, TreeSchema, VocabulariesSchema, MODEL_SCHEMA_VERSION,
    VOCABULARIES_SCHEMA_VERSION,
};

impl From<TaskKindSchema> for TaskKind {
    fn from(schema: TaskKindSchema) -> Self {
        match schema {
            TaskKindSchema::BinaryClassification => TaskKind::BinaryClassification,
        }
    }
}

/// Convert one tree, validating structure against the model width.
fn tree_from_schema(
    schema: TreeSchema,
    n_features: usize,
    tree_idx: usize,
) -> Result<Tree, ReadError> {
    let declared = schema.num_nodes as usize;
    if schema.children_left.len() != declared {
        return Err(ReadError::Validation(format!(
            "tree {tree_idx}: num_nodes is {declared} but children_left has {} entries",
            schema.children_left.len()
        )));
    }

    Tree::new(
        schema.split_indices,
        schema.thresholds.into_iter().map(|t| t as f32).collect(),
        schema.children_left,
        schema.children_right,
        schema.default_left,
        schema.leaf_values.into_iter().map(|v| v as f32).collect(),
        n_features,
    )
    .map_err(|source| ReadError::Tree {
        tree: tree_idx,
        source,
    })
}

impl TryFrom<ModelSchema> for TopTenModel {
    type Error = ReadError;

    fn try_from(schema: ModelSchema) -> Result<Self, Self::Error> {
        if schema.version != MODEL_SCHEMA_VERSION {
            return Err(ReadError::UnsupportedVersion {
                found: schema.version,
                supported: MODEL_SCHEMA_VERSION,
            });
        }

        let n_features = schema.meta.num_features;
        if n_features == 0 {
            return Err(ReadError::Validation(
                "model declares zero features".to_string(),
            ));
        }
        if let Some(names) = &schema.meta.feature_names {
            if names.len() != n_features {
                return Err(ReadError::Validation(format!(
                    "model declares {n_features} features but names {} of them",
                    names.len()
                )));
            }
        }
        if schema.trees.is_empty() {
            return Err(ReadError::Validation("model has no trees".to_string()));
        }

        let trees = schema
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| tree_from_schema(t, n_features, i))
            .collect::<Result<Vec<_>, _>>()?;

        let forest = Forest::new(trees, schema.base_score as f32, n_features);
        let meta = ModelMeta {
            n_features,
            feature_names: schema.meta.feature_names,
            task: schema.meta.task.into(),
        };

        Ok(TopTenModel::from_parts(forest, meta))
    }
}

impl TryFrom<VocabulariesSchema> for EncoderRegistry {
    type Error = ReadError;

    fn try_from(schema: VocabulariesSchema) -> Result<Self, Self::Error> {
        if schema.version != VOCABULARIES_SCHEMA_VERSION {
            return Err(ReadError::UnsupportedVersion {
                found: schema.version,
                supported: VOCABULARIES_SCHEMA_VERSION,
            });
        }

        Ok(EncoderRegistry::from_classes(
            schema.team,
            schema.driver_surname,
            schema.driver_forename,
            schema.circuit,
            schema.car_number,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::CategoricalField;
    use crate::model::Classifier;
    use crate::persist::schema::ModelMetaSchema;

    fn leaf_tree(value: f64) -> TreeSchema {
        TreeSchema {
            num_nodes: 1,
            split_indices: vec![0],
            thresholds: vec![0.0],
            children_left: vec![0],
            children_right: vec![0],
            default_left: vec![false],
            leaf_values: vec![value],
        }
    }

    fn model_schema() -> ModelSchema {
        ModelSchema {
            version: MODEL_SCHEMA_VERSION,
            meta: ModelMetaSchema {
                task: TaskKindSchema::BinaryClassification,
                num_features: 16,
                feature_names: None,
            },
            base_score: 0.5,
            trees: vec![leaf_tree(0.25)],
        }
    }

    fn vocab_schema() -> VocabulariesSchema {
        VocabulariesSchema {
            version: VOCABULARIES_SCHEMA_VERSION,
            team: vec!["ferrari".into(), "mclaren".into()],
            driver_surname: vec!["leclerc".into()],
            driver_forename: vec!["charles".into()],
            circuit: vec!["monza".into()],
            car_number: vec!["16".into()],
        }
    }

    #[test]
    fn model_converts_and_predicts() {
        let model = TopTenModel::try_from(model_schema()).unwrap();
        assert_eq!(model.n_features(), 16);
        assert_eq!(model.forest().n_trees(), 1);

        // margin 0.75 through the sigmoid
        let [_, p1] = model.predict_proba(&[0.0; 16]).unwrap();
        assert!(p1 > 0.5);
    }

    #[test]
    fn model_version_is_checked() {
        let mut schema = model_schema();
        schema.version = 99;
        assert!(matches!(
            TopTenModel::try_from(schema),
            Err(ReadError::UnsupportedVersion {
                found: 99,
                supported: MODEL_SCHEMA_VERSION
            })
        ));
    }

    #[test]
    fn model_without_trees_is_rejected() {
        let mut schema = model_schema();
        schema.trees.clear();
        assert!(matches!(
            TopTenModel::try_from(schema),
            Err(ReadError::Validation(_))
        ));
    }

    #[test]
    fn feature_name_count_must_match_width() {
        let mut schema = model_schema();
        schema.meta.feature_names = Some(vec!["grid_position".into()]);
        assert!(matches!(
            TopTenModel::try_from(schema),
            Err(ReadError::Validation(_))
        ));
    }

    #[test]
    fn declared_node_count_must_match_arrays() {
        let mut schema = model_schema();
        schema.trees[0].num_nodes = 3;
        assert!(matches!(
            TopTenModel::try_from(schema),
            Err(ReadError::Validation(_))
        ));
    }

    #[test]
    fn malformed_tree_is_rejected_with_its_index() {
        let mut schema = model_schema();
        // Second tree splits on a feature the model does not have.
        schema.trees.push(TreeSchema {
            num_nodes: 3,
            split_indices: vec![40, 0, 0],
            thresholds: vec![1.0, 0.0, 0.0],
            children_left: vec![1, 0, 0],
            children_right: vec![2, 0, 0],
            default_left: vec![true, false, false],
            leaf_values: vec![0.0, 0.1, -0.1],
        });
        assert!(matches!(
            TopTenModel::try_from(schema),
            Err(ReadError::Tree { tree: 1, .. })
        ));
    }

    #[test]
    fn vocabularies_convert_in_training_order() {
        let registry = EncoderRegistry::try_from(vocab_schema()).unwrap();
        assert_eq!(
            registry.encode(CategoricalField::Team, "mclaren").unwrap(),
            1
        );
        assert_eq!(
            registry.classes_of(CategoricalField::Circuit),
            ["monza".to_string()]
        );
    }

    #[test]
    fn vocabulary_version_is_checked() {
        let mut schema = vocab_schema();
        schema.version = 0;
        assert!(matches!(
            EncoderRegistry::try_from(schema),
            Err(ReadError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn duplicate_vocabulary_class_surfaces_encode_error() {
        let mut schema = vocab_schema();
        schema.team.push("ferrari".into());
        assert!(matches!(
            EncoderRegistry::try_from(schema),
            Err(ReadError::Encode(_))
        ));
    }
}
