//! Artifact loading.
//!
//! The classifier and the categorical vocabularies are produced by an
//! external training pipeline and persisted as two versioned JSON artifacts.
//! Both are loaded once at process start; everything constructed here is
//! immutable for the rest of the session.
//!
//! # Overview
//!
//! - [`load_model`]: model artifact -> validated [`TopTenModel`]
//! - [`load_vocabularies`]: vocabularies artifact -> [`EncoderRegistry`]
//! - [`schema`]: the on-disk JSON shapes, separate from runtime types
//!
//! Validation is not optional: a schema that parses can still describe a
//! malformed tree or an inconsistent vocabulary, and loading fails with
//! [`ReadError`] rather than handing back a model that predicts garbage.

mod convert;
mod error;
pub mod schema;

pub use error::ReadError;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::encode::EncoderRegistry;
use crate::model::TopTenModel;

use schema::{ModelSchema, VocabulariesSchema};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ReadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate the model artifact.
///
/// # Errors
///
/// Returns [`ReadError`] on IO/JSON problems, an unsupported schema
/// version, or structural validation failures.
pub fn load_model(path: impl AsRef<Path>) -> Result<TopTenModel, ReadError> {
    let schema: ModelSchema = read_json(path.as_ref())?;
    TopTenModel::try_from(schema)
}

/// Load and validate the vocabularies artifact.
///
/// Vocabulary order is taken verbatim from the artifact; it is the training
/// order and is never re-sorted.
///
/// # Errors
///
/// Returns [`ReadError`] on IO/JSON problems, an unsupported schema
/// version, or a malformed vocabulary.
pub fn load_vocabularies(path: impl AsRef<Path>) -> Result<EncoderRegistry, ReadError> {
    let schema: VocabulariesSchema = read_json(path.as_ref())?;
    EncoderRegistry::try_from(schema)
}
