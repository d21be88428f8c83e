//! Categorical encoding.
//!
//! The classifier was trained on label-encoded categorical columns: each
//! categorical field has a fixed vocabulary, and a value's code is its index
//! within that vocabulary. The vocabulary order was fixed at training time
//! and must never be re-sorted or regenerated at inference time - a reordered
//! vocabulary silently shifts every code.
//!
//! # Overview
//!
//! - [`EncoderTable`]: one field's vocabulary + value -> code map
//! - [`EncoderRegistry`]: the five tables this model uses, loaded once
//! - [`CategoricalField`]: names the five categorical fields
//!
//! Encoding a value outside the vocabulary is an error, never a fabricated
//! code; see [`EncodeError`].

mod registry;
mod table;

pub use registry::EncoderRegistry;
pub use table::{EncodeError, EncoderTable};

use std::fmt;

use serde::{Deserialize, Serialize};

/// The categorical fields consumed by the classifier.
///
/// Each field has an independent vocabulary; there is no cross-field
/// consistency constraint (a forename and surname need not belong to the
/// same real driver - callers are trusted to pick a sensible pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    /// Team (constructor) identifier.
    Team,
    /// Driver surname.
    DriverSurname,
    /// Driver forename.
    DriverForename,
    /// Circuit identifier.
    Circuit,
    /// Car number. Trained as a label-encoded string, not a numeric.
    CarNumber,
}

impl CategoricalField {
    /// All fields, in a fixed order used for registry storage.
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Team,
        CategoricalField::DriverSurname,
        CategoricalField::DriverForename,
        CategoricalField::Circuit,
        CategoricalField::CarNumber,
    ];

    /// Stable snake_case name, matching the vocabularies artifact keys.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Team => "team",
            CategoricalField::DriverSurname => "driver_surname",
            CategoricalField::DriverForename => "driver_forename",
            CategoricalField::Circuit => "circuit",
            CategoricalField::CarNumber => "car_number",
        }
    }

    /// Index into [`CategoricalField::ALL`].
    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            CategoricalField::Team => 0,
            CategoricalField::DriverSurname => 1,
            CategoricalField::DriverForename => 2,
            CategoricalField::Circuit => 3,
            CategoricalField::CarNumber => 4,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
