//! Registry of the five encoder tables.

use super::table::{EncodeError, EncoderTable};
use super::CategoricalField;

/// All encoder tables the classifier depends on, one per categorical field.
///
/// Built once from the vocabularies artifact and immutable afterwards. The
/// registry is plain read-only data, so it can be shared by reference across
/// concurrent requests without synchronization.
#[derive(Debug, Clone)]
pub struct EncoderRegistry {
    /// One table per field, indexed by `CategoricalField::slot`.
    tables: [EncoderTable; 5],
}

impl EncoderRegistry {
    /// Build a registry from the five vocabularies in training order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if any vocabulary is empty or contains a
    /// duplicate class.
    pub fn from_classes(
        team: Vec<String>,
        driver_surname: Vec<String>,
        driver_forename: Vec<String>,
        circuit: Vec<String>,
        car_number: Vec<String>,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            tables: [
                EncoderTable::new(CategoricalField::Team, team)?,
                EncoderTable::new(CategoricalField::DriverSurname, driver_surname)?,
                EncoderTable::new(CategoricalField::DriverForename, driver_forename)?,
                EncoderTable::new(CategoricalField::Circuit, circuit)?,
                EncoderTable::new(CategoricalField::CarNumber, car_number)?,
            ],
        })
    }

    /// The table for one field.
    #[inline]
    pub fn table(&self, field: CategoricalField) -> &EncoderTable {
        &self.tables[field.slot()]
    }

    /// Vocabulary for one field, in training order.
    ///
    /// Stable across calls for the registry's lifetime; a display layer can
    /// offer exactly these values and nothing else.
    #[inline]
    pub fn classes_of(&self, field: CategoricalField) -> &[String] {
        self.table(field).classes()
    }

    /// Encode one field's value to its dense integer code.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnknownCategory`] for values outside the
    /// field's vocabulary.
    pub fn encode(&self, field: CategoricalField, value: &str) -> Result<u32, EncodeError> {
        self.table(field).encode(value)
    }
}
