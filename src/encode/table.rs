//! Single-field encoder table.

use std::collections::HashMap;

use super::CategoricalField;

/// Errors from encoder construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The value is not part of the field's trained vocabulary.
    #[error("unknown {field} category: {value:?}")]
    UnknownCategory {
        field: CategoricalField,
        value: String,
    },

    /// A vocabulary listed the same class twice. The value -> code map must
    /// be a bijection over the classes, so this is rejected at load time.
    #[error("duplicate {field} category in vocabulary: {value:?}")]
    DuplicateClass {
        field: CategoricalField,
        value: String,
    },

    /// A vocabulary with no classes cannot encode anything.
    #[error("empty vocabulary for field {0}")]
    EmptyVocabulary(CategoricalField),
}

/// Value -> code map for one categorical field.
///
/// Codes are dense indices into the class list: `encode(classes()[i]) == i`.
/// The class order is the training order from the vocabularies artifact and
/// is stable for the table's lifetime.
///
/// # Example
///
/// ```
/// use gridcast::encode::{CategoricalField, EncoderTable};
///
/// let teams = ["Ferrari", "McLaren", "Mercedes"].map(String::from).to_vec();
/// let table = EncoderTable::new(CategoricalField::Team, teams).unwrap();
///
/// assert_eq!(table.encode("McLaren").unwrap(), 1);
/// assert_eq!(table.class_of(1), Some("McLaren"));
/// assert!(table.encode("Lotus").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EncoderTable {
    field: CategoricalField,
    /// Vocabulary in training order.
    classes: Vec<String>,
    /// Inverse of `classes`: value -> index.
    codes: HashMap<String, u32>,
}

impl EncoderTable {
    /// Build a table from a vocabulary in training order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::EmptyVocabulary`] for an empty class list and
    /// [`EncodeError::DuplicateClass`] if any class appears twice.
    pub fn new(field: CategoricalField, classes: Vec<String>) -> Result<Self, EncodeError> {
        if classes.is_empty() {
            return Err(EncodeError::EmptyVocabulary(field));
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (index, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), index as u32).is_some() {
                return Err(EncodeError::DuplicateClass {
                    field,
                    value: class.clone(),
                });
            }
        }

        Ok(Self {
            field,
            classes,
            codes,
        })
    }

    /// The field this table encodes.
    #[inline]
    pub fn field(&self) -> CategoricalField {
        self.field
    }

    /// Vocabulary in training order.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if the vocabulary is empty. Construction rejects this, so it
    /// only holds for tables that never existed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Encode a value to its dense integer code.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnknownCategory`] if `value` is not in the
    /// vocabulary. A display layer that only offers [`classes`](Self::classes)
    /// never hits this; library callers must still handle it.
    pub fn encode(&self, value: &str) -> Result<u32, EncodeError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: self.field,
                value: value.to_string(),
            })
    }

    /// Inverse lookup: code -> class. Useful for debugging model inputs.
    pub fn class_of(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(classes: &[&str]) -> EncoderTable {
        EncoderTable::new(
            CategoricalField::Team,
            classes.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn codes_are_vocabulary_indices() {
        let t = table(&["Ferrari", "McLaren", "Mercedes"]);
        assert_eq!(t.encode("Ferrari").unwrap(), 0);
        assert_eq!(t.encode("McLaren").unwrap(), 1);
        assert_eq!(t.encode("Mercedes").unwrap(), 2);
    }

    #[test]
    fn mapping_is_injective_and_in_range() {
        let t = table(&["a", "b", "c", "d"]);
        let mut seen = Vec::new();
        for class in t.classes() {
            let code = t.encode(class).unwrap();
            assert!((code as usize) < t.len());
            assert!(!seen.contains(&code), "code {code} assigned twice");
            seen.push(code);
        }
    }

    #[test]
    fn unknown_value_is_an_error() {
        let t = table(&["Ferrari", "McLaren"]);
        let err = t.encode("Lotus").unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnknownCategory {
                field: CategoricalField::Team,
                ..
            }
        ));
    }

    #[test]
    fn encoding_is_case_sensitive() {
        // Vocabularies are matched verbatim; normalization is a caller concern.
        let t = table(&["McLaren"]);
        assert!(t.encode("mclaren").is_err());
    }

    #[test]
    fn class_of_inverts_encode() {
        let t = table(&["monza", "spa", "suzuka"]);
        for class in t.classes() {
            let code = t.encode(class).unwrap();
            assert_eq!(t.class_of(code), Some(class.as_str()));
        }
        assert_eq!(t.class_of(99), None);
    }

    #[test]
    fn duplicate_class_rejected() {
        let result = EncoderTable::new(
            CategoricalField::Circuit,
            vec!["monza".into(), "spa".into(), "monza".into()],
        );
        assert!(matches!(
            result,
            Err(EncodeError::DuplicateClass { value, .. }) if value == "monza"
        ));
    }

    #[test]
    fn empty_vocabulary_rejected() {
        let result = EncoderTable::new(CategoricalField::CarNumber, Vec::new());
        assert!(matches!(result, Err(EncodeError::EmptyVocabulary(_))));
    }
}
