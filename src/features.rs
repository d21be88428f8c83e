//! Feature vector assembly.
//!
//! The classifier consumes exactly [`N_FEATURES`] values in one canonical
//! positional order, fixed at training time. Reordering produces a
//! valid-looking but semantically wrong input, so the order lives in one
//! place: [`FeatureId`]. Everything else (the builder, batch stacking, the
//! feature names persisted in model metadata) derives from it.
//!
//! Categorical fields enter the vector as their dense codes from
//! [`crate::encode`]; boolean flags enter as 0/1. No field is optional and
//! there is no defaulting - UI preset values belong to the display layer,
//! never to the assembler.

use ndarray::Array2;

/// Width of the classifier's input.
pub const N_FEATURES: usize = 16;

/// One fully assembled classifier input, in canonical order.
pub type FeatureVector = [f32; N_FEATURES];

/// The canonical feature positions.
///
/// The discriminant of each variant is its column index in the trained
/// model's input; the declaration order below is the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum FeatureId {
    /// Car number, label-encoded.
    CarNumberCode = 0,
    /// Team's prior race count.
    TeamPriorRaces = 1,
    /// Driver's average prior finish position.
    DriverAvgFinish = 2,
    /// Driver's prior race count.
    DriverPriorRaces = 3,
    /// Team's average prior finish position.
    TeamAvgFinish = 4,
    /// Team's average finish on this circuit.
    TeamTrackAvgFinish = 5,
    /// Driver's average finish on this circuit.
    DriverTrackAvgFinish = 6,
    /// Starting grid position.
    GridPosition = 7,
    /// Team identifier, label-encoded.
    TeamCode = 8,
    /// Driver surname, label-encoded.
    SurnameCode = 9,
    /// Season round number.
    Round = 10,
    /// Circuit identifier, label-encoded.
    CircuitCode = 11,
    /// Driver age in years.
    DriverAge = 12,
    /// 1 if this is the driver's home race.
    DriverHomeRace = 13,
    /// 1 if this is the team's home race.
    TeamHomeRace = 14,
    /// Driver forename, label-encoded.
    ForenameCode = 15,
}

impl FeatureId {
    /// All features in canonical column order.
    pub const ALL: [FeatureId; N_FEATURES] = [
        FeatureId::CarNumberCode,
        FeatureId::TeamPriorRaces,
        FeatureId::DriverAvgFinish,
        FeatureId::DriverPriorRaces,
        FeatureId::TeamAvgFinish,
        FeatureId::TeamTrackAvgFinish,
        FeatureId::DriverTrackAvgFinish,
        FeatureId::GridPosition,
        FeatureId::TeamCode,
        FeatureId::SurnameCode,
        FeatureId::Round,
        FeatureId::CircuitCode,
        FeatureId::DriverAge,
        FeatureId::DriverHomeRace,
        FeatureId::TeamHomeRace,
        FeatureId::ForenameCode,
    ];

    /// Column index in the feature vector.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, as persisted in model metadata.
    pub fn name(self) -> &'static str {
        match self {
            FeatureId::CarNumberCode => "car_number_code",
            FeatureId::TeamPriorRaces => "team_prior_races",
            FeatureId::DriverAvgFinish => "driver_avg_finish",
            FeatureId::DriverPriorRaces => "driver_prior_races",
            FeatureId::TeamAvgFinish => "team_avg_finish",
            FeatureId::TeamTrackAvgFinish => "team_track_avg_finish",
            FeatureId::DriverTrackAvgFinish => "driver_track_avg_finish",
            FeatureId::GridPosition => "grid_position",
            FeatureId::TeamCode => "team_code",
            FeatureId::SurnameCode => "surname_code",
            FeatureId::Round => "round",
            FeatureId::CircuitCode => "circuit_code",
            FeatureId::DriverAge => "driver_age",
            FeatureId::DriverHomeRace => "driver_home_race",
            FeatureId::TeamHomeRace => "team_home_race",
            FeatureId::ForenameCode => "forename_code",
        }
    }

    /// Feature names in canonical order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.name().to_string()).collect()
    }
}

/// Errors from feature vector assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    /// A required field was never set. All 16 fields are required.
    #[error("missing feature vector field: {field}")]
    MissingField { field: &'static str },
}

/// Builder for a [`FeatureVector`].
///
/// Pure assembly: setters record values, [`build`](Self::build) checks
/// completeness and emits the vector in canonical order. No range sanity
/// checks are applied (negative ages and absurd grid positions pass
/// through); bounds are the input layer's responsibility.
///
/// # Example
///
/// ```
/// use gridcast::features::FeatureVectorBuilder;
///
/// let vector = FeatureVectorBuilder::new()
///     .car_number_code(2)
///     .team_prior_races(50)
///     .driver_avg_finish(10.0)
///     .driver_prior_races(20)
///     .team_avg_finish(8.0)
///     .team_track_avg_finish(10.0)
///     .driver_track_avg_finish(10.0)
///     .grid_position(5)
///     .team_code(1)
///     .surname_code(3)
///     .round(1)
///     .circuit_code(7)
///     .driver_age(25)
///     .driver_home_race(false)
///     .team_home_race(true)
///     .forename_code(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     vector,
///     [2.0, 50.0, 10.0, 20.0, 8.0, 10.0, 10.0, 5.0, 1.0, 3.0, 1.0, 7.0, 25.0, 0.0, 1.0, 1.0]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    values: [Option<f32>; N_FEATURES],
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one feature by id. The named setters below are sugar over this.
    pub fn set(mut self, id: FeatureId, value: f32) -> Self {
        self.values[id.index()] = Some(value);
        self
    }

    // =========================================================================
    // Named setters, one per canonical field
    // =========================================================================

    pub fn car_number_code(self, code: u32) -> Self {
        self.set(FeatureId::CarNumberCode, code as f32)
    }

    pub fn team_prior_races(self, races: u32) -> Self {
        self.set(FeatureId::TeamPriorRaces, races as f32)
    }

    pub fn driver_avg_finish(self, avg: f32) -> Self {
        self.set(FeatureId::DriverAvgFinish, avg)
    }

    pub fn driver_prior_races(self, races: u32) -> Self {
        self.set(FeatureId::DriverPriorRaces, races as f32)
    }

    pub fn team_avg_finish(self, avg: f32) -> Self {
        self.set(FeatureId::TeamAvgFinish, avg)
    }

    pub fn team_track_avg_finish(self, avg: f32) -> Self {
        self.set(FeatureId::TeamTrackAvgFinish, avg)
    }

    pub fn driver_track_avg_finish(self, avg: f32) -> Self {
        self.set(FeatureId::DriverTrackAvgFinish, avg)
    }

    pub fn grid_position(self, grid: u32) -> Self {
        self.set(FeatureId::GridPosition, grid as f32)
    }

    pub fn team_code(self, code: u32) -> Self {
        self.set(FeatureId::TeamCode, code as f32)
    }

    pub fn surname_code(self, code: u32) -> Self {
        self.set(FeatureId::SurnameCode, code as f32)
    }

    pub fn round(self, round: u32) -> Self {
        self.set(FeatureId::Round, round as f32)
    }

    pub fn circuit_code(self, code: u32) -> Self {
        self.set(FeatureId::CircuitCode, code as f32)
    }

    pub fn driver_age(self, age: u32) -> Self {
        self.set(FeatureId::DriverAge, age as f32)
    }

    pub fn driver_home_race(self, home: bool) -> Self {
        self.set(FeatureId::DriverHomeRace, home as u32 as f32)
    }

    pub fn team_home_race(self, home: bool) -> Self {
        self.set(FeatureId::TeamHomeRace, home as u32 as f32)
    }

    pub fn forename_code(self, code: u32) -> Self {
        self.set(FeatureId::ForenameCode, code as f32)
    }

    /// Assemble the vector in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::MissingField`] naming the first canonical
    /// field that was never set.
    pub fn build(self) -> Result<FeatureVector, AssembleError> {
        let mut vector = [0.0f32; N_FEATURES];
        for id in FeatureId::ALL {
            vector[id.index()] = self.values[id.index()]
                .ok_or(AssembleError::MissingField { field: id.name() })?;
        }
        Ok(vector)
    }
}

/// Stack assembled vectors into a sample-major matrix `[n_samples, 16]`
/// for batch prediction.
pub fn stack_rows(rows: &[FeatureVector]) -> Array2<f32> {
    let mut data = Vec::with_capacity(rows.len() * N_FEATURES);
    for row in rows {
        data.extend_from_slice(row);
    }
    Array2::from_shape_vec((rows.len(), N_FEATURES), data)
        .expect("row data length matches n_rows * N_FEATURES")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_builder() -> FeatureVectorBuilder {
        FeatureVectorBuilder::new()
            .car_number_code(2)
            .team_prior_races(50)
            .driver_avg_finish(10.0)
            .driver_prior_races(20)
            .team_avg_finish(8.0)
            .team_track_avg_finish(10.0)
            .driver_track_avg_finish(10.0)
            .grid_position(5)
            .team_code(1)
            .surname_code(3)
            .round(1)
            .circuit_code(7)
            .driver_age(25)
            .driver_home_race(false)
            .team_home_race(true)
            .forename_code(1)
    }

    #[test]
    fn canonical_order_is_stable() {
        for (i, id) in FeatureId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(FeatureId::names().len(), N_FEATURES);
    }

    #[test]
    fn assembles_in_canonical_order() {
        let vector = full_builder().build().unwrap();
        assert_eq!(
            vector,
            [
                2.0, 50.0, 10.0, 20.0, 8.0, 10.0, 10.0, 5.0, 1.0, 3.0, 1.0, 7.0, 25.0, 0.0, 1.0,
                1.0
            ]
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        // Everything except the circuit code.
        let builder = FeatureVectorBuilder::new()
            .car_number_code(2)
            .team_prior_races(50)
            .driver_avg_finish(10.0)
            .driver_prior_races(20)
            .team_avg_finish(8.0)
            .team_track_avg_finish(10.0)
            .driver_track_avg_finish(10.0)
            .grid_position(5)
            .team_code(1)
            .surname_code(3)
            .round(1)
            .driver_age(25)
            .driver_home_race(false)
            .team_home_race(true)
            .forename_code(1);

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            AssembleError::MissingField {
                field: "circuit_code"
            }
        );
    }

    #[test]
    fn empty_builder_reports_first_canonical_field() {
        let err = FeatureVectorBuilder::new().build().unwrap_err();
        assert_eq!(
            err,
            AssembleError::MissingField {
                field: "car_number_code"
            }
        );
    }

    #[test]
    fn home_race_flags_encode_as_zero_one() {
        let vector = full_builder()
            .driver_home_race(true)
            .team_home_race(false)
            .build()
            .unwrap();
        assert_eq!(vector[FeatureId::DriverHomeRace.index()], 1.0);
        assert_eq!(vector[FeatureId::TeamHomeRace.index()], 0.0);
    }

    #[test]
    fn no_range_validation_is_applied() {
        // Bounds are the input layer's concern; the assembler passes
        // nonsense through untouched.
        let vector = full_builder().driver_avg_finish(-3.5).build().unwrap();
        assert_eq!(vector[FeatureId::DriverAvgFinish.index()], -3.5);
    }

    #[test]
    fn stack_rows_is_sample_major() {
        let a = full_builder().build().unwrap();
        let b = full_builder().grid_position(12).build().unwrap();
        let matrix = stack_rows(&[a, b]);

        assert_eq!(matrix.shape(), &[2, N_FEATURES]);
        assert_eq!(matrix[[0, FeatureId::GridPosition.index()]], 5.0);
        assert_eq!(matrix[[1, FeatureId::GridPosition.index()]], 12.0);
    }
}
