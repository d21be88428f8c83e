//! Margin-to-probability transform.
//!
//! The forest produces a raw margin; binary classification maps it to the
//! positive-class probability with a logistic sigmoid. The transform is
//! fixed by the artifact's task kind, so inference never needs the original
//! training objective.

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow in `exp`.
#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}
