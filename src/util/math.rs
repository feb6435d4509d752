//! Numeric helpers shared by the kernels and renderers.

/// Rounds to the nearest integer with ties going towards positive infinity.
///
/// `f64::round` sends `-0.5` to `-1`; the zero-variance guard and the surface
/// renderer both need `-0.5` to land on `0`. The fraction is compared
/// directly instead of computing `floor(value + 0.5)`, whose addition rounds
/// `0.49999999999999994` up to `1.0`.
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Clamps an integer channel value into `[0, 255]`.
pub(crate) fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
