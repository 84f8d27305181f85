/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// `num / den` clamped to `[0, 1]` without ever dividing by a non-positive denominator.
///
/// A collapsed range (`den <= 0`) saturates to 1 when the numerator is positive, else 0.
pub(crate) fn saturating_ratio(num: f64, den: f64) -> f64 {
    if num.is_nan() || den.is_nan() {
        return 0.0;
    }
    if den <= 0.0 {
        return if num > 0.0 { 1.0 } else { 0.0 };
    }
    clamp01(num / den)
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
