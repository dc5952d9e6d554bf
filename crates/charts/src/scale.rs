#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// Empty series, or nothing above zero to divide by.
    #[error("no positive value to scale against")]
    Degenerate,
}

/// Largest value across one or two series, used as the common denominator
/// so that compared series stay visually comparable.
pub fn shared_max(primary: &[f64], secondary: Option<&[f64]>) -> Result<f64, ScaleError> {
    let max = primary
        .iter()
        .chain(secondary.unwrap_or_default())
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if max > 0.0 {
        Ok(max)
    } else {
        Err(ScaleError::Degenerate)
    }
}
