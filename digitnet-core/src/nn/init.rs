use crate::error::DigitNetError;
use crate::linalg::Matrix;
use crate::types::Real;
use rand::Rng;
use rand_distr::Normal;

/// Creates an `fan_out × fan_in` matrix filled with He (Kaiming) normal values:
/// every element is drawn from `N(0, sqrt(2 / fan_in))`.
///
/// Samples are drawn in `f64` and then cast, so a given seed yields the same
/// weights (up to rounding) for `f32` and `f64` layers.
///
/// # Errors
/// `InvalidArgument` if `fan_in` is zero.
pub fn he_normal<T: Real, R: Rng + ?Sized>(
    fan_out: usize,
    fan_in: usize,
    rng: &mut R,
) -> Result<Matrix<T>, DigitNetError> {
    if fan_in == 0 {
        return Err(DigitNetError::InvalidArgument(
            "he_normal requires fan_in > 0".to_string(),
        ));
    }
    let std_dev = (2.0 / fan_in as f64).sqrt();
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| DigitNetError::InvalidArgument(format!("he_normal: {}", e)))?;
    let data = (0..fan_out * fan_in)
        .map(|_| T::cast(rng.sample(normal)))
        .collect();
    Matrix::from_vec(fan_out, fan_in, data)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
