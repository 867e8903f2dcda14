/// Evaluates the polynomial with the given coefficients at `x`.
///
/// $$
/// f(x, \vec β) = β_0 + β_1 ​⋅ x + β_2 ​⋅ x^2 + ⋯ + β_n ⋅ x^n
/// $$
///
/// Coefficients are ordered from the constant term upwards. An empty list evaluates to zero.
///
/// ```
/// // 1 + 2x + 3x²
/// assert_eq!(cv_distortion::horner(&[1.0, 2.0, 3.0], 2.0), 17.0);
/// ```
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |result, &coefficient| result * x + coefficient)
}
