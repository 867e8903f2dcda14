use super::Distortion;
use crate::{horner, radial3_validity_bound};
use nalgebra::Point2;

/// Purely radial distortion around a distortion center.
///
/// With $\vec d = \vec p - \vec c$ and $r^2 = \|\vec d\|^2$:
///
/// $$
/// \vec p' = \vec p + r^2 ⋅ (R_0 + R_1 ⋅ r^2 + R_2 ⋅ r^4 + ⋯) ⋅ \vec d
/// $$
///
/// The classic three term model (`r3`, `r5`, `r7`) is the most common, but any number of terms is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Radial {
    center: Point2<f64>,
    coefficients: Vec<f64>,
}

impl Radial {
    pub fn new(center: Point2<f64>, coefficients: Vec<f64>) -> Self {
        Self {
            center,
            coefficients,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Squared radius up to which the model is injective, see [`radial3_validity_bound`].
    ///
    /// Returns `None` for models with more than three terms, which have no closed-form bound.
    pub fn validity_bound(&self) -> Option<f64> {
        if self.coefficients.len() > 3 {
            return None;
        }
        let mut r = [0.0; 3];
        r[..self.coefficients.len()].copy_from_slice(&self.coefficients);
        Some(radial3_validity_bound(&r))
    }
}

impl Distortion for Radial {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let d = point - self.center;
        let r2 = d.norm_squared();
        let radial = r2 * horner(&self.coefficients, r2);
        point + d * radial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn radial() -> Radial {
        Radial::new(Point2::new(1000.0, 750.0), vec![1e-8, -2e-15, 3e-22])
    }

    #[test]
    fn center_is_fixed() {
        let radial = radial();
        assert_eq!(radial.project(radial.center()), radial.center());
    }

    #[test]
    fn displacement_is_radial() {
        let radial = radial();
        let point = Point2::new(1300.0, 350.0);
        let distorted = radial.project(point);
        let before = point - radial.center();
        let after = distorted - radial.center();
        // Same direction, scaled by 1 + r² P(r²).
        assert_relative_eq!(before.perp(&after), 0.0, epsilon = 1e-6);
        let r2 = before.norm_squared();
        let expected = 1.0 + r2 * (1e-8 - 2e-15 * r2 + 3e-22 * r2 * r2);
        assert_relative_eq!(after.norm() / before.norm(), expected, max_relative = 1e-12);
    }

    #[test]
    fn validity_bound_pads_short_models() {
        let radial = Radial::new(Point2::origin(), vec![-3.0]);
        assert_relative_eq!(radial.validity_bound().unwrap(), 1.0 / 9.0);
        let long = Radial::new(Point2::origin(), vec![0.0; 4]);
        assert_eq!(long.validity_bound(), None);
    }
}
