use super::Distortion;
use crate::horner;
use nalgebra::Point2;

/// Radial, decentering and affine distortion (Fraser's photogrammetric standard model).
///
/// With $(x, y)$ relative to the distortion center and $r^2 = x^2 + y^2$:
///
/// $$
/// \begin{aligned}
/// Δx &= x ⋅ r^2 ⋅ R(r^2) + P_0 ⋅ (2x^2 + r^2) + 2 P_1 ⋅ xy + b_0 ⋅ x + b_1 ⋅ y \\\\
/// Δy &= y ⋅ r^2 ⋅ R(r^2) + P_1 ⋅ (2y^2 + r^2) + 2 P_0 ⋅ xy
/// \end{aligned}
/// $$
///
/// The affine terms only act on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Fraser {
    center: Point2<f64>,
    radial: Vec<f64>,
    tangential: [f64; 2],
    affine: [f64; 2],
}

impl Fraser {
    pub fn new(
        center: Point2<f64>,
        radial: Vec<f64>,
        tangential: [f64; 2],
        affine: [f64; 2],
    ) -> Self {
        Self {
            center,
            radial,
            tangential,
            affine,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn radial(&self) -> &[f64] {
        &self.radial
    }

    pub fn tangential(&self) -> [f64; 2] {
        self.tangential
    }

    pub fn affine(&self) -> [f64; 2] {
        self.affine
    }
}

impl Distortion for Fraser {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let [p0, p1] = self.tangential;
        let [b0, b1] = self.affine;
        let x = point.x - self.center.x;
        let y = point.y - self.center.y;
        let x2 = x * x;
        let y2 = y * y;
        let xy = x * y;
        let r2 = x2 + y2;
        let radial = r2 * horner(&self.radial, r2);
        Point2::new(
            point.x + radial * x + p0 * (2.0 * x2 + r2) + p1 * 2.0 * xy + b0 * x + b1 * y,
            point.y + radial * y + p1 * (2.0 * y2 + r2) + p0 * 2.0 * xy,
        )
    }
}
