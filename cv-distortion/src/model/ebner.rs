use super::Distortion;
use nalgebra::Point2;

/// Ebner's orthogonal polynomial distortion.
///
/// Squares are centered on the basis value $B_2$ before forming monomials:
/// $\bar x = x^2 - B_2$ and $\bar y = y^2 - B_2$.
///
/// $$
/// \begin{aligned}
/// Δx &= P_0 x + P_1 y - 2 P_2 \bar x + P_3 xy + P_4 \bar y + P_6 x \bar y + P_8 y \bar x + P_{10} \bar x \bar y \\\\
/// Δy &= -P_0 y + P_1 x + P_2 xy - 2 P_3 \bar y + P_5 \bar x + P_7 y \bar x + P_9 x \bar y + P_{11} \bar x \bar y
/// \end{aligned}
/// $$
///
/// The first order terms pair up like an infinitesimal rotation and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Ebner {
    b2: f64,
    coefficients: [f64; 12],
}

impl Ebner {
    pub fn new(b2: f64, coefficients: [f64; 12]) -> Self {
        Self { b2, coefficients }
    }

    /// Creates the model from the basis length `b` stored by calibrations, with $B_2 = \frac{b^2}{1.5}$.
    pub fn from_base(base: f64, coefficients: [f64; 12]) -> Self {
        Self::new(base * base / 1.5, coefficients)
    }

    pub fn b2(&self) -> f64 {
        self.b2
    }

    pub fn coefficients(&self) -> &[f64; 12] {
        &self.coefficients
    }
}

impl Distortion for Ebner {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let p = &self.coefficients;
        let (x, y) = (point.x, point.y);
        let x2 = x * x - self.b2;
        let y2 = y * y - self.b2;
        let xy = x * y;
        let xy2 = x * y2;
        let yx2 = y * x2;
        let x2y2 = x2 * y2;
        Point2::new(
            x + p[0] * x + p[1] * y + p[3] * xy - 2.0 * p[2] * x2
                + p[4] * y2
                + p[6] * xy2
                + p[8] * yx2
                + p[10] * x2y2,
            y + p[1] * x - p[0] * y + p[2] * xy - 2.0 * p[3] * y2
                + p[5] * x2
                + p[9] * xy2
                + p[7] * yx2
                + p[11] * x2y2,
        )
    }
}
