use super::Distortion;
use nalgebra::Point2;

/// Conrady-Brown distortion with decentering, thin-prism and a combined correction term.
///
/// The model acts on raw pixel coordinates. With
/// $f = P_{12} ⋅ \frac{x^2 y^2}{F} + P_{13} ⋅ (x^2 + y^2)$:
///
/// $$
/// \begin{aligned}
/// Δx &= P_0 x + P_1 y + P_2 xy + P_3 y^2 + P_4 x^2 y + P_5 x y^2 + P_6 x^2 y^2 + f ⋅ x \\\\
/// Δy &= P_7 xy + P_8 x^2 + P_9 x^2 y + P_{10} x y^2 + P_{11} x^2 y^2 + f ⋅ y
/// \end{aligned}
/// $$
///
/// The layout is deliberately asymmetric between the two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Brown {
    focal: f64,
    coefficients: [f64; 14],
}

impl Brown {
    pub fn new(focal: f64, coefficients: [f64; 14]) -> Self {
        Self {
            focal,
            coefficients,
        }
    }

    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn coefficients(&self) -> &[f64; 14] {
        &self.coefficients
    }
}

impl Distortion for Brown {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let p = &self.coefficients;
        let (x, y) = (point.x, point.y);
        let x2 = x * x;
        let y2 = y * y;
        let xy = x * y;
        let xy2 = x * y2;
        let yx2 = y * x2;
        let x2y2 = x2 * y2;
        let f = p[12] * x2y2 / self.focal + p[13] * (x2 + y2);
        Point2::new(
            x + p[0] * x
                + p[1] * y
                + p[2] * xy
                + p[3] * y2
                + p[4] * yx2
                + p[5] * xy2
                + p[6] * x2y2
                + f * x,
            y + p[7] * xy + p[8] * x2 + p[9] * yx2 + p[10] * xy2 + p[11] * x2y2 + f * y,
        )
    }
}
