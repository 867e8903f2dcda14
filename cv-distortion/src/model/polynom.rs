use super::Distortion;
use crate::{DistortionError, Result};
use log::debug;
use nalgebra::Point2;

/// Number of coefficients of a [`Polynom`] distortion of the given degree.
///
/// Degree two uses six coefficients and each further degree `d` adds `2 ⋅ (d + 1)`, one run per
/// output axis. Returns `None` below degree two or when the count does not fit in a `usize`.
///
/// ```
/// assert_eq!(cv_distortion::polynom_coefficient_count(2), Some(6));
/// assert_eq!(cv_distortion::polynom_coefficient_count(3), Some(14));
/// assert_eq!(cv_distortion::polynom_coefficient_count(usize::MAX / 2), None);
/// ```
pub fn polynom_coefficient_count(degree: usize) -> Option<usize> {
    if degree < 2 {
        return None;
    }
    degree.checked_add(3)?.checked_mul(degree)?.checked_sub(4)
}

/// Smallest degree whose coefficient count is at least `len`, never below two.
fn infer_degree(len: usize) -> usize {
    // Positive root of d² + 3d - (len + 4) = 0.
    let delta = (25.0 + 4.0 * len as f64).sqrt();
    ((0.5 * delta - 1.5).ceil() as usize).max(2)
}

/// General bivariate polynomial distortion of adaptive degree.
///
/// Points are normalized as $\frac{p - C}{S}$ before evaluation and mapped back afterwards.
/// The degree two block pairs its coefficients like [`Ebner`](crate::Ebner) does. Each degree
/// $d ≥ 3$ then consumes two runs of $d + 1$ coefficients, the first for the x axis and the
/// second for the y axis, against the monomials $x^d, x^{d-1} y, …, y^d$.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynom {
    center: Point2<f64>,
    scale: f64,
    coefficients: Vec<f64>,
    degree: usize,
}

impl Polynom {
    /// Builds the model, inferring the degree from the coefficient count when `degree` is `None`.
    ///
    /// Missing coefficients are zero. Trailing blocks of exact zeros are dropped so that the
    /// model reports the lowest degree that still carries a non-zero coefficient. An explicit
    /// degree only bounds the list; its zero padding is never materialized.
    pub fn new(
        center: Point2<f64>,
        scale: f64,
        mut coefficients: Vec<f64>,
        degree: Option<usize>,
    ) -> Result<Self> {
        let full_degree = match degree {
            Some(degree) => match polynom_coefficient_count(degree) {
                Some(expected) if coefficients.len() <= expected => degree,
                _ => {
                    return Err(DistortionError::Degree {
                        degree,
                        coefficients: coefficients.len(),
                    })
                }
            },
            None => infer_degree(coefficients.len()),
        };

        // An all zero list keeps the degree its length implies.
        let significant = coefficients
            .iter()
            .rposition(|&coefficient| coefficient != 0.0)
            .map_or(coefficients.len(), |last| last + 1);
        let degree = infer_degree(significant).min(full_degree);
        match polynom_coefficient_count(degree) {
            Some(len) => coefficients.resize(len, 0.0),
            None => {
                return Err(DistortionError::Degree {
                    degree,
                    coefficients: coefficients.len(),
                })
            }
        }
        if degree < full_degree {
            debug!(
                "polynom distortion truncated from degree {} to {}",
                full_degree, degree
            );
        }

        Ok(Self {
            center,
            scale,
            coefficients,
            degree,
        })
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Distortion for Polynom {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let r = &self.coefficients;
        let x = (point.x - self.center.x) / self.scale;
        let y = (point.y - self.center.y) / self.scale;

        // Monomials of the current degree, from x^d down to y^d.
        let mut monomials = Vec::with_capacity(self.degree + 1);
        monomials.extend([x * x, x * y, y * y]);
        let mut px = x + r[0] * x + r[1] * y + r[3] * monomials[1] - 2.0 * r[2] * monomials[0]
            + r[4] * monomials[2];
        let mut py = y + r[1] * x - r[0] * y + r[2] * monomials[1] - 2.0 * r[3] * monomials[2]
            + r[5] * monomials[0];

        let mut i = 6;
        let mut d = 3;
        while i < r.len() {
            let j = i + d + 1;
            monomials.push(y * monomials[d - 1]);
            for l in 0..d {
                monomials[l] *= x;
                px += r[i + l] * monomials[l];
                py += r[j + l] * monomials[l];
            }
            px += r[i + d] * monomials[d];
            py += r[j + d] * monomials[d];
            i = j + d + 1;
            d += 1;
        }

        Point2::new(
            self.center.x + self.scale * px,
            self.center.y + self.scale * py,
        )
    }
}
