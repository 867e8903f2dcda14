use super::Distortion;
use crate::horner;
use nalgebra::Point2;

/// Fisheye lens distortion on top of an equidistant or equisolid angular projection.
///
/// A pixel is first normalized as $\frac{p - C}{F}$. Its distance $R$ to the axis is turned into
/// the incidence angle $θ = \arctan R$, which becomes the new radius either directly
/// (equidistant) or as $2 \sin \frac{θ}{2}$ (equisolid). The remapped point then receives:
///
/// * radial distortion with the coefficients `radial`,
/// * a linear term where `l[0]` scales x and `l[1]` couples the two axes,
/// * a tangential series whose pairs are weighted by increasing powers of $r^2$,
/// * polynomial terms of degree three and above from the rest of `l`.
#[derive(Debug, Clone, PartialEq)]
pub struct FishEye {
    center: Point2<f64>,
    focal: f64,
    radial: Vec<f64>,
    tangential: Vec<f64>,
    l: Vec<f64>,
    equisolid: bool,
}

impl FishEye {
    /// `l` is padded with zeros to at least two entries and `tangential` to an even length.
    pub fn new(
        center: Point2<f64>,
        focal: f64,
        radial: Vec<f64>,
        mut tangential: Vec<f64>,
        mut l: Vec<f64>,
        equisolid: bool,
    ) -> Self {
        if l.len() < 2 {
            l.resize(2, 0.0);
        }
        if tangential.len() % 2 == 1 {
            tangential.push(0.0);
        }
        Self {
            center,
            focal,
            radial,
            tangential,
            l,
            equisolid,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn radial(&self) -> &[f64] {
        &self.radial
    }

    pub fn tangential(&self) -> &[f64] {
        &self.tangential
    }

    pub fn l(&self) -> &[f64] {
        &self.l
    }

    pub fn is_equisolid(&self) -> bool {
        self.equisolid
    }
}

impl Distortion for FishEye {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        let a = (point.x - self.center.x) / self.focal;
        let b = (point.y - self.center.y) / self.focal;
        let r = a.hypot(b);
        let lambda = if r == 0.0 {
            1.0
        } else {
            let theta = r.atan();
            let theta = if self.equisolid {
                2.0 * (0.5 * theta).sin()
            } else {
                theta
            };
            theta / r
        };
        let x = lambda * a;
        let y = lambda * b;
        let x2 = x * x;
        let xy = x * y;
        let y2 = y * y;
        let r2 = x2 + y2;

        let radial = 1.0 + r2 * horner(&self.radial, r2);
        let mut px = y * self.l[1] + x * (radial + self.l[0]);
        let mut py = x * self.l[1] + y * radial;

        let mut rk = 1.0;
        for (k, pair) in self.tangential.chunks_exact(2).enumerate() {
            let weight = (2 * k + 2) as f64;
            px += rk * ((r2 + weight * x2) * pair[0] + pair[1] * weight * xy);
            py += rk * ((r2 + weight * y2) * pair[1] + pair[0] * weight * xy);
            rk *= r2;
        }

        // Monomials of the current degree, from x^d down to y^d. Degree two has no terms here.
        let l = |j: usize| self.l.get(j).copied().unwrap_or(0.0);
        let mut monomials = vec![x2, xy, y2];
        let mut j = 2;
        let mut d = 3;
        while j < self.l.len() {
            monomials.push(y * monomials[d - 1]);
            monomials[0] *= x;
            py += l(j) * monomials[0];
            j += 1;
            for m in 1..d {
                monomials[m] *= x;
                px += l(j) * monomials[m];
                py += l(j + 1) * monomials[m];
                j += 2;
            }
            px += l(j) * monomials[d];
            j += 1;
            if d % 2 == 1 {
                py += l(j) * monomials[d];
                j += 1;
            }
            d += 1;
        }

        Point2::new(
            self.center.x + self.focal * px,
            self.center.y + self.focal * py,
        )
    }
}
