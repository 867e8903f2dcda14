use arrayvec::ArrayVec;
use float_ord::FloatOrd;
use std::f64::consts::PI;

/// Real roots of a polynomial of degree at most three.
///
/// Repeated roots are listed with their multiplicity when the closed form produces them
/// (a triple root appears three times).
pub type Roots = ArrayVec<f64, 3>;

/// Real root of `a⋅x + b = 0`.
///
/// A degenerate equation (`a == 0`) has no isolated root and yields an empty list.
pub fn solve_linear(a: f64, b: f64) -> Roots {
    let mut roots = Roots::new();
    if a != 0.0 {
        roots.push(-b / a);
    }
    roots
}

/// Real roots of `a⋅x² + b⋅x + c = 0`, smallest first.
///
/// ```
/// let roots = cv_distortion::solve_quadratic(1.0, 0.0, -4.0);
/// assert_eq!(roots.as_slice(), &[-2.0, 2.0]);
/// assert!(cv_distortion::solve_quadratic(1.0, 0.0, 4.0).is_empty());
/// ```
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a == 0.0 {
        return solve_linear(b, c);
    }
    let mut roots = Roots::new();
    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        return roots;
    }
    let x0 = -b / (2.0 * a);
    if delta == 0.0 {
        roots.push(x0);
        return roots;
    }
    let half_width = (delta.sqrt() / (2.0 * a)).abs();
    roots.push(x0 - half_width);
    roots.push(x0 + half_width);
    roots
}

/// Real roots of `a⋅x³ + b⋅x² + c⋅x + d = 0` using Cardano's method.
///
/// # Method
///
/// The substitution $x = t - \frac{b}{3a}$ gives the depressed cubic $t^3 + p⋅t + q = 0$.
/// The sign of $Δ = q^2 + \frac{4p^3}{27}$ selects the branch:
///
/// * $Δ > 0$: a single real root from the sum of two real cube roots,
/// * $Δ = 0$: a simple and a double root,
/// * $Δ < 0$: three real roots from the trigonometric form.
///
/// When `a == 0` the equation is solved as a quadratic in `b, c, d`.
///
/// ```
/// let mut roots = cv_distortion::solve_cubic(1.0, -6.0, 11.0, -6.0);
/// roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
///     assert!((root - expected).abs() < 1e-12);
/// }
/// ```
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Roots {
    if a == 0.0 {
        return solve_quadratic(b, c, d);
    }
    let shift = -b / (3.0 * a);
    let a2 = a * a;
    let b2 = b * b;
    let p = c / a - b2 / (3.0 * a2);
    let q = b2 * b / (a2 * a * 13.5) + d / a - b * c / (3.0 * a2);
    if p == 0.0 {
        let x0 = (-q).cbrt() + shift;
        return Roots::from([x0, x0, x0]);
    }

    let p3_4_27 = p * p * p * 4.0 / 27.0;
    let delta = q * q + p3_4_27;
    if delta > 0.0 {
        let sqrt_delta = delta.sqrt();
        let u = ((-q + sqrt_delta) * 0.5).cbrt();
        let v = ((-q - sqrt_delta) * 0.5).cbrt();
        let mut roots = Roots::new();
        roots.push(u + v + shift);
        roots
    } else if delta == 0.0 {
        let z0 = 3.0 * q / p;
        let x12 = shift - z0 * 0.5;
        Roots::from([shift + z0, x12, x12])
    } else {
        // delta < 0 implies p < 0, so both square roots are real.
        let phi = (-q / (-p3_4_27).sqrt()).clamp(-1.0, 1.0).acos();
        let r = 2.0 * (-p / 3.0).sqrt();
        Roots::from([
            shift + r * (phi / 3.0).cos(),
            shift + r * ((phi - 2.0 * PI) / 3.0).cos(),
            shift + r * ((phi - 4.0 * PI) / 3.0).cos(),
        ])
    }
}

/// Maximum squared radius on which the radial distortion $r ↦ r ⋅ (1 + R_0 r^2 + R_1 r^4 + R_2 r^6)$
/// is guaranteed to be injective.
///
/// This is the smallest strictly positive root of the derivative
/// $7 R_2 x^3 + 5 R_1 x^2 + 3 R_0 x + 1$ with $x = r^2$. If the derivative never vanishes on the
/// positive axis the whole plane is valid and `f64::INFINITY` is returned.
///
/// ```
/// assert_eq!(cv_distortion::radial3_validity_bound(&[0.0, 0.0, 0.0]), f64::INFINITY);
/// assert!((cv_distortion::radial3_validity_bound(&[-1.0, 0.0, 0.0]) - 1.0 / 3.0).abs() < 1e-15);
/// ```
pub fn radial3_validity_bound(r: &[f64; 3]) -> f64 {
    solve_cubic(7.0 * r[2], 5.0 * r[1], 3.0 * r[0], 1.0)
        .into_iter()
        .filter(|&root| root > 0.0)
        .min_by_key(|&root| FloatOrd(root))
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn sorted(mut roots: Roots) -> Roots {
        roots.sort_by_key(|&r| FloatOrd(r));
        roots
    }

    #[test]
    fn quadratic_branches() {
        assert_eq!(solve_quadratic(1.0, 0.0, -4.0).as_slice(), &[-2.0, 2.0]);
        assert!(solve_quadratic(1.0, 0.0, 4.0).is_empty());
        assert_eq!(solve_quadratic(1.0, -2.0, 1.0).as_slice(), &[1.0]);
        // Negative leading coefficient still reports the smaller root first.
        assert_eq!(solve_quadratic(-1.0, 0.0, 4.0).as_slice(), &[-2.0, 2.0]);
    }

    #[test]
    fn degenerate_quadratic_is_linear() {
        assert_eq!(solve_quadratic(0.0, 2.0, -1.0).as_slice(), &[0.5]);
        assert!(solve_quadratic(0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn cubic_three_real_roots() {
        let roots = sorted(solve_cubic(1.0, -6.0, 11.0, -6.0));
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn cubic_asymmetric_three_real_roots() {
        // 2(x + 4)(x - 0.5)(x - 7)
        let roots = sorted(solve_cubic(2.0, -7.0, -53.0, 28.0));
        for (root, expected) in roots.iter().zip([-4.0, 0.5, 7.0]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn cubic_single_real_root() {
        // (x - 2)(x² + 1)
        let roots = solve_cubic(1.0, -2.0, 1.0, -2.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn cubic_triple_root() {
        // (x + 1)³
        let roots = solve_cubic(1.0, 3.0, 3.0, 1.0);
        assert_eq!(roots.len(), 3);
        for root in roots {
            assert_relative_eq!(root, -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn cubic_double_root() {
        // (x - 1)²(x + 2) = x³ - 3x + 2
        let roots = sorted(solve_cubic(1.0, 0.0, -3.0, 2.0));
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([-2.0, 1.0, 1.0]) {
            assert_relative_eq!(*root, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn cubic_without_leading_term_is_quadratic() {
        let roots = solve_cubic(0.0, 1.0, 0.0, -4.0);
        assert_eq!(roots.as_slice(), &[-2.0, 2.0]);
    }

    #[test]
    fn validity_bound_of_monotonic_distortion_is_infinite() {
        assert_eq!(radial3_validity_bound(&[0.0, 0.0, 0.0]), f64::INFINITY);
        assert_eq!(radial3_validity_bound(&[0.1, 0.01, 0.001]), f64::INFINITY);
    }

    #[test]
    fn validity_bound_is_smallest_positive_root() {
        // 7x³ - 20.5x² + 12.5x + 1 = 7(x - 1)(x - 2)(x + 1/14)
        let bound = radial3_validity_bound(&[12.5 / 3.0, -4.1, 1.0]);
        assert_relative_eq!(bound, 1.0, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn cubic_roots_are_zeros(
            r0 in -5.0f64..5.0,
            r1 in -5.0f64..5.0,
            r2 in -5.0f64..5.0,
        ) {
            // Monic polynomial with known real roots r0, r1, r2.
            let b = -(r0 + r1 + r2);
            let c = r0 * r1 + r0 * r2 + r1 * r2;
            let d = -r0 * r1 * r2;
            for root in solve_cubic(1.0, b, c, d) {
                let value = ((root + b) * root + c) * root + d;
                prop_assert!(value.abs() < 1e-6, "residual {} at {}", value, root);
            }
        }
    }
}
