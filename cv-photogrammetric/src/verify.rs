use crate::Camera;
use log::{info, warn};
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A surveyed point together with the pixel where the calibration claims it is imaged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    pub id: u64,
    /// World coordinates.
    pub world: Point3<f64>,
    /// Expected distorted pixel.
    pub pixel: Point2<f64>,
}

/// Ground control points embedded in a calibration and the tolerance they must meet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Verification {
    /// Maximum distance in pixels between the expected and the projected pixel.
    pub epsilon: f64,
    pub points: Vec<ControlPoint>,
}

impl Verification {
    pub fn new(epsilon: f64, points: Vec<ControlPoint>) -> Self {
        Self { epsilon, points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub id: u64,
    pub expected: Point2<f64>,
    pub actual: Point2<f64>,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationReport {
    pub epsilon: f64,
    /// Number of control points that were projected.
    pub checked: usize,
    /// Control points farther than `epsilon` from their expected pixel.
    pub failures: Vec<Residual>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Camera {
    /// Projects control points through the camera and reports those missing their expected pixel.
    ///
    /// `epsilon` overrides the tolerance of the verification and `limit` restricts the check to the
    /// first points.
    pub fn verify(
        &self,
        verification: &Verification,
        epsilon: Option<f64>,
        limit: Option<usize>,
    ) -> VerificationReport {
        let epsilon = epsilon.unwrap_or(verification.epsilon);
        let limit = limit.unwrap_or(verification.points.len());
        let mut checked = 0;
        let mut failures = Vec::new();
        for point in verification.points.iter().take(limit) {
            checked += 1;
            let actual = self.distort(point.world).pixel();
            let distance = (actual - point.pixel).norm();
            if distance > epsilon || distance.is_nan() {
                warn!(
                    "control point {} is {} pixels away: projected {} expected {} from {}",
                    point.id, distance, actual, point.pixel, point.world
                );
                failures.push(Residual {
                    id: point.id,
                    expected: point.pixel,
                    actual,
                    distance,
                });
            }
        }
        info!(
            "verified {} control points with tolerance {}: {} failed",
            checked,
            epsilon,
            failures.len()
        );
        VerificationReport {
            epsilon,
            checked,
            failures,
        }
    }

    /// Runs the verification that came with the calibration, if any.
    pub fn check(&self, epsilon: Option<f64>, limit: Option<usize>) -> Option<VerificationReport> {
        self.verification()
            .map(|verification| self.verify(verification, epsilon, limit))
    }
}
