use crate::Verification;
use cv_distortion::DistortionSpec;
use nalgebra::{Matrix4, Point2, Vector2};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Everything a calibration file says about a camera.
///
/// Orientation parsers produce this record and [`Camera::new`](crate::Camera::new) turns it into a
/// camera. Setters consume `self` so parameters can be built fluently:
///
/// ```
/// use cv_photogrammetric::CameraParameters;
/// use cv_photogrammetric::nalgebra::Vector2;
///
/// let parameters = CameraParameters::default()
///     .size(Vector2::new(4000.0, 3000.0))
///     .focal(3500.0)
///     .near(0.5);
/// assert_eq!(parameters.focal, Vector2::new(3500.0, 3500.0));
/// assert_eq!(parameters.far, 2000.0);
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParameters {
    /// Focal lengths in pixels.
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_focal"))]
    pub focal: Vector2<f64>,
    /// Image size in pixels.
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_size"))]
    pub size: Vector2<f64>,
    /// Principal point in pixels, the image center when absent.
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub principal_point: Option<Point2<f64>>,
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub skew: f64,
    /// Width over height of the render target, the image aspect when absent.
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub aspect: Option<f64>,
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_near"))]
    pub near: f64,
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_far"))]
    pub far: f64,
    /// Distortions in the order they are applied when projecting.
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub distortions: Vec<DistortionSpec>,
    /// Camera to world transform.
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_world_transform")
    )]
    pub world_transform: Matrix4<f64>,
    /// Radius (pixels) of the image area where the calibration is trustworthy.
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub max_radius: Option<f64>,
    /// Ground control points shipped with the calibration.
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub verification: Option<Verification>,
}

impl CameraParameters {
    pub fn focals(self, focal: Vector2<f64>) -> Self {
        Self { focal, ..self }
    }

    pub fn focal(self, focal: f64) -> Self {
        Self {
            focal: Vector2::new(focal, focal),
            ..self
        }
    }

    pub fn size(self, size: Vector2<f64>) -> Self {
        Self { size, ..self }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point: Some(principal_point),
            ..self
        }
    }

    pub fn skew(self, skew: f64) -> Self {
        Self { skew, ..self }
    }

    pub fn aspect(self, aspect: f64) -> Self {
        Self {
            aspect: Some(aspect),
            ..self
        }
    }

    pub fn near(self, near: f64) -> Self {
        Self { near, ..self }
    }

    pub fn far(self, far: f64) -> Self {
        Self { far, ..self }
    }

    /// Appends a distortion to the end of the chain.
    pub fn distortion(mut self, distortion: DistortionSpec) -> Self {
        self.distortions.push(distortion);
        self
    }

    pub fn distortions(self, distortions: Vec<DistortionSpec>) -> Self {
        Self {
            distortions,
            ..self
        }
    }

    pub fn world_transform(self, world_transform: Matrix4<f64>) -> Self {
        Self {
            world_transform,
            ..self
        }
    }

    pub fn max_radius(self, max_radius: f64) -> Self {
        Self {
            max_radius: Some(max_radius),
            ..self
        }
    }

    pub fn verification(self, verification: Verification) -> Self {
        Self {
            verification: Some(verification),
            ..self
        }
    }

    /// The principal point after defaulting to the image center.
    pub fn resolved_principal_point(&self) -> Point2<f64> {
        self.principal_point
            .unwrap_or_else(|| Point2::from(self.size * 0.5))
    }

    /// The aspect after defaulting to the image aspect.
    pub fn resolved_aspect(&self) -> f64 {
        self.aspect.unwrap_or(self.size.x / self.size.y)
    }
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            focal: default_focal(),
            size: default_size(),
            principal_point: None,
            skew: 0.0,
            aspect: None,
            near: default_near(),
            far: default_far(),
            distortions: Vec::new(),
            world_transform: default_world_transform(),
            max_radius: None,
            verification: None,
        }
    }
}

fn default_focal() -> Vector2<f64> {
    Vector2::new(1024.0, 1024.0)
}

fn default_size() -> Vector2<f64> {
    Vector2::new(1024.0, 1024.0)
}

fn default_near() -> f64 {
    0.1
}

fn default_far() -> f64 {
    2000.0
}

fn default_world_transform() -> Matrix4<f64> {
    Matrix4::identity()
}
