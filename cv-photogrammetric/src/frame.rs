use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point in the distorted pixel frame of the full image.
///
/// `x` grows to the right and `y` grows downwards, both in pixels. `z` carries the clip-space depth
/// of the pinhole projection, `-1` on the near plane and `1` on the far plane.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PixelPoint(pub Point3<f64>);

impl PixelPoint {
    /// The pixel position without depth.
    pub fn pixel(&self) -> Point2<f64> {
        self.0.xy()
    }
}

/// A point in normalized texture space, `[0, 1]²` over the image (or over the crop when one is active).
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TexturePoint(pub Point3<f64>);

impl TexturePoint {
    pub fn uv(&self) -> Point2<f64> {
        self.0.xy()
    }
}

/// A point in normalized device coordinates, `[-1, 1]²` with `y` up, after zoom and aspect correction.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct NdcPoint(pub Point3<f64>);

impl NdcPoint {
    /// Whether the point lies inside the visible volume.
    pub fn is_visible(&self) -> bool {
        self.0.iter().all(|c| (-1.0..=1.0).contains(c))
    }
}
