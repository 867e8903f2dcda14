use crate::{CameraError, Result};
use nalgebra::Matrix4;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A rectangular crop of the full image that the texture frame is stretched over.
///
/// All lengths are in pixels of the full image.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct View {
    pub full_width: f64,
    pub full_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    pub enabled: bool,
}

impl View {
    /// Creates an enabled crop of size `width`×`height` whose top-left corner is at
    /// (`offset_x`, `offset_y`) in an image of size `full_width`×`full_height`.
    pub fn new(
        full_width: f64,
        full_height: f64,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(CameraError::InvalidView { width, height });
        }
        if !(full_width > 0.0 && full_height > 0.0) {
            return Err(CameraError::InvalidView {
                width: full_width,
                height: full_height,
            });
        }
        Ok(Self {
            full_width,
            full_height,
            offset_x,
            offset_y,
            width,
            height,
            enabled: true,
        })
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Maps normalized coordinates of the full image to normalized coordinates of the crop.
    #[rustfmt::skip]
    pub fn crop_matrix(&self) -> Matrix4<f64> {
        let sx = self.full_width / self.width;
        let sy = self.full_height / self.height;
        let ox = self.offset_x / self.full_width;
        let oy = self.offset_y / self.full_height;
        Matrix4::new(
            sx,  0.0, 0.0, -sx * ox,
            0.0, sy,  0.0, -sy * oy,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Interpolates the crop geometry. The enabled flag is taken from whichever side `t` is closer to.
    pub fn lerp(&self, other: &View, t: f64) -> View {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        View {
            full_width: mix(self.full_width, other.full_width),
            full_height: mix(self.full_height, other.full_height),
            offset_x: mix(self.offset_x, other.offset_x),
            offset_y: mix(self.offset_y, other.offset_y),
            width: mix(self.width, other.width),
            height: mix(self.height, other.height),
            enabled: if t < 0.5 { self.enabled } else { other.enabled },
        }
    }
}
