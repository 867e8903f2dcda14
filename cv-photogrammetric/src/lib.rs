//! A camera model for photogrammetric calibrations, used to project images onto 3D geometry.
//!
//! A [`Camera`] combines pinhole intrinsics (focal lengths, principal point, skew), the lens
//! distortions of its calibration and a pose in the world. It derives the matrices a renderer needs
//! to texture geometry with the image the camera took, and transforms points between the world,
//! the distorted pixel frame, texture space and normalized device coordinates.
//!
//! Cameras are usually created from the [`CameraParameters`] produced by an orientation file parser.
//! Distortion models come from [`cv_distortion`] and are shared between clones of a camera.

mod camera;
mod error;
mod frame;
mod parameters;
mod verify;
mod view;

pub use camera::*;
pub use cv_distortion;
pub use error::*;
pub use frame::*;
pub use nalgebra;
pub use parameters::*;
pub use verify::*;
pub use view::*;
