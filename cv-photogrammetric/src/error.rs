use cv_distortion::DistortionError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("invalid distortion: {0}")]
    Distortion(#[from] DistortionError),
    #[error("view must have a positive size, got {width}x{height}")]
    InvalidView { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, CameraError>;
