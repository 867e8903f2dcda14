use thiserror::Error;

/// Failures raised while building a distortion model from calibration data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistortionError {
    /// The calibration names a distortion family this crate does not implement.
    #[error("unknown distortion model `{0}`")]
    UnknownKind(String),
    /// A fixed-size model received the wrong number of coefficients.
    #[error("{model} distortion expects {expected} coefficients, got {actual}")]
    CoefficientCount {
        model: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A polynomial model was given a degree it cannot represent.
    #[error("unsupported polynomial degree {degree} for {coefficients} coefficients")]
    Degree { degree: usize, coefficients: usize },
}

pub type Result<T> = std::result::Result<T, DistortionError>;
