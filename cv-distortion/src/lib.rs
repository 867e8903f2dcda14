//! Lens distortion models used by photogrammetric calibrations.
//!
//! Every model maps a point of the ideal (pinhole) pixel plane to the pixel where the real lens
//! images it. Models are immutable once built and can be shared freely between cameras and threads.
//! A camera applies its models in list order, which mirrors the convention under which the
//! coefficients were estimated.
//!
//! The crate also contains the small numeric kernels the models rely on: Horner evaluation of
//! coefficient lists ([`horner`]) and closed-form polynomial root finding ([`solve_cubic`]) used to
//! bound the domain on which a radial model stays injective ([`radial3_validity_bound`]).
//!
//! ```
//! use cv_distortion::{Distortion, DistortionModel, Radial};
//! use cv_distortion::nalgebra::Point2;
//!
//! let radial = DistortionModel::from(Radial::new(Point2::new(512.0, 512.0), vec![1e-8, 0.0, 0.0]));
//! // The distortion center is a fixed point of every radial model.
//! assert_eq!(radial.project(Point2::new(512.0, 512.0)), Point2::new(512.0, 512.0));
//! ```

mod error;
mod model;
mod polynomial;
mod roots;
mod spec;

pub use error::*;
pub use model::*;
pub use nalgebra;
pub use polynomial::*;
pub use roots::*;
pub use spec::*;
