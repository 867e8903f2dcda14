mod brown;
mod ebner;
mod fisheye;
mod fraser;
mod polynom;
mod radial;

pub use brown::Brown;
pub use ebner::Ebner;
pub use fisheye::FishEye;
pub use fraser::Fraser;
pub use polynom::{polynom_coefficient_count, Polynom};
pub use radial::Radial;

use crate::DistortionKind;
use nalgebra::Point2;

/// A lens distortion acting on the pixel plane.
pub trait Distortion {
    /// Maps an ideal (pinhole) pixel to the pixel where the lens actually images it.
    fn project(&self, point: Point2<f64>) -> Point2<f64>;
}

/// One of the distortion families found in photogrammetric calibrations.
///
/// The set of families is closed: it is the set the supported calibration formats can describe.
#[derive(Debug, Clone, PartialEq)]
pub enum DistortionModel {
    Radial(Radial),
    Fraser(Fraser),
    Brown(Brown),
    Ebner(Ebner),
    Polynom(Polynom),
    FishEye(FishEye),
}

impl DistortionModel {
    /// The tag naming the family of this model.
    pub fn kind(&self) -> DistortionKind {
        match self {
            Self::Radial(_) => DistortionKind::Radial,
            Self::Fraser(_) => DistortionKind::Fraser,
            Self::Brown(_) => DistortionKind::Brown,
            Self::Ebner(_) => DistortionKind::Ebner,
            Self::Polynom(_) => DistortionKind::Polynom,
            Self::FishEye(_) => DistortionKind::FishEye,
        }
    }

    /// Squared distance to the distortion center (in pixels²) beyond which the model may stop
    /// being injective.
    ///
    /// Only radial models of at most three terms have a closed-form bound. Every other model
    /// reports `f64::INFINITY`.
    pub fn validity_bound(&self) -> f64 {
        match self {
            Self::Radial(radial) => radial.validity_bound().unwrap_or(f64::INFINITY),
            _ => f64::INFINITY,
        }
    }
}

impl Distortion for DistortionModel {
    fn project(&self, point: Point2<f64>) -> Point2<f64> {
        match self {
            Self::Radial(model) => model.project(point),
            Self::Fraser(model) => model.project(point),
            Self::Brown(model) => model.project(point),
            Self::Ebner(model) => model.project(point),
            Self::Polynom(model) => model.project(point),
            Self::FishEye(model) => model.project(point),
        }
    }
}

macro_rules! impl_from_model {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for DistortionModel {
                fn from(model: $variant) -> Self {
                    Self::$variant(model)
                }
            }
        )*
    };
}

impl_from_model!(Radial, Fraser, Brown, Ebner, Polynom, FishEye);

/// Applies each model to the point in order, feeding the output of one model into the next.
pub fn distort_chain<'a, I>(models: I, point: Point2<f64>) -> Point2<f64>
where
    I: IntoIterator<Item = &'a DistortionModel>,
{
    models
        .into_iter()
        .fold(point, |point, model| model.project(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn chain_applies_models_in_order() {
        let center = Point2::new(100.0, 100.0);
        let radial = DistortionModel::from(Radial::new(center, vec![1e-4]));
        let ebner = DistortionModel::from(Ebner::new(
            0.0,
            [1e-3, 2e-3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ));
        let point = Point2::new(110.0, 95.0);

        let forward = distort_chain([&radial, &ebner], point);
        let backward = distort_chain([&ebner, &radial], point);
        assert_relative_eq!(forward, ebner.project(radial.project(point)));
        assert_relative_eq!(backward, radial.project(ebner.project(point)));
        assert!((forward - backward).norm() > 1e-6);
    }

    #[test]
    fn empty_chain_is_identity() {
        let models: Vec<DistortionModel> = Vec::new();
        let point = Point2::new(3.0, -4.0);
        assert_eq!(distort_chain(&models, point), point);
    }

    #[test]
    fn validity_bound_only_for_radial() {
        let radial = DistortionModel::from(Radial::new(Point2::origin(), vec![-1.0]));
        assert_relative_eq!(radial.validity_bound(), 1.0 / 3.0);
        let brown = DistortionModel::from(Brown::new(1000.0, [0.0; 14]));
        assert_eq!(brown.validity_bound(), f64::INFINITY);
        assert_eq!(brown.kind(), DistortionKind::Brown);
    }
}
