use crate::{
    Brown, DistortionError, DistortionModel, Ebner, FishEye, Fraser, Polynom, Radial, Result,
};
use core::{fmt, str::FromStr};
use nalgebra::Point2;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Names the family of a [`DistortionModel`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(rename_all = "lowercase"))]
pub enum DistortionKind {
    Radial,
    Fraser,
    Brown,
    Ebner,
    Polynom,
    FishEye,
}

impl DistortionKind {
    pub const ALL: [DistortionKind; 6] = [
        Self::Radial,
        Self::Fraser,
        Self::Brown,
        Self::Ebner,
        Self::Polynom,
        Self::FishEye,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Fraser => "fraser",
            Self::Brown => "brown",
            Self::Ebner => "ebner",
            Self::Polynom => "polynom",
            Self::FishEye => "fisheye",
        }
    }
}

impl fmt::Display for DistortionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistortionKind {
    type Err = DistortionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DistortionError::UnknownKind(s.to_owned()))
    }
}

/// Distortion coefficients as they come out of a calibration file.
///
/// This is the unchecked form of a [`DistortionModel`]. Converting it with
/// [`DistortionModel::try_from`] validates the coefficient counts of the fixed-size models.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum DistortionSpec {
    Radial {
        center: Point2<f64>,
        coefficients: Vec<f64>,
    },
    Fraser {
        center: Point2<f64>,
        radial: Vec<f64>,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        tangential: [f64; 2],
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        affine: [f64; 2],
    },
    Brown {
        focal: f64,
        coefficients: Vec<f64>,
    },
    Ebner {
        b2: f64,
        coefficients: Vec<f64>,
    },
    Polynom {
        center: Point2<f64>,
        scale: f64,
        coefficients: Vec<f64>,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        degree: Option<usize>,
    },
    FishEye {
        center: Point2<f64>,
        focal: f64,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        radial: Vec<f64>,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        tangential: Vec<f64>,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        l: Vec<f64>,
        #[cfg_attr(feature = "serde-serialize", serde(default))]
        equisolid: bool,
    },
}

impl DistortionSpec {
    pub fn kind(&self) -> DistortionKind {
        match self {
            Self::Radial { .. } => DistortionKind::Radial,
            Self::Fraser { .. } => DistortionKind::Fraser,
            Self::Brown { .. } => DistortionKind::Brown,
            Self::Ebner { .. } => DistortionKind::Ebner,
            Self::Polynom { .. } => DistortionKind::Polynom,
            Self::FishEye { .. } => DistortionKind::FishEye,
        }
    }
}

fn fixed<const N: usize>(model: &'static str, coefficients: &[f64]) -> Result<[f64; N]> {
    <[f64; N]>::try_from(coefficients).map_err(|_| DistortionError::CoefficientCount {
        model,
        expected: N,
        actual: coefficients.len(),
    })
}

impl TryFrom<DistortionSpec> for DistortionModel {
    type Error = DistortionError;

    fn try_from(spec: DistortionSpec) -> Result<Self> {
        Ok(match spec {
            DistortionSpec::Radial {
                center,
                coefficients,
            } => Radial::new(center, coefficients).into(),
            DistortionSpec::Fraser {
                center,
                radial,
                tangential,
                affine,
            } => Fraser::new(center, radial, tangential, affine).into(),
            DistortionSpec::Brown {
                focal,
                coefficients,
            } => Brown::new(focal, fixed("brown", &coefficients)?).into(),
            DistortionSpec::Ebner { b2, coefficients } => {
                Ebner::new(b2, fixed("ebner", &coefficients)?).into()
            }
            DistortionSpec::Polynom {
                center,
                scale,
                coefficients,
                degree,
            } => Polynom::new(center, scale, coefficients, degree)?.into(),
            DistortionSpec::FishEye {
                center,
                focal,
                radial,
                tangential,
                l,
                equisolid,
            } => FishEye::new(center, focal, radial, tangential, l, equisolid).into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("FishEye".parse::<DistortionKind>(), Ok(DistortionKind::FishEye));
        assert_eq!("RADIAL".parse::<DistortionKind>(), Ok(DistortionKind::Radial));
        for kind in DistortionKind::ALL {
            assert_eq!(kind.to_string().parse::<DistortionKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind() {
        assert_eq!(
            "division".parse::<DistortionKind>(),
            Err(DistortionError::UnknownKind("division".to_owned()))
        );
    }

    #[test]
    fn fixed_models_check_coefficient_count() {
        let spec = DistortionSpec::Brown {
            focal: 1000.0,
            coefficients: vec![0.0; 12],
        };
        assert_eq!(
            DistortionModel::try_from(spec),
            Err(DistortionError::CoefficientCount {
                model: "brown",
                expected: 14,
                actual: 12
            })
        );
        let spec = DistortionSpec::Ebner {
            b2: 1.0,
            coefficients: vec![0.0; 12],
        };
        let model = DistortionModel::try_from(spec).unwrap();
        assert_eq!(model.kind(), DistortionKind::Ebner);
    }

    #[test]
    fn spec_and_model_agree_on_kind() {
        let spec = DistortionSpec::Polynom {
            center: Point2::new(10.0, 10.0),
            scale: 20.0,
            coefficients: vec![1e-3; 6],
            degree: None,
        };
        let kind = spec.kind();
        assert_eq!(DistortionModel::try_from(spec).unwrap().kind(), kind);
    }
}
