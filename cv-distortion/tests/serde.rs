#![cfg(feature = "serde-serialize")]

use cv_distortion::nalgebra::Point2;
use cv_distortion::{DistortionKind, DistortionModel, DistortionSpec};

#[test]
fn spec_is_tagged_by_kind() {
    let json = r#"[
        {"type": "radial", "center": [1000.0, 750.0], "coefficients": [1e-8]},
        {"type": "fisheye", "center": [1000.0, 750.0], "focal": 800.0, "equisolid": true},
        {"type": "polynom", "center": [1000.0, 750.0], "scale": 1200.0, "coefficients": [0.0, 1e-4]}
    ]"#;
    let specs: Vec<DistortionSpec> = serde_json::from_str(json).unwrap();
    let kinds: Vec<DistortionKind> = specs.iter().map(DistortionSpec::kind).collect();
    assert_eq!(
        kinds,
        vec![
            DistortionKind::Radial,
            DistortionKind::FishEye,
            DistortionKind::Polynom
        ]
    );
    match &specs[1] {
        DistortionSpec::FishEye {
            center,
            l,
            equisolid,
            ..
        } => {
            assert_eq!(*center, Point2::new(1000.0, 750.0));
            assert!(l.is_empty());
            assert!(*equisolid);
        }
        other => panic!("unexpected spec {:?}", other),
    }
    for spec in specs {
        DistortionModel::try_from(spec).unwrap();
    }
}

#[test]
fn unknown_type_is_rejected() {
    let json = r#"{"type": "division", "center": [0.0, 0.0]}"#;
    assert!(serde_json::from_str::<DistortionSpec>(json).is_err());
}

#[test]
fn spec_survives_json() {
    let spec = DistortionSpec::Fraser {
        center: Point2::new(12.0, 34.0),
        radial: vec![1e-9, 2e-16],
        tangential: [1e-7, 2e-7],
        affine: [0.0, 1e-6],
    };
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains(r#""type":"fraser""#));
    assert_eq!(serde_json::from_str::<DistortionSpec>(&json).unwrap(), spec);
}
