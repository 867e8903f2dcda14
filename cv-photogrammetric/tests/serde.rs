#![cfg(feature = "serde-serialize")]

use cv_photogrammetric::nalgebra::{Point2, Vector2};
use cv_photogrammetric::{Camera, CameraParameters};

#[test]
fn partial_parameters_get_defaults() {
    let parameters: CameraParameters = serde_json::from_str(r#"{"size": [4000.0, 3000.0]}"#).unwrap();
    assert_eq!(parameters.focal, Vector2::new(1024.0, 1024.0));
    assert_eq!(parameters.near, 0.1);
    assert_eq!(parameters.far, 2000.0);
    assert!(parameters.distortions.is_empty());
    let camera = Camera::new(parameters).unwrap();
    assert_eq!(camera.principal_point(), Point2::new(2000.0, 1500.0));
}

#[test]
fn calibration_with_distortions_and_checks() {
    let json = r#"{
        "focal": [3000.0, 3000.0],
        "size": [4000.0, 3000.0],
        "principal_point": [2010.0, 1495.0],
        "max_radius": 2500.0,
        "distortions": [
            {"type": "radial", "center": [2010.0, 1495.0], "coefficients": [1e-9, 0.0, 0.0]},
            {"type": "brown", "focal": 3000.0, "coefficients": [0,0,0,0,0,0,0,0,0,0,0,0,0,0]}
        ],
        "verification": {
            "epsilon": 0.5,
            "points": [{"id": 1, "world": [0.0, 0.0, -10.0], "pixel": [2010.0, 1495.0]}]
        }
    }"#;
    let parameters: CameraParameters = serde_json::from_str(json).unwrap();
    let camera = Camera::new(parameters).unwrap();
    assert_eq!(camera.distortions().len(), 2);
    assert_eq!(camera.validity_radius_squared(), 2500.0 * 2500.0);
    assert!(camera.check(None, None).unwrap().passed());
}

#[test]
fn unknown_distortion_fails_to_parse() {
    let json = r#"{"distortions": [{"type": "division", "center": [0.0, 0.0]}]}"#;
    assert!(serde_json::from_str::<CameraParameters>(json).is_err());
}
