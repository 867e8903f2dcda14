use crate::{
    CameraError, CameraParameters, NdcPoint, PixelPoint, Result, TexturePoint, Verification, View,
};
use cv_distortion::{distort_chain, DistortionModel};
use log::{trace, warn};
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Rotation3, UnitQuaternion, Vector2, Vector3};
use std::f64::consts::PI;
use std::sync::Arc;

/// A camera calibrated by photogrammetry.
///
/// The camera maps points of the world to the pixels of its image through three frames:
///
/// 1. [`Camera::distort`] brings a world point into the camera frame, applies the pinhole
///    projection and then every lens distortion in order, giving a [`PixelPoint`].
/// 2. [`Camera::texture`] normalizes that pixel over the image (or over the active crop), giving a
///    [`TexturePoint`] in `[0, 1]²`.
/// 3. [`Camera::project`] maps the pixel to normalized device coordinates, taking zoom and the
///    aspect of the render target into account, giving an [`NdcPoint`].
///
/// The matrices of the pinhole part of this pipeline are exposed for renderers. They are kept up to
/// date by every setter, so they never lag behind the intrinsics. Distortions are not linear and
/// only exist in the point transforms: [`Camera::projection_matrix`] is the distortion free
/// approximation `post_projection ⋅ pre_projection`.
///
/// ```
/// use cv_photogrammetric::{Camera, CameraParameters};
/// use cv_photogrammetric::nalgebra::{Point2, Point3, Vector2};
///
/// let camera = Camera::new(
///     CameraParameters::default()
///         .size(Vector2::new(4000.0, 3000.0))
///         .focal(3000.0),
/// )
/// .unwrap();
/// // The optical axis looks down -z and hits the principal point.
/// let pixel = camera.distort(Point3::new(0.0, 0.0, -10.0));
/// assert_eq!(pixel.pixel(), Point2::new(2000.0, 1500.0));
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    focal: Vector2<f64>,
    principal_point: Point2<f64>,
    skew: f64,
    size: Vector2<f64>,
    view: Option<View>,
    near: f64,
    far: f64,
    zoom: f64,
    aspect: f64,
    film_gauge: f64,
    distortions: Arc<[DistortionModel]>,
    position: Point3<f64>,
    orientation: UnitQuaternion<f64>,
    scale: Vector3<f64>,
    matrix_world: Matrix4<f64>,
    matrix_world_inverse: Matrix4<f64>,
    validity_radius_squared: f64,
    verification: Option<Verification>,
    pre_projection: Matrix4<f64>,
    texture: Matrix4<f64>,
    post_projection: Matrix4<f64>,
    projection: Matrix4<f64>,
}

impl Camera {
    /// Builds the camera described by a calibration, failing if one of its distortions is invalid.
    pub fn new(parameters: CameraParameters) -> Result<Self> {
        let distortions = parameters
            .distortions
            .iter()
            .cloned()
            .map(|spec| DistortionModel::try_from(spec).map_err(CameraError::from))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::build(parameters, distortions))
    }

    fn build(parameters: CameraParameters, distortions: Vec<DistortionModel>) -> Self {
        let principal_point = parameters.resolved_principal_point();
        let aspect = parameters.resolved_aspect();
        let (position, orientation, scale) = decompose(&parameters.world_transform);
        let mut camera = Self {
            focal: parameters.focal,
            principal_point,
            skew: parameters.skew,
            size: parameters.size,
            view: None,
            near: parameters.near,
            far: parameters.far,
            zoom: 1.0,
            aspect,
            film_gauge: 35.0,
            distortions: distortions.into(),
            position,
            orientation,
            scale,
            matrix_world: parameters.world_transform,
            matrix_world_inverse: Matrix4::identity(),
            validity_radius_squared: parameters
                .max_radius
                .map_or(f64::INFINITY, |radius| radius * radius),
            verification: parameters.verification,
            pre_projection: Matrix4::identity(),
            texture: Matrix4::identity(),
            post_projection: Matrix4::identity(),
            projection: Matrix4::identity(),
        };
        camera.update_matrix_world_inverse();
        camera.update_projection_matrix();
        camera
    }

    /// Recomputes the pre-projection, texture, post-projection and projection matrices from the
    /// current intrinsics.
    ///
    /// Setters already call this, so it only needs calling explicitly to refresh a camera whose
    /// matrices must be rebuilt anyway. Calling it repeatedly yields the same matrices.
    #[rustfmt::skip]
    pub fn update_projection_matrix(&mut self) {
        let c = -(self.far + self.near) / (self.far - self.near);
        let d = -2.0 * self.far * self.near / (self.far - self.near);
        self.pre_projection = Matrix4::new(
            self.focal.x, -self.skew,    -self.principal_point.x, 0.0,
            0.0,          -self.focal.y, -self.principal_point.y, 0.0,
            0.0,          0.0,           c,                       d,
            0.0,          0.0,           -1.0,                    0.0,
        );

        let mut texture = Matrix4::new_nonuniform_scaling(&Vector3::new(
            1.0 / self.size.x,
            1.0 / self.size.y,
            1.0,
        ));
        let mut texture_aspect = self.size.x / self.size.y;
        if let Some(view) = self.view.filter(|view| view.enabled) {
            texture_aspect = view.aspect();
            texture = view.crop_matrix() * texture;
        }
        self.texture = texture;

        let ndc = Matrix4::new(
            2.0, 0.0,  0.0, -1.0,
            0.0, -2.0, 0.0, 1.0,
            0.0, 0.0,  1.0, 0.0,
            0.0, 0.0,  0.0, 1.0,
        );
        // Keep the aspect of the image when the render target has another one.
        let aspect_ratio = self.aspect / texture_aspect;
        let mut zoom = Vector2::new(self.zoom, self.zoom);
        if aspect_ratio > 1.0 {
            zoom.x /= aspect_ratio;
        } else {
            zoom.y *= aspect_ratio;
        }
        self.post_projection =
            Matrix4::new_nonuniform_scaling(&Vector3::new(zoom.x, zoom.y, 1.0)) * ndc * texture;
        self.projection = self.post_projection * self.pre_projection;
        trace!(
            "camera matrices updated: focal {:?} principal point {:?} zoom {:?}",
            self.focal,
            self.principal_point,
            zoom
        );
    }

    fn update_matrix_world_inverse(&mut self) {
        self.matrix_world_inverse = self.matrix_world.try_inverse().unwrap_or_else(|| {
            warn!("camera world transform is singular, it cannot see anything");
            Matrix4::zeros()
        });
    }

    /// Maps a world point to the distorted pixel frame.
    pub fn distort(&self, point: Point3<f64>) -> PixelPoint {
        let local = self.matrix_world_inverse.transform_point(&point);
        let pinhole = self.pre_projection.transform_point(&local);
        let pixel = distort_chain(self.distortions.iter(), pinhole.xy());
        PixelPoint(Point3::new(pixel.x, pixel.y, pinhole.z))
    }

    /// Maps a world point to normalized texture coordinates.
    pub fn texture(&self, point: Point3<f64>) -> TexturePoint {
        TexturePoint(self.texture.transform_point(&self.distort(point)))
    }

    /// Maps a world point to normalized device coordinates.
    pub fn project(&self, point: Point3<f64>) -> NdcPoint {
        NdcPoint(self.post_projection.transform_point(&self.distort(point)))
    }

    pub fn distort_points(&self, points: &[Point3<f64>]) -> Vec<PixelPoint> {
        points.iter().map(|&point| self.distort(point)).collect()
    }

    pub fn texture_points(&self, points: &[Point3<f64>]) -> Vec<TexturePoint> {
        points.iter().map(|&point| self.texture(point)).collect()
    }

    pub fn project_points(&self, points: &[Point3<f64>]) -> Vec<NdcPoint> {
        points.iter().map(|&point| self.project(point)).collect()
    }

    /// Interpolates between two cameras, `t = 0` giving `self` and `t = 1` giving `other`.
    ///
    /// Intrinsics and position are interpolated linearly and the orientation spherically.
    /// Distortions cannot be interpolated: the result keeps the distortions of `self`.
    /// When only one camera has a crop, the crop of the nearest camera is kept.
    pub fn lerp(&self, other: &Camera, t: f64) -> Camera {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        let view = match (self.view, other.view) {
            (Some(a), Some(b)) => Some(a.lerp(&b, t)),
            (a, b) => {
                if t < 0.5 {
                    a
                } else {
                    b
                }
            }
        };
        let position = Point3::from(self.position.coords.lerp(&other.position.coords, t));
        // Opposite orientations have no unique path between them.
        let orientation = self
            .orientation
            .try_slerp(&other.orientation, t, 1.0e-9)
            .unwrap_or(if t < 0.5 {
                self.orientation
            } else {
                other.orientation
            });
        let scale = self.scale.lerp(&other.scale, t);
        let mut camera = Camera {
            focal: self.focal.lerp(&other.focal, t),
            principal_point: Point2::from(
                self.principal_point
                    .coords
                    .lerp(&other.principal_point.coords, t),
            ),
            skew: mix(self.skew, other.skew),
            size: self.size.lerp(&other.size, t),
            view,
            near: mix(self.near, other.near),
            far: mix(self.far, other.far),
            zoom: mix(self.zoom, other.zoom),
            aspect: mix(self.aspect, other.aspect),
            film_gauge: mix(self.film_gauge, other.film_gauge),
            distortions: self.distortions.clone(),
            position,
            orientation,
            scale,
            matrix_world: compose(&position, &orientation, &scale),
            matrix_world_inverse: Matrix4::identity(),
            validity_radius_squared: self.validity_radius_squared,
            verification: None,
            pre_projection: Matrix4::identity(),
            texture: Matrix4::identity(),
            post_projection: Matrix4::identity(),
            projection: Matrix4::identity(),
        };
        camera.update_matrix_world_inverse();
        camera.update_projection_matrix();
        camera
    }

    pub fn focal(&self) -> Vector2<f64> {
        self.focal
    }

    pub fn set_focal(&mut self, focal: Vector2<f64>) {
        self.focal = focal;
        self.update_projection_matrix();
    }

    pub fn principal_point(&self) -> Point2<f64> {
        self.principal_point
    }

    pub fn set_principal_point(&mut self, principal_point: Point2<f64>) {
        self.principal_point = principal_point;
        self.update_projection_matrix();
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn set_skew(&mut self, skew: f64) {
        self.skew = skew;
        self.update_projection_matrix();
    }

    /// Image size in pixels.
    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    pub fn set_size(&mut self, size: Vector2<f64>) {
        self.size = size;
        self.update_projection_matrix();
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn set_near(&mut self, near: f64) {
        self.near = near;
        self.update_projection_matrix();
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn set_far(&mut self, far: f64) {
        self.far = far;
        self.update_projection_matrix();
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.update_projection_matrix();
    }

    /// Width over height of the render target.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Restricts the texture frame to a crop of the full image and enables it.
    pub fn set_view_offset(
        &mut self,
        full_width: f64,
        full_height: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.view = Some(View::new(full_width, full_height, x, y, width, height)?);
        self.update_projection_matrix();
        Ok(())
    }

    /// Disables the crop, keeping its geometry around.
    pub fn clear_view_offset(&mut self) {
        self.set_view_enabled(false);
    }

    pub fn set_view_enabled(&mut self, enabled: bool) {
        if let Some(view) = &mut self.view {
            view.enabled = enabled;
        }
        self.update_projection_matrix();
    }

    pub fn distortions(&self) -> &[DistortionModel] {
        &self.distortions
    }

    /// Replaces the distortion chain. The models are applied in order.
    pub fn set_distortions(&mut self, distortions: impl Into<Arc<[DistortionModel]>>) {
        self.distortions = distortions.into();
    }

    /// Squared radius in pixels around the principal point where the calibration is trustworthy.
    pub fn validity_radius_squared(&self) -> f64 {
        self.validity_radius_squared
    }

    pub fn set_validity_radius_squared(&mut self, radius_squared: f64) {
        self.validity_radius_squared = radius_squared;
    }

    /// The ground control points of the calibration, if it came with any.
    pub fn verification(&self) -> Option<&Verification> {
        self.verification.as_ref()
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }

    pub fn scale(&self) -> Vector3<f64> {
        self.scale
    }

    pub fn set_pose(
        &mut self,
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) {
        self.position = position;
        self.orientation = orientation;
        self.scale = scale;
        self.matrix_world = compose(&position, &orientation, &scale);
        self.update_matrix_world_inverse();
    }

    /// Camera to world transform.
    pub fn matrix_world(&self) -> Matrix4<f64> {
        self.matrix_world
    }

    pub fn set_matrix_world(&mut self, matrix_world: Matrix4<f64>) {
        let (position, orientation, scale) = decompose(&matrix_world);
        self.position = position;
        self.orientation = orientation;
        self.scale = scale;
        self.matrix_world = matrix_world;
        self.update_matrix_world_inverse();
    }

    /// World to camera transform.
    pub fn matrix_world_inverse(&self) -> Matrix4<f64> {
        self.matrix_world_inverse
    }

    /// Maps camera space to the undistorted pixel frame, with clip-space depth.
    pub fn pre_projection_matrix(&self) -> Matrix4<f64> {
        self.pre_projection
    }

    /// Maps the pixel frame to normalized texture coordinates.
    pub fn texture_matrix(&self) -> Matrix4<f64> {
        self.texture
    }

    /// Maps the pixel frame to normalized device coordinates.
    pub fn post_projection_matrix(&self) -> Matrix4<f64> {
        self.post_projection
    }

    /// `post_projection ⋅ pre_projection`, which ignores distortions.
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        self.projection
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f64 {
        self.size.y.atan2(2.0 * self.focal.y) * 360.0 / PI
    }

    /// Sets the vertical field of view in degrees, overwriting both focal lengths.
    pub fn set_fov(&mut self, fov: f64) {
        let focal = 0.5 * self.size.y / (fov * PI / 360.0).tan();
        self.set_focal(Vector2::new(focal, focal));
    }

    /// Vertical field of view in degrees once zoomed.
    pub fn effective_fov(&self) -> f64 {
        self.size.y.atan2(2.0 * self.focal.y * self.zoom) * 360.0 / PI
    }

    /// Film size in millimeters, used by focal lengths in millimeters.
    pub fn film_gauge(&self) -> f64 {
        self.film_gauge
    }

    pub fn set_film_gauge(&mut self, film_gauge: f64) {
        self.film_gauge = film_gauge;
    }

    pub fn film_height(&self) -> f64 {
        self.film_gauge / self.aspect.max(1.0)
    }

    /// Focal length in millimeters.
    pub fn focal_length(&self) -> f64 {
        self.focal.y * self.film_height() / self.size.y
    }

    /// Sets both focal lengths from a focal length in millimeters.
    pub fn set_focal_length(&mut self, focal_length: f64) {
        let focal = focal_length * self.size.y / self.film_height();
        self.set_focal(Vector2::new(focal, focal));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::build(CameraParameters::default(), Vec::new())
    }
}

impl TryFrom<CameraParameters> for Camera {
    type Error = CameraError;

    fn try_from(parameters: CameraParameters) -> Result<Self> {
        Self::new(parameters)
    }
}

fn compose(
    position: &Point3<f64>,
    orientation: &UnitQuaternion<f64>,
    scale: &Vector3<f64>,
) -> Matrix4<f64> {
    Matrix4::new_translation(&position.coords)
        * orientation.to_homogeneous()
        * Matrix4::new_nonuniform_scaling(scale)
}

/// Splits an affine transform into translation, rotation and scale.
///
/// A reflection is folded into the scale of the x axis.
fn decompose(matrix: &Matrix4<f64>) -> (Point3<f64>, UnitQuaternion<f64>, Vector3<f64>) {
    let linear: Matrix3<f64> = matrix.fixed_slice::<3, 3>(0, 0).into_owned();
    let mut scale = Vector3::new(
        linear.column(0).norm(),
        linear.column(1).norm(),
        linear.column(2).norm(),
    );
    if linear.determinant() < 0.0 {
        scale.x = -scale.x;
    }
    let rotation = Matrix3::from_columns(&[
        linear.column(0) / scale.x,
        linear.column(1) / scale.y,
        linear.column(2) / scale.z,
    ]);
    let orientation =
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    let position = Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
    (position, orientation, scale)
}
