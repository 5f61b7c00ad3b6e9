//! Implements the linear (pinhole) camera model.
//!
//! This module provides the [`LinearCamera`] struct, the distortion-free
//! realization of the [`AbstractCamera`] trait defined in [`crate::camera`].
//! The model has a single isotropic focal length, no skew and no distortion,
//! so projection reduces to a scale-and-shift of normalized coordinates.

use crate::camera::{opengl, AbstractCamera, CameraError, ImageSize};
use log::{debug, warn};
use nalgebra::{Matrix2, Matrix3, Matrix4, Vector2};

/// Near clipping plane used by [`LinearCamera::opengl_projection_matrix`].
pub const GL_Z_NEAR: f64 = 0.00001;
/// Far clipping plane used by [`LinearCamera::opengl_projection_matrix`].
pub const GL_Z_FAR: f64 = 1000.0;

/// Represents a linear pinhole camera.
///
/// The intrinsics matrix, its inverse and the inverse focal length are computed
/// once at construction and cached. Fields are private: a camera never changes
/// after it is built, so the cached values always agree with the parameters.
///
/// The focal length must be non-zero. Projection does not check this; use
/// [`LinearCamera::try_new`] or [`AbstractCamera::validate_params`] on
/// untrusted calibration input.
///
/// # Examples
///
/// ```rust
/// use nalgebra::Vector2;
/// use vision_tools::camera::{AbstractCamera, ImageSize, LinearCamera};
///
/// let camera = LinearCamera::new(500.0, Vector2::new(320.0, 240.0), ImageSize::new(640, 480));
///
/// assert_eq!(camera.map(&Vector2::new(0.0, 0.0)), Vector2::new(320.0, 240.0));
/// assert_eq!(camera.unmap(&Vector2::new(320.0, 240.0)), Vector2::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCamera {
    focal_length: f64,
    principal_point: Vector2<f64>,
    image_size: ImageSize,
    intrinsics: Matrix3<f64>,
    intrinsics_inv: Matrix3<f64>,
    inv_focal_length: f64,
}

impl LinearCamera {
    /// Dimension of a single image observation.
    pub const OBS_DIM: usize = 2;
    /// Number of calibration parameters.
    pub const NUM_PARAMS: usize = 4;

    /// Creates a camera from a focal length, principal point and image size.
    ///
    /// `focal_length` must be non-zero.
    pub fn new(focal_length: f64, principal_point: Vector2<f64>, image_size: ImageSize) -> Self {
        let inv_focal_length = 1.0 / focal_length;

        #[rustfmt::skip]
        let intrinsics = Matrix3::new(
            focal_length, 0.0, principal_point.x,
            0.0, focal_length, principal_point.y,
            0.0, 0.0, 1.0,
        );

        #[rustfmt::skip]
        let intrinsics_inv = Matrix3::new(
            inv_focal_length, 0.0, -principal_point.x * inv_focal_length,
            0.0, inv_focal_length, -principal_point.y * inv_focal_length,
            0.0, 0.0, 1.0,
        );

        LinearCamera {
            focal_length,
            principal_point,
            image_size,
            intrinsics,
            intrinsics_inv,
            inv_focal_length,
        }
    }

    /// Creates a camera from a 3x3 intrinsics matrix.
    ///
    /// The matrix is read in homogeneous form: focal length and principal
    /// point are `K(0,0)`, `K(0,2)` and `K(1,2)` divided by `K(2,2)`. Any
    /// `K(1,1)` or skew entry is ignored since the model is isotropic.
    pub fn from_intrinsics(intrinsics: &Matrix3<f64>, image_size: ImageSize) -> Self {
        let scale = intrinsics[(2, 2)];
        LinearCamera::new(
            intrinsics[(0, 0)] / scale,
            Vector2::new(intrinsics[(0, 2)] / scale, intrinsics[(1, 2)] / scale),
            image_size,
        )
    }

    /// Captures a snapshot of another camera's calibration.
    ///
    /// Focal length, principal point and image size are copied by value; the
    /// new camera holds no reference to `camera`.
    pub fn from_camera<C: AbstractCamera + ?Sized>(camera: &C) -> Self {
        LinearCamera::new(
            camera.focal_length(),
            camera.principal_point(),
            camera.image_size(),
        )
    }

    /// Creates a camera after validating the calibration values.
    ///
    /// # Errors
    ///
    /// * [`CameraError::FocalLengthMustBeNonZero`]
    /// * [`CameraError::PrincipalPointMustBeFinite`]
    /// * [`CameraError::InvalidImageSize`]
    pub fn try_new(
        focal_length: f64,
        principal_point: Vector2<f64>,
        image_size: ImageSize,
    ) -> Result<Self, CameraError> {
        let camera = LinearCamera::new(focal_length, principal_point, image_size);
        if let Err(e) = camera.validate_params() {
            warn!("Rejecting linear camera calibration: {}", e);
            return Err(e);
        }
        debug!(
            "Created linear camera f={} pp=({}, {}) size={}x{}",
            focal_length, principal_point.x, principal_point.y, image_size.width, image_size.height
        );
        Ok(camera)
    }

    /// Validating counterpart of [`LinearCamera::from_intrinsics`].
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::DegenerateIntrinsics`] if `K(2,2)` is zero, and
    /// otherwise the same errors as [`LinearCamera::try_new`].
    pub fn try_from_intrinsics(
        intrinsics: &Matrix3<f64>,
        image_size: ImageSize,
    ) -> Result<Self, CameraError> {
        let scale = intrinsics[(2, 2)];
        if scale == 0.0 || !scale.is_finite() {
            warn!("Intrinsics matrix has homogeneous scale {}", scale);
            return Err(CameraError::DegenerateIntrinsics);
        }
        if scale != 1.0 {
            debug!("Normalizing intrinsics matrix by homogeneous scale {}", scale);
        }
        LinearCamera::try_new(
            intrinsics[(0, 0)] / scale,
            Vector2::new(intrinsics[(0, 2)] / scale, intrinsics[(1, 2)] / scale),
            image_size,
        )
    }

    /// Cached `1 / focal_length`.
    pub fn inv_focal_length(&self) -> f64 {
        self.inv_focal_length
    }

    /// The constant Jacobian of [`AbstractCamera::map`]: the top-left 2x2 block of the intrinsics.
    pub fn constant_jacobian(&self) -> Matrix2<f64> {
        self.intrinsics.fixed_view::<2, 2>(0, 0).into_owned()
    }

    /// The constant Jacobian of [`AbstractCamera::unmap`]: the top-left 2x2 block of the inverse intrinsics.
    pub fn constant_inv_jacobian(&self) -> Matrix2<f64> {
        self.intrinsics_inv.fixed_view::<2, 2>(0, 0).into_owned()
    }

    /// Jacobian of [`AbstractCamera::unmap`] at `imframe`; independent of the point.
    pub fn inv_jacobian(&self, _imframe: &Vector2<f64>) -> Matrix2<f64> {
        self.constant_inv_jacobian()
    }

    /// OpenGL projection matrix for rendering from this camera's viewpoint.
    pub fn opengl_projection_matrix(&self) -> Matrix4<f64> {
        opengl::projection_matrix_rdf_top_left(self, GL_Z_NEAR, GL_Z_FAR)
    }
}

impl Default for LinearCamera {
    /// Unit focal length, principal point at the origin and an unset image size.
    fn default() -> Self {
        LinearCamera::new(1.0, Vector2::zeros(), ImageSize::invalid())
    }
}

impl AbstractCamera for LinearCamera {
    fn image_size(&self) -> ImageSize {
        self.image_size
    }

    fn principal_point(&self) -> Vector2<f64> {
        self.principal_point
    }

    fn focal_length(&self) -> f64 {
        self.focal_length
    }

    fn intrinsics(&self) -> Matrix3<f64> {
        self.intrinsics
    }

    fn intrinsics_inv(&self) -> Matrix3<f64> {
        self.intrinsics_inv
    }

    /// `u = f * x + cx`, `v = f * y + cy`.
    fn map(&self, camframe: &Vector2<f64>) -> Vector2<f64> {
        self.focal_length * camframe + self.principal_point
    }

    /// `x = (u - cx) / f`, `y = (v - cy) / f`.
    fn unmap(&self, imframe: &Vector2<f64>) -> Vector2<f64> {
        self.inv_focal_length * (imframe - self.principal_point)
    }

    fn jacobian(&self, _camframe: &Vector2<f64>) -> Matrix2<f64> {
        self.constant_jacobian()
    }
}
