//! Camera capability contract and its concrete models.
//!
//! Every camera exposes its image size, principal point, focal length and
//! intrinsics, and maps between normalized camera-frame coordinates and pixel
//! coordinates through [`AbstractCamera`]. Consuming code (drawing, frame
//! checks, pyramid composition) stays generic over the concrete model.

use nalgebra::{Matrix2, Matrix3, Vector2};

pub mod linear;
pub mod opengl;

pub use linear::LinearCamera;
pub use opengl::projection_matrix_rdf_top_left;

/// Integer image dimensions in pixels.
///
/// A size of `(-1, -1)` marks a camera whose image domain has not been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
}

impl ImageSize {
    pub const fn new(width: i32, height: i32) -> Self {
        ImageSize { width, height }
    }

    /// The marker used by default-constructed cameras.
    pub const fn invalid() -> Self {
        ImageSize {
            width: -1,
            height: -1,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::invalid()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Focal length must be non-zero and finite")]
    FocalLengthMustBeNonZero,
    #[error("Principal point must be finite")]
    PrincipalPointMustBeFinite,
    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize { width: i32, height: i32 },
    #[error("Intrinsics matrix has a zero homogeneous scale")]
    DegenerateIntrinsics,
}

/// Trait defining what any pinhole-like camera model must expose.
///
/// The forward mapping [`map`](AbstractCamera::map) takes a normalized
/// camera-frame point `(X/Z, Y/Z)` to a pixel coordinate and
/// [`unmap`](AbstractCamera::unmap) undoes it. Implementations must satisfy
/// `unmap(map(p)) == p` and `map(unmap(q)) == q` up to floating-point precision.
pub trait AbstractCamera {
    fn image_size(&self) -> ImageSize;

    fn principal_point(&self) -> Vector2<f64>;

    fn focal_length(&self) -> f64;

    fn intrinsics(&self) -> Matrix3<f64>;

    fn intrinsics_inv(&self) -> Matrix3<f64>;

    /// Applies the camera intrinsics (including distortion, if the model has any).
    fn map(&self, camframe: &Vector2<f64>) -> Vector2<f64>;

    /// Undoes the camera intrinsics (including distortion, if the model has any).
    fn unmap(&self, imframe: &Vector2<f64>) -> Vector2<f64>;

    /// Derivative of [`map`](AbstractCamera::map) with respect to the camera-frame point.
    fn jacobian(&self, camframe: &Vector2<f64>) -> Matrix2<f64>;

    fn width(&self) -> f64 {
        self.image_size().width as f64
    }

    fn height(&self) -> f64 {
        self.image_size().height as f64
    }

    /// Returns true iff `obs` lies in `[boundary, width - boundary) x [boundary, height - boundary)`.
    ///
    /// Pass `0` as `boundary` to test against the full image. The upper bounds
    /// saturate, so extreme `boundary` values never overflow.
    ///
    /// ```rust
    /// use nalgebra::Vector2;
    /// use vision_tools::camera::{AbstractCamera, ImageSize, LinearCamera};
    ///
    /// let camera = LinearCamera::new(500.0, Vector2::new(320.0, 240.0), ImageSize::new(640, 480));
    /// assert!(camera.is_in_frame(&Vector2::new(639, 479), 0));
    /// assert!(!camera.is_in_frame(&Vector2::new(5, 5), 10));
    /// ```
    fn is_in_frame(&self, obs: &Vector2<i32>, boundary: i32) -> bool {
        let size = self.image_size();
        obs.x >= boundary
            && obs.x < size.width.saturating_sub(boundary)
            && obs.y >= boundary
            && obs.y < size.height.saturating_sub(boundary)
    }

    /// Checks the calibration values this camera was built from.
    ///
    /// Projection itself never validates; call this once on calibration input.
    fn validate_params(&self) -> Result<(), CameraError> {
        validation::validate_focal_length(self.focal_length())?;
        validation::validate_principal_point(&self.principal_point())?;
        validation::validate_image_size(self.image_size())?;
        Ok(())
    }
}

/// Common validation functions for camera parameters
pub mod validation {
    use super::*;

    pub fn validate_focal_length(focal_length: f64) -> Result<(), CameraError> {
        if focal_length == 0.0 || !focal_length.is_finite() {
            return Err(CameraError::FocalLengthMustBeNonZero);
        }
        Ok(())
    }

    pub fn validate_principal_point(principal_point: &Vector2<f64>) -> Result<(), CameraError> {
        if !principal_point.x.is_finite() || !principal_point.y.is_finite() {
            return Err(CameraError::PrincipalPointMustBeFinite);
        }
        Ok(())
    }

    pub fn validate_image_size(size: ImageSize) -> Result<(), CameraError> {
        if !size.is_valid() {
            return Err(CameraError::InvalidImageSize {
                width: size.width,
                height: size.height,
            });
        }
        Ok(())
    }
}
