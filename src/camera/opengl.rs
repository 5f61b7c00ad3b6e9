//! OpenGL projection matrices built from camera intrinsics.
//!
//! Renderers draw a scene as seen by a camera by loading a projection matrix
//! whose frustum matches the camera's focal length, principal point and image
//! size. Only the matrix is produced here; no rendering API is touched.

use crate::camera::AbstractCamera;
use nalgebra::Matrix4;

/// Builds an off-axis OpenGL projection matrix for a camera whose frame is
/// right-down-forward and whose pixel origin is the top-left image corner.
///
/// A camera-frame point `(x, y, z)` in front of the camera projects to
/// normalized device coordinates with `ndc_x = 2u / w - 1` and
/// `ndc_y = 1 - 2v / h`, where `(u, v)` is the pixel the camera maps it to.
/// Depth `z_near` maps to `ndc_z = -1` and `z_far` to `ndc_z = 1`.
pub fn projection_matrix_rdf_top_left<C: AbstractCamera + ?Sized>(
    camera: &C,
    z_near: f64,
    z_far: f64,
) -> Matrix4<f64> {
    let w = camera.width();
    let h = camera.height();
    let f = camera.focal_length();
    let pp = camera.principal_point();

    let left = -pp.x * z_near / f;
    let right = (w - pp.x) * z_near / f;
    let top = -pp.y * z_near / f;
    let bottom = (h - pp.y) * z_near / f;

    let mut projection = Matrix4::zeros();
    projection[(0, 0)] = 2.0 * z_near / (right - left);
    projection[(1, 1)] = 2.0 * z_near / (top - bottom);
    projection[(0, 2)] = (right + left) / (left - right);
    projection[(1, 2)] = (top + bottom) / (bottom - top);
    projection[(2, 2)] = (z_far + z_near) / (z_far - z_near);
    projection[(3, 2)] = 1.0;
    projection[(2, 3)] = (2.0 * z_far * z_near) / (z_near - z_far);
    projection
}
