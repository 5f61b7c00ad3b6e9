//! Vision Tools Library
//!
//! Camera and image pyramid building blocks for computer-vision tooling:
//! - A camera capability trait ([`AbstractCamera`]) mapping between normalized
//!   camera-frame coordinates and pixel coordinates
//! - The linear pinhole camera model ([`LinearCamera`])
//! - OpenGL projection matrices derived from camera intrinsics
//! - Coordinate transforms between image pyramid levels
//!
//! Cameras and pyramid levels are independent; calling code composes them,
//! for example by building one camera per pyramid level.

pub mod camera;
pub mod geometry;
pub mod pyramid;

// Re-export commonly used types
pub use camera::{AbstractCamera, CameraError, ImageSize, LinearCamera};

pub use pyramid::{from_level, scale_factor, to_level, PyramidCoordinate};
