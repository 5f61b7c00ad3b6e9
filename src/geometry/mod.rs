use crate::camera::AbstractCamera;
use nalgebra::Vector2;

/// Pixel centres of a regular grid laid over a `width` x `height` image.
///
/// The grid has roughly `n` cells, split between the axes in proportion to the
/// image aspect ratio, and one point sits in the middle of each cell. Row-major
/// order, top row first. Empty when the image or `n` is empty.
pub fn sample_points(width: f64, height: f64, n: usize) -> Vec<Vector2<f64>> {
    if width <= 0.0 || height <= 0.0 || n == 0 {
        return Vec::new();
    }

    let cols = ((n as f64 * width / height).sqrt().round() as usize).max(1);
    let rows = ((n as f64 * height / width).sqrt().round() as usize).max(1);
    let step_x = width / cols as f64;
    let step_y = height / rows as f64;

    (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| {
                Vector2::new((col as f64 + 0.5) * step_x, (row as f64 + 0.5) * step_y)
            })
        })
        .collect()
}

/// Largest pixel distance between a point and its `map(unmap(q))` image.
///
/// Returns `0.0` for an empty point set.
pub fn max_round_trip_error<C: AbstractCamera + ?Sized>(
    camera: &C,
    points: &[Vector2<f64>],
) -> f64 {
    points
        .iter()
        .map(|q| (camera.map(&camera.unmap(q)) - q).norm())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{ImageSize, LinearCamera};

    #[test]
    fn test_sample_points_vga_grid() {
        // 4:3 image, 12 cells -> 4 columns x 3 rows of 160 x 160 pixels
        let points = sample_points(640.0, 480.0, 12);
        assert_eq!(points.len(), 12);
        assert_eq!(points[0], Vector2::new(80.0, 80.0));
        assert_eq!(points[3], Vector2::new(560.0, 80.0));
        assert_eq!(points[4], Vector2::new(80.0, 240.0));
        assert_eq!(points[11], Vector2::new(560.0, 400.0));
    }

    #[test]
    fn test_sample_points_stay_in_frame() {
        let camera = LinearCamera::new(461.6, Vector2::new(362.7, 246.0), ImageSize::new(752, 480));
        let points = sample_points(camera.width(), camera.height(), 300);

        assert!((240..=360).contains(&points.len()), "got {} points", points.len());
        for p in &points {
            let pixel = Vector2::new(p.x.floor() as i32, p.y.floor() as i32);
            assert!(camera.is_in_frame(&pixel, 0), "{:?} left the image", p);
        }
    }

    #[test]
    fn test_sample_points_degenerate_input() {
        assert!(sample_points(0.0, 480.0, 100).is_empty());
        assert!(sample_points(640.0, 480.0, 0).is_empty());

        let strip = sample_points(10_000.0, 1.0, 4);
        assert!(!strip.is_empty());
        assert!(strip.iter().all(|p| p.y == 0.5));
    }

    #[test]
    fn test_max_round_trip_error() {
        let camera = LinearCamera::new(500.0, Vector2::new(320.0, 240.0), ImageSize::new(640, 480));
        let points = sample_points(camera.width(), camera.height(), 200);

        assert!(max_round_trip_error(&camera, &points) < 1e-9);
        assert_eq!(max_round_trip_error(&camera, &[]), 0.0);
    }
}
