//! Pyramid camera inspection tool
//!
//! Builds a linear camera from the given calibration, derives one camera per
//! pyramid level and follows a full-resolution pixel through every level.
//!
//! Usage:
//! ```bash
//! RUST_LOG=debug cargo run -- --focal-length 500 --cx 320 --cy 240 \
//!   --width 640 --height 480 --levels 4 -u 400 -v 300
//! ```

use clap::Parser;
use log::info;
use nalgebra::Vector2;
use vision_tools::camera::{AbstractCamera, ImageSize, LinearCamera};
use vision_tools::geometry;
use vision_tools::pyramid::{from_level, to_level};

/// Linear camera pyramid inspection tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Focal length in pixels at full resolution
    #[arg(short = 'f', long, default_value = "500.0")]
    focal_length: f64,

    /// Principal point x in pixels at full resolution
    #[arg(long, default_value = "320.0")]
    cx: f64,

    /// Principal point y in pixels at full resolution
    #[arg(long, default_value = "240.0")]
    cy: f64,

    /// Image width at full resolution
    #[arg(long, default_value = "640")]
    width: i32,

    /// Image height at full resolution
    #[arg(long, default_value = "480")]
    height: i32,

    /// Number of pyramid levels including full resolution
    #[arg(short = 'l', long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..31))]
    levels: u32,

    /// Pixel x coordinate at full resolution
    #[arg(short = 'u', default_value = "400.0")]
    u: f64,

    /// Pixel y coordinate at full resolution
    #[arg(short = 'v', default_value = "300.0")]
    v: f64,

    /// Number of sample points for the round-trip check
    #[arg(short = 'n', long, default_value = "500")]
    num_points: usize,
}

/// Derives the camera observing pyramid `level` of the image seen by `camera`.
fn camera_at_level(camera: &LinearCamera, level: u32) -> LinearCamera {
    let size = to_level(
        Vector2::new(camera.image_size().width, camera.image_size().height),
        level,
    );
    LinearCamera::new(
        to_level(camera.focal_length(), level),
        to_level(camera.principal_point(), level),
        ImageSize::new(size.x, size.y),
    )
}

fn camera_pyramid(camera: &LinearCamera, levels: u32) -> Vec<LinearCamera> {
    (0..levels).map(|level| camera_at_level(camera, level)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();

    let camera = LinearCamera::try_new(
        cli.focal_length,
        Vector2::new(cli.cx, cli.cy),
        ImageSize::new(cli.width, cli.height),
    )?;
    info!("Full resolution camera: {:?}", camera);

    let pixel = Vector2::new(cli.u, cli.v);
    let pixel_i = Vector2::new(cli.u.floor() as i32, cli.v.floor() as i32);

    println!("PYRAMID CAMERA INSPECTION");
    println!("=========================");
    println!(
        "Pixel ({:.3}, {:.3}) at level 0, {} levels\n",
        pixel.x, pixel.y, cli.levels
    );

    for (level, level_camera) in (0u32..).zip(camera_pyramid(&camera, cli.levels)) {
        let size = level_camera.image_size();
        let level_pixel = to_level(pixel, level);
        let level_pixel_i = to_level(pixel_i, level);
        let normalized = level_camera.unmap(&level_pixel);
        let restored = from_level(level_pixel, level);
        let restored_i = from_level(level_pixel_i, level);

        println!("Level {} ({}x{})", level, size.width, size.height);
        println!(
            "  focal length {:.4}, principal point ({:.4}, {:.4})",
            level_camera.focal_length(),
            level_camera.principal_point().x,
            level_camera.principal_point().y
        );
        println!(
            "  pixel ({:.4}, {:.4}), integer pixel ({}, {}) in frame: {}",
            level_pixel.x,
            level_pixel.y,
            level_pixel_i.x,
            level_pixel_i.y,
            level_camera.is_in_frame(&level_pixel_i, 0)
        );
        println!(
            "  normalized ({:.6}, {:.6}), back at level 0: ({:.4}, {:.4}) / ({}, {})",
            normalized.x,
            normalized.y,
            restored.x,
            restored.y,
            restored_i.x,
            restored_i.y
        );

        let points =
            geometry::sample_points(level_camera.width(), level_camera.height(), cli.num_points);
        let error = geometry::max_round_trip_error(&level_camera, &points);
        info!(
            "Level {}: max map/unmap round-trip error {:.3e} px over {} points",
            level,
            error,
            points.len()
        );
    }

    Ok(())
}
