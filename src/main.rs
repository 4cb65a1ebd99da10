use anyhow::Result;
use clap::Parser;
use glam::{UVec2, Vec2, Vec3};

use viewpoint::camera::Camera;
use viewpoint::cli::Cli;
use viewpoint::input::{Inputs, Mode};
use viewpoint::manipulator::CameraManipulator;
use viewpoint::math::AABB;

const WINDOW_WIDTH: u32 = 1920;
const WINDOW_HEIGHT: u32 = 1080;

/// A small arrangement: ground slab, tower, and an offset platform.
fn demo_bounds() -> AABB {
    let ground = AABB::new(Vec3::new(-20.0, -1.0, -20.0), Vec3::new(20.0, 0.0, 20.0));
    let tower = AABB::new(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 12.0, 2.0));
    let platform = AABB::new(Vec3::new(8.0, 3.0, -6.0), Vec3::new(14.0, 4.0, 2.0));
    ground.union(&tower).union(&platform)
}

fn parse_mode(name: &str) -> Mode {
    match name {
        "fly" => Mode::Fly,
        "walk" => Mode::Walk,
        _ => Mode::Examine,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut camera = CameraManipulator::new();
    camera.set_window_size(UVec2::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    camera.set_mode(parse_mode(&cli.mode));
    camera.set_animation_duration(cli.duration);

    if let Some(text) = &cli.pose {
        let pose: Camera = text.parse()?;
        camera.set_camera(pose, true);
    }

    println!("{}", CameraManipulator::help());

    let bounds = demo_bounds();
    let aspect = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
    camera.fit(&bounds, false, true, aspect);

    // Play the fit transition on a fixed-step clock.
    let fps = cli.fps.max(1);
    let frame_ms = 1000.0 / fps as f64;
    let mut frame = 0usize;
    loop {
        camera.update_animation(Some(frame as f64 * frame_ms));
        let pose = camera.camera();
        if cli.json {
            println!("{}", serde_json::to_string(&pose)?);
        } else {
            println!("frame {frame:4}: {pose}");
        }
        if !camera.is_animating() {
            break;
        }
        frame += 1;
    }

    // Scripted drag: a quarter turn around the scene, then a wheel step back.
    let start = Vec2::new(960.0, 540.0);
    camera.set_mouse_position(start);
    let drag = Inputs {
        lmb: true,
        ..Inputs::default()
    };
    for step in 1..=8 {
        let position = start + Vec2::new(step as f32 * WINDOW_WIDTH as f32 / 32.0, 0.0);
        camera.mouse_move(position, drag);
    }
    camera.wheel(3.0, Inputs::default());

    let pose = camera.camera();
    println!("\nafter drag: {pose}");
    println!("distance to target: {}", pose.distance_to_center());
    Ok(())
}
