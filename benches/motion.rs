use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{UVec2, Vec2, Vec3};
use viewpoint::camera::Camera;
use viewpoint::input::Action;
use viewpoint::manipulator::CameraManipulator;
use viewpoint::math::AABB;

fn drag_positions(count: u32) -> Vec<Vec2> {
    (1..=count)
        .map(|i| Vec2::new((i * 7919 % 1920) as f32, (i * 104_729 % 1080) as f32))
        .collect()
}

fn bench_orbit_drag(c: &mut Criterion) {
    let positions = drag_positions(64);
    c.bench_function("orbit_drag_64_samples", |b| {
        b.iter(|| {
            let mut camera = CameraManipulator::new();
            camera.set_window_size(UVec2::new(1920, 1080));
            for position in &positions {
                camera.motion(black_box(*position), Action::Orbit);
            }
            black_box(camera.eye())
        })
    });
}

fn bench_animation_tick(c: &mut Criterion) {
    let target = Camera {
        eye: Vec3::new(-10.0, 5.0, -10.0),
        ..Camera::default()
    };
    c.bench_function("animation_tick", |b| {
        let mut camera = CameraManipulator::new();
        camera.set_camera(target, false);
        let mut now = 0.0;
        b.iter(|| {
            now += 1.0;
            camera.update_animation(Some(now));
            if !camera.is_animating() {
                // Bounce between the two poses so every tick samples a
                // live transition.
                let next = if camera.eye() == target.eye {
                    Camera::default()
                } else {
                    target
                };
                camera.set_camera(next, false);
            }
            black_box(camera.eye())
        })
    });
}

fn bench_tight_fit(c: &mut Criterion) {
    let bounds = AABB::new(Vec3::new(-3.0, -1.0, -7.0), Vec3::new(5.0, 9.0, 2.0));
    c.bench_function("tight_fit", |b| {
        let mut camera = CameraManipulator::new();
        camera.set_window_size(UVec2::new(1920, 1080));
        b.iter(|| {
            camera.fit(black_box(&bounds), true, true, 16.0 / 9.0);
            black_box(camera.eye())
        })
    });
}

fn bench_pose_parse(c: &mut Criterion) {
    let text = Camera::default().to_string();
    c.bench_function("pose_parse", |b| {
        b.iter(|| black_box(text.as_str()).parse::<Camera>())
    });
}

criterion_group!(
    benches,
    bench_orbit_drag,
    bench_animation_tick,
    bench_tight_fit,
    bench_pose_parse
);
criterion_main!(benches);
