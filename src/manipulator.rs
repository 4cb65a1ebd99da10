use std::time::Instant;

use glam::{Mat3, Mat4, Quat, UVec2, Vec2, Vec3};
use log::warn;

use crate::animation::Transition;
use crate::camera::{
    Camera, Projection, DEFAULT_ANIMATION_DURATION, EPSILON, MAX_DOLLY_DISPLACEMENT, MAX_FOV,
    MIN_ASPECT_RATIO, MIN_DISTANCE, MIN_FOV, MIN_ORTHO_SIZE,
};
use crate::input::{classify, Action, Inputs, Mode};
use crate::math::AABB;
use crate::types::CameraUniform;

pub const DEFAULT_SPEED: f32 = 3.0;

/// Visible extent of the scene at the interest point, in world units.
struct ViewDimensions {
    width: f32,
    height: f32,
}

/// Orthonormal viewing basis derived from the live pose.
struct CameraFrame {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

/// Interactive camera controller.
///
/// Holds the live pose and its view matrix, turns normalized mouse and key
/// displacements into orbit, pan, and dolly moves, and animates requested
/// pose changes along a Bezier arc with a dolly-zoom corrected field of view.
/// Displacements are fractions of the window, so drag feel is resolution
/// independent.
pub struct CameraManipulator {
    current: Camera,
    transition: Option<Transition>,
    duration: f64,
    window_size: UVec2,
    speed: f32,
    mouse: Vec2,
    mode: Mode,
    view_matrix: Mat4,
    epoch: Instant,
}

impl CameraManipulator {
    pub fn new() -> Self {
        let current = Camera::default();
        Self {
            current,
            transition: None,
            duration: DEFAULT_ANIMATION_DURATION,
            window_size: UVec2::ONE,
            speed: DEFAULT_SPEED,
            mouse: Vec2::ZERO,
            mode: Mode::default(),
            view_matrix: Mat4::look_at_rh(current.eye, current.center, current.up),
            epoch: Instant::now(),
        }
    }

    /// The live pose. During an animation this is the in-between pose.
    pub fn camera(&self) -> Camera {
        self.current
    }

    pub fn eye(&self) -> Vec3 {
        self.current.eye
    }

    pub fn center(&self) -> Vec3 {
        self.current.center
    }

    pub fn up(&self) -> Vec3 {
        self.current.up
    }

    pub fn view_direction(&self) -> Vec3 {
        (self.current.center - self.current.eye).normalize()
    }

    pub fn fov(&self) -> f32 {
        self.current.fov
    }

    pub fn clip_planes(&self) -> Vec2 {
        self.current.near_far
    }

    pub fn orthographic_magnitudes(&self) -> Vec2 {
        self.current.ortho_mag
    }

    pub fn projection(&self) -> Projection {
        self.current.projection
    }

    /// Sets the projection type without touching fov or magnitudes. Use the
    /// convert operations to keep the framing consistent across the switch.
    pub fn set_projection(&mut self, projection: Projection) {
        self.current.projection = projection;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Linear progress of the pending transition, 1 when idle.
    pub fn animation_progress(&self) -> f32 {
        self.transition.as_ref().map_or(1.0, Transition::progress)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn animation_duration(&self) -> f64 {
        self.duration
    }

    pub fn set_animation_duration(&mut self, duration_secs: f64) {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            warn!("set_animation_duration: rejecting {duration_secs}");
            return;
        }
        self.duration = duration_secs;
    }

    pub fn window_size(&self) -> UVec2 {
        self.window_size
    }

    pub fn set_window_size(&mut self, size: UVec2) {
        if size.x == 0 || size.y == 0 {
            warn!("set_window_size: rejecting {size}");
            return;
        }
        self.window_size = size;
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    /// Anchors the tracked cursor. Call on mouse-down so the first drag
    /// sample measures from the press position.
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse = position;
    }

    /// Requests a new pose. Invalid poses are rejected with a warning. The
    /// change animates from the live pose unless `instant` is set, the
    /// animation duration is zero, or the projection type changes.
    pub fn set_camera(&mut self, mut camera: Camera, instant: bool) {
        if !camera.is_valid() {
            warn!("set_camera: rejecting invalid pose {camera}");
            return;
        }
        camera.up = camera.up.normalize();
        self.transition = None;

        // Projection switches never animate.
        let instant = instant || camera.projection != self.current.projection;
        if instant || self.duration == 0.0 {
            self.current = camera;
            self.update_view_matrix();
        } else if camera != self.current {
            self.transition = Some(Transition::new(self.current, camera));
        }
    }

    /// Points the camera with an eye/center/up triple, keeping the
    /// projection settings of the live pose.
    pub fn set_lookat(&mut self, eye: Vec3, center: Vec3, up: Vec3, instant: bool) {
        let camera = Camera {
            eye,
            center,
            up,
            ..self.current
        };
        if !camera.is_valid() {
            warn!("set_lookat: rejecting invalid pose {camera}");
            return;
        }
        self.set_camera(camera, instant);
    }

    pub fn set_eye(&mut self, eye: Vec3, instant: bool) {
        self.set_lookat(eye, self.current.center, self.current.up, instant);
    }

    pub fn set_center(&mut self, center: Vec3, instant: bool) {
        self.set_lookat(self.current.eye, center, self.current.up, instant);
    }

    pub fn set_up(&mut self, up: Vec3, instant: bool) {
        self.set_lookat(self.current.eye, self.current.center, up, instant);
    }

    /// Derives the pose from a camera-to-world matrix. The interest point is
    /// placed `center_distance` along the forward axis and up resets to
    /// world Y.
    pub fn set_matrix(&mut self, matrix: &Mat4, instant: bool, center_distance: f32) {
        let rotation = Mat3::from_mat4(*matrix);
        let forward = rotation * Vec3::new(0.0, 0.0, -center_distance);
        let eye = matrix.w_axis.truncate();
        let camera = Camera {
            eye,
            center: eye + forward,
            up: Vec3::Y,
            ..self.current
        };
        if !camera.is_valid() {
            warn!("set_matrix: rejecting invalid pose {camera}");
            return;
        }
        self.set_camera(camera, instant);
    }

    /// Field of view in degrees, clamped to the valid range.
    pub fn set_fov(&mut self, fov: f32) {
        if !fov.is_finite() {
            warn!("set_fov: rejecting {fov}");
            return;
        }
        self.current.fov = fov.clamp(MIN_FOV, MAX_FOV);
    }

    pub fn set_clip_planes(&mut self, near_far: Vec2) {
        if !near_far.is_finite() || near_far.x <= 0.0 || near_far.y <= near_far.x {
            warn!("set_clip_planes: rejecting {near_far}");
            return;
        }
        self.current.near_far = near_far;
    }

    pub fn set_orthographic_magnitudes(&mut self, mag: Vec2) {
        if !mag.is_finite() || mag.x <= 0.0 || mag.y <= 0.0 {
            warn!("set_orthographic_magnitudes: rejecting {mag}");
            return;
        }
        self.current.ortho_mag = mag;
    }

    /// Routes a cursor move to the action selected by the held buttons and
    /// modifiers, and returns it. With no button held this only re-anchors
    /// the tracked cursor.
    pub fn mouse_move(&mut self, position: Vec2, inputs: Inputs) -> Option<Action> {
        let Some(action) = classify(inputs, self.mode) else {
            self.mouse = position;
            return None;
        };
        self.motion(position, action);
        Some(action)
    }

    /// Applies an action for a cursor now at `position`, using the distance
    /// from the last tracked position, normalized by the window size, as the
    /// displacement. Any pending animation is cancelled.
    pub fn motion(&mut self, position: Vec2, action: Action) {
        let displacement = Vec2::new(
            (position.x - self.mouse.x) / self.window_size.x as f32,
            (position.y - self.mouse.y) / self.window_size.y as f32,
        );

        match action {
            Action::Orbit => self.orbit(displacement, false),
            Action::Dolly => self.dolly(displacement, false),
            Action::Pan => self.pan(displacement),
            Action::LookAround => self.orbit(Vec2::new(displacement.x, -displacement.y), true),
        }

        self.cancel_animation(true);
        self.mouse = position;
    }

    /// Continuous motion from held keys. `delta` is expected to be scaled by
    /// frame time already; the speed setting scales it further. Dolly moves
    /// along the sightline, pan along the view plane, both carrying the
    /// interest point so the camera flies rather than orbits.
    pub fn key_motion(&mut self, delta: Vec2, action: Action) {
        if delta == Vec2::ZERO {
            return;
        }
        let delta = delta * self.speed;

        let frame = self.camera_frame();
        let offset = match action {
            Action::Dolly => {
                let forward = frame.forward * delta.x;
                if self.mode == Mode::Walk {
                    self.project_to_ground_plane(forward)
                } else {
                    forward
                }
            }
            Action::Pan => frame.right * delta.x + frame.up * delta.y,
            _ => Vec3::ZERO,
        };

        self.current.eye += offset;
        self.current.center += offset;
        self.cancel_animation(true);
    }

    /// Mouse-wheel dolly. With shift held it zooms instead: orthographic
    /// size in orthographic mode, field of view in perspective mode. Ctrl
    /// keeps the interest point fixed, which in fly and walk mode doubles as
    /// an adjustment of how far each wheel step travels.
    pub fn wheel(&mut self, value: f32, inputs: Inputs) {
        if value == 0.0 {
            return;
        }
        let delta = value * value.abs() / self.window_size.x as f32;

        if inputs.shift {
            if self.current.projection == Projection::Orthographic {
                self.zoom_orthographic(1.0 + delta);
                self.cancel_animation(true);
            } else {
                self.set_fov(self.current.fov + value);
                self.cancel_animation(false);
            }
        } else {
            self.dolly(Vec2::splat(delta), inputs.ctrl);
            self.cancel_animation(true);
        }
    }

    /// Advances the pending transition to `now_ms`, a timestamp on any
    /// steady millisecond clock. `None` falls back to the manipulator's own
    /// clock. Call once per frame; idle calls are free.
    pub fn update_animation(&mut self, now_ms: Option<f64>) {
        let now = now_ms.unwrap_or_else(|| self.epoch.elapsed().as_secs_f64() * 1000.0);
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        let t = transition.advance(now, self.duration);
        if t >= 1.0 {
            self.current = transition.goal();
            self.transition = None;
        } else {
            self.current = transition.sample(t);
        }
        self.update_view_matrix();
    }

    /// Places the camera so the whole box is visible, approaching or backing
    /// away along the current sightline. A tight fit tests the box corners
    /// against the frustum; a loose fit uses the bounding sphere, which
    /// keeps the framing valid however the camera later orbits.
    pub fn fit(&mut self, bounds: &AABB, instant: bool, tight: bool, aspect: f32) {
        let box_center = bounds.center();

        let yfov = (self.current.fov_radians() * 0.5).tan();
        let xfov = yfov * aspect;

        let mut ideal_distance = 0.0f32;
        if tight {
            // Rotation part only; the fit is translation independent.
            let view =
                Mat3::from_mat4(Mat4::look_at_rh(self.current.eye, box_center, self.current.up));
            for index in 0..8 {
                let corner = view * bounds.corner_offset(index);
                if corner.z < 0.0 {
                    ideal_distance = ideal_distance.max(corner.y.abs() / yfov + corner.z.abs());
                    ideal_distance = ideal_distance.max(corner.x.abs() / xfov + corner.z.abs());
                }
            }
        } else {
            let radius = bounds.radius();
            ideal_distance = (radius / xfov).max(radius / yfov);
        }

        let new_eye = box_center - ideal_distance * (box_center - self.current.eye).normalize();
        self.set_lookat(new_eye, box_center, self.current.up, instant);
    }

    /// Switches to perspective projection with a field of view that keeps
    /// the framing at the interest point the same size.
    pub fn convert_to_perspective(&mut self) {
        if self.current.projection == Projection::Perspective {
            return;
        }
        let distance = self.current.distance_to_center();
        if distance > 0.0 && self.current.ortho_mag.y > 0.0 {
            let fov = (2.0 * (self.current.ortho_mag.y / distance).atan()).to_degrees();
            self.current.fov = fov.clamp(MIN_FOV, MAX_FOV);
        }
        self.current.projection = Projection::Perspective;
    }

    /// Switches to orthographic projection, sizing the view box to what the
    /// perspective camera sees at the interest point.
    pub fn convert_to_orthographic(&mut self) {
        if self.current.projection == Projection::Orthographic {
            return;
        }
        let distance = self.current.distance_to_center();
        if distance > 0.0 {
            self.current.ortho_mag.y = distance * (self.current.fov_radians() * 0.5).tan();
            self.current.ortho_mag.x = self.current.ortho_mag.y * self.aspect_ratio();
        }
        self.current.projection = Projection::Orthographic;
    }

    /// Re-derives the orthographic width from the height and the window
    /// aspect ratio, leaving the height alone. Call after a resize.
    pub fn adjust_orthographic_aspect(&mut self) {
        if self.current.projection != Projection::Orthographic {
            return;
        }
        let aspect = self.aspect_ratio();
        if aspect <= 0.0 {
            return;
        }
        let width = self.current.ortho_mag.y * aspect;
        if width <= 0.0 {
            return;
        }
        if (width - self.current.ortho_mag.x).abs() > EPSILON {
            self.current.ortho_mag.x = width;
        }
    }

    /// Projection matrix for the live pose: right-handed, depth in [0, 1],
    /// Y flipped for Vulkan viewports.
    pub fn projection_matrix(&self) -> Mat4 {
        let mut proj = if self.current.projection == Projection::Orthographic {
            Mat4::orthographic_rh(
                -self.current.ortho_mag.x,
                self.current.ortho_mag.x,
                -self.current.ortho_mag.y,
                self.current.ortho_mag.y,
                self.current.near_far.x,
                self.current.near_far.y,
            )
        } else {
            Mat4::perspective_rh(
                self.current.fov_radians(),
                self.aspect_ratio(),
                self.current.near_far.x,
                self.current.near_far.y,
            )
        };
        proj.y_axis.y *= -1.0;
        proj
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix.to_cols_array_2d(),
            proj: self.projection_matrix().to_cols_array_2d(),
            eye: self.current.eye.to_array(),
            _pad: 0.0,
        }
    }

    /// One line per binding, suitable for a help overlay.
    pub fn help() -> &'static str {
        "LMB: rotate around the target\n\
         RMB: Dolly in/out\n\
         MMB: Pan along view plane\n\
         LMB + Shift: Dolly in/out\n\
         LMB + Ctrl: Pan\n\
         LMB + Alt: Look around\n\
         Mouse wheel: Dolly in/out\n\
         Mouse wheel + Shift: Zoom in/out\n"
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.current.eye, self.current.center, self.current.up);
    }

    /// User interaction takes over: any pending transition stops where it is.
    fn cancel_animation(&mut self, update_matrix: bool) {
        self.transition = None;
        if update_matrix {
            self.update_view_matrix();
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.window_size.x as f32 / self.window_size.y as f32
    }

    fn view_dimensions(&self) -> ViewDimensions {
        if self.current.projection == Projection::Orthographic {
            return ViewDimensions {
                width: self.current.ortho_mag.x * 2.0,
                height: self.current.ortho_mag.y * 2.0,
            };
        }

        let distance = self.current.distance_to_center();
        let height = 2.0 * distance * (self.current.fov_radians() * 0.5).tan();
        ViewDimensions {
            width: height * self.aspect_ratio().max(MIN_ASPECT_RATIO),
            height,
        }
    }

    fn camera_frame(&self) -> CameraFrame {
        let view_delta = self.current.center - self.current.eye;
        if view_delta.length() < EPSILON {
            return CameraFrame {
                forward: Vec3::NEG_Z,
                right: Vec3::X,
                up: Vec3::Y,
            };
        }

        let forward = view_delta.normalize();
        let mut right = forward.cross(self.current.up);
        if right.length_squared() < EPSILON {
            // Sightline parallel to up; pick any perpendicular basis.
            let fallback_up = if forward.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
            right = forward.cross(fallback_up);
        }
        let right = right.normalize();
        CameraFrame {
            forward,
            right,
            up: right.cross(forward),
        }
    }

    /// Removes the up component so walk-mode moves stay on the ground.
    fn project_to_ground_plane(&self, vector: Vec3) -> Vec3 {
        let up_len2 = self.current.up.length_squared();
        if up_len2 < EPSILON {
            return vector;
        }
        vector - self.current.up * (vector.dot(self.current.up) / up_len2)
    }

    fn zoom_orthographic(&mut self, factor: f32) {
        self.current.ortho_mag.x = (self.current.ortho_mag.x * factor).max(MIN_ORTHO_SIZE);
        self.current.ortho_mag.y = (self.current.ortho_mag.y * factor).max(MIN_ORTHO_SIZE);
    }

    /// Rotates the eye around the center, or the center around the eye when
    /// `invert` is set, which is how look-around works. A displacement of
    /// one window width is a full turn.
    fn orbit(&mut self, displacement: Vec2, invert: bool) {
        if displacement == Vec2::ZERO {
            return;
        }
        let displacement = displacement * std::f32::consts::TAU;

        let (pivot, subject) = if invert {
            (self.current.eye, self.current.center)
        } else {
            (self.current.center, self.current.eye)
        };

        let center_to_eye = subject - pivot;
        let radius = center_to_eye.length();
        if radius < EPSILON {
            return;
        }
        let direction = center_to_eye / radius;

        let Some(up_axis) = self.current.up.try_normalize() else {
            return;
        };
        let yawed = Quat::from_axis_angle(up_axis, -displacement.x) * direction;

        // The pitch axis vanishes when the sightline lines up with the up
        // vector; bail out with the pose untouched.
        let side = self.current.up.cross(yawed);
        if side.length_squared() < EPSILON {
            return;
        }
        let pitched = Quat::from_axis_angle(side.normalize(), -displacement.y) * yawed;

        // Reject the pitch when it would swing across the pole.
        let direction = if pitched.x.signum() == yawed.x.signum() {
            pitched
        } else {
            yawed
        };

        let position = pivot + direction * radius;
        if invert {
            self.current.center = position;
        } else {
            self.current.eye = position;
        }
    }

    /// Slides eye and center along the view plane. A full-window drag maps
    /// to the visible extent of the scene at the interest point.
    fn pan(&mut self, displacement: Vec2) {
        if displacement == Vec2::ZERO {
            return;
        }
        let displacement = if self.mode == Mode::Fly { -displacement } else { displacement };

        let frame = self.camera_frame();
        let view = self.view_dimensions();
        let offset =
            -displacement.x * frame.right * view.width + displacement.y * frame.up * view.height;
        self.current.eye += offset;
        self.current.center += offset;
    }

    /// Moves toward or away from the interest point without ever crossing
    /// it. Orthographic cameras zoom by scaling the magnitudes instead.
    fn dolly(&mut self, displacement: Vec2, keep_center_fixed: bool) {
        if displacement == Vec2::ZERO {
            return;
        }
        // Whichever axis moved more drives the dolly.
        let scalar = if displacement.x.abs() > displacement.y.abs() {
            displacement.x
        } else {
            -displacement.y
        };

        if self.current.projection == Projection::Orthographic {
            self.zoom_orthographic(1.0 - scalar);
            return;
        }

        let direction = self.current.center - self.current.eye;
        if direction.length() < MIN_DISTANCE {
            return;
        }
        if scalar >= MAX_DOLLY_DISPLACEMENT {
            return;
        }

        let mut offset = direction * scalar;
        if self.mode == Mode::Walk {
            offset = self.project_to_ground_plane(offset);
        }
        self.current.eye += offset;

        // Fly and walk carry the interest point along.
        if (self.mode == Mode::Fly || self.mode == Mode::Walk) && !keep_center_fixed {
            self.current.center += offset;
        }
    }
}

impl Default for CameraManipulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(width: u32, height: u32) -> CameraManipulator {
        let mut camera = CameraManipulator::new();
        camera.set_window_size(UVec2::new(width, height));
        camera
    }

    fn ortho_rig(width: u32, height: u32) -> CameraManipulator {
        let mut camera = rig(width, height);
        let pose = Camera {
            projection: Projection::Orthographic,
            ..Camera::default()
        };
        camera.set_camera(pose, true);
        camera
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let mut camera = rig(1000, 1000);
        camera.set_lookat(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y, true);
        camera.orbit(Vec2::new(0.25, 0.0), false);
        assert!(camera.eye().distance(Vec3::new(0.0, 0.0, 10.0)) < 1e-4);
        assert_eq!(camera.center(), Vec3::ZERO);
    }

    #[test]
    fn test_orbit_bails_when_sightline_matches_up() {
        let mut camera = rig(1000, 1000);
        camera.set_lookat(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y, true);
        camera.orbit(Vec2::new(0.1, 0.1), false);
        // The yaw axis and the sightline coincide: nothing moves, not even
        // the yaw half of the rotation.
        assert_eq!(camera.eye(), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_pan_straight_down_uses_fallback_frame() {
        let mut camera = rig(1000, 1000);
        camera.set_lookat(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y, true);
        camera.pan(Vec2::new(0.1, 0.1));
        assert!(camera.eye().is_finite());
        assert!(camera.center().is_finite());
        // Pan is parallel to the view plane, so the height is untouched.
        assert_eq!(camera.eye().y, 10.0);
        assert_eq!(camera.eye() - Vec3::new(0.0, 10.0, 0.0), camera.center());
    }

    #[test]
    fn test_collapsed_sightline_falls_back_to_canonical_frame() {
        let mut camera = rig(1000, 1000);
        // A sightline just above the validity floor survives set_lookat, and
        // one near-cap dolly then collapses it below EPSILON.
        camera.set_lookat(Vec3::new(1e-5, 0.0, 0.0), Vec3::ZERO, Vec3::Y, true);
        camera.set_mouse_position(Vec2::ZERO);
        camera.motion(Vec2::new(980.0, 0.0), Action::Dolly);
        assert!(camera.camera().distance_to_center() < EPSILON);

        // The real sightline points down -X, but the degenerate frame is the
        // canonical -Z/X/Y basis: key dolly travels -Z, key pan travels X/Y.
        let anchor = camera.eye();
        camera.key_motion(Vec2::new(1.0, 0.0), Action::Dolly);
        let dolly_move = camera.eye() - anchor;
        assert!(dolly_move.z < -1.0);
        assert!(dolly_move.x.abs() < 1e-6 && dolly_move.y.abs() < 1e-6);

        let anchor = camera.eye();
        camera.key_motion(Vec2::new(1.0, 2.0), Action::Pan);
        let pan_move = camera.eye() - anchor;
        assert!((pan_move.x - 3.0).abs() < 1e-6);
        assert!((pan_move.y - 6.0).abs() < 1e-6);
        assert_eq!(pan_move.z, 0.0);
        assert!(camera.eye().is_finite() && camera.center().is_finite());
    }

    #[test]
    fn test_ortho_dolly_zooms_magnitudes() {
        let mut camera = ortho_rig(100, 100);
        camera.dolly(Vec2::new(0.1, 0.0), false);
        let mag = camera.orthographic_magnitudes();
        assert!((mag.x - 4.5).abs() < 1e-5);
        assert!((mag.y - 4.5).abs() < 1e-5);
        // The eye does not move in orthographic mode.
        assert_eq!(camera.eye(), Camera::default().eye);
    }

    #[test]
    fn test_ortho_zoom_clamps_to_minimum() {
        let mut camera = ortho_rig(100, 100);
        camera.set_orthographic_magnitudes(Vec2::new(0.02, 0.02));
        camera.dolly(Vec2::new(0.9, 0.0), false);
        assert_eq!(camera.orthographic_magnitudes(), Vec2::new(0.01, 0.01));
    }

    #[test]
    fn test_dolly_zero_displacement_is_a_no_op() {
        let mut camera = ortho_rig(100, 100);
        camera.set_orthographic_magnitudes(Vec2::new(0.005, 0.005));
        camera.dolly(Vec2::ZERO, false);
        // Even magnitudes below the zoom floor survive a zero dolly.
        assert_eq!(camera.orthographic_magnitudes(), Vec2::new(0.005, 0.005));
    }

    #[test]
    fn test_wheel_shift_changes_fov_only() {
        let mut camera = rig(1000, 1000);
        let shift = Inputs {
            shift: true,
            ..Inputs::default()
        };
        camera.wheel(3.0, shift);
        assert_eq!(camera.fov(), 63.0);
        assert_eq!(camera.eye(), Camera::default().eye);
    }

    #[test]
    fn test_wheel_shift_zooms_orthographic() {
        let mut camera = ortho_rig(1000, 1000);
        let shift = Inputs {
            shift: true,
            ..Inputs::default()
        };
        camera.wheel(3.0, shift);
        let mag = camera.orthographic_magnitudes();
        assert!((mag.x - 5.045).abs() < 1e-4);
        assert_eq!(camera.fov(), 60.0);
    }

    #[test]
    fn test_wheel_dollies_along_sightline() {
        let mut camera = rig(1000, 1000);
        let start = camera.camera().distance_to_center();
        camera.wheel(3.0, Inputs::default());
        let pushed = camera.camera().distance_to_center();
        assert!(pushed > start);

        camera.wheel(-3.0, Inputs::default());
        assert!(camera.camera().distance_to_center() < pushed);
    }

    #[test]
    fn test_key_motion_zero_keeps_animation() {
        let mut camera = rig(1000, 1000);
        let goal = Camera {
            eye: Vec3::new(-5.0, 2.0, 8.0),
            ..Camera::default()
        };
        camera.set_camera(goal, false);
        assert!(camera.is_animating());

        camera.key_motion(Vec2::ZERO, Action::Dolly);
        assert!(camera.is_animating());

        camera.key_motion(Vec2::new(0.1, 0.0), Action::Dolly);
        assert!(!camera.is_animating());
    }

    #[test]
    fn test_window_size_zero_is_rejected() {
        let mut camera = rig(1920, 1080);
        camera.set_window_size(UVec2::new(0, 720));
        camera.set_window_size(UVec2::new(1280, 0));
        assert_eq!(camera.window_size(), UVec2::new(1920, 1080));
    }

    #[test]
    fn test_setters_reject_bad_values() {
        let mut camera = rig(100, 100);

        camera.set_clip_planes(Vec2::new(-1.0, 10.0));
        camera.set_clip_planes(Vec2::new(0.1, 0.05));
        camera.set_clip_planes(Vec2::new(f32::NAN, 10.0));
        assert_eq!(camera.clip_planes(), Camera::default().near_far);
        camera.set_clip_planes(Vec2::new(0.5, 100.0));
        assert_eq!(camera.clip_planes(), Vec2::new(0.5, 100.0));

        camera.set_orthographic_magnitudes(Vec2::new(0.0, 1.0));
        camera.set_orthographic_magnitudes(Vec2::new(f32::NAN, 1.0));
        assert_eq!(camera.orthographic_magnitudes(), Vec2::new(5.0, 5.0));

        camera.set_animation_duration(-1.0);
        camera.set_animation_duration(f64::NAN);
        assert_eq!(camera.animation_duration(), 0.5);

        camera.set_fov(f32::NAN);
        assert_eq!(camera.fov(), 60.0);
        camera.set_fov(500.0);
        assert_eq!(camera.fov(), MAX_FOV);
    }

    #[test]
    fn test_projection_conversion_round_trip() {
        let mut camera = rig(1000, 1000);
        camera.convert_to_orthographic();
        assert_eq!(camera.projection(), Projection::Orthographic);

        // ymag = distance * tan(fov / 2) = 17.32 * 0.5774 = 10
        let mag = camera.orthographic_magnitudes();
        assert!((mag.y - 10.0).abs() < 1e-3);
        assert!((mag.x - 10.0).abs() < 1e-3);

        camera.convert_to_perspective();
        assert_eq!(camera.projection(), Projection::Perspective);
        assert!((camera.fov() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_adjust_orthographic_aspect_sets_width() {
        let mut camera = ortho_rig(1920, 1080);
        camera.adjust_orthographic_aspect();
        let mag = camera.orthographic_magnitudes();
        assert!((mag.x - 5.0 * 1920.0 / 1080.0).abs() < 1e-3);
        assert_eq!(mag.y, 5.0);

        // No effect on perspective cameras.
        let mut perspective = rig(1920, 1080);
        perspective.adjust_orthographic_aspect();
        assert_eq!(perspective.orthographic_magnitudes(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_set_matrix_reads_translation_and_forward() {
        let mut camera = rig(100, 100);
        let matrix = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        camera.set_matrix(&matrix, true, 2.0);
        assert_eq!(camera.eye(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(camera.center(), Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_projection_matrix_flips_y() {
        let camera = rig(800, 600);
        assert!(camera.projection_matrix().y_axis.y < 0.0);

        let ortho = ortho_rig(800, 600);
        assert!(ortho.projection_matrix().y_axis.y < 0.0);
    }

    #[test]
    fn test_uniform_mirrors_matrices() {
        let camera = rig(800, 600);
        let uniform = camera.to_uniform();
        assert_eq!(uniform.view, camera.view_matrix().to_cols_array_2d());
        assert_eq!(uniform.eye, [10.0, 10.0, 10.0]);
    }
}
