use glam::Vec3;

use crate::camera::{Camera, EPSILON, MAX_FOV, MIN_FOV};

/// Fifth-order ease with zero first and second derivatives at both ends.
pub fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn quadratic_bezier(t: f32, p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

/// An in-flight camera move from a snapshot pose to a goal pose.
///
/// The transition owns both endpoints, the Bezier control points for the eye
/// path, and the dolly-zoom constants. It has no clock of its own; the caller
/// feeds it timestamps and the first one it sees becomes the start of the
/// timeline.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    snapshot: Camera,
    goal: Camera,
    bezier: [Vec3; 3],
    /// Frustum half-height at the interest point for each endpoint.
    zoom_k: [f32; 2],
    start_ms: Option<f64>,
    progress: f32,
}

impl Transition {
    pub fn new(snapshot: Camera, goal: Camera) -> Self {
        let zoom_k = [
            snapshot.distance_to_center() * (snapshot.fov_radians() * 0.5).tan(),
            goal.distance_to_center() * (goal.fov_radians() * 0.5).tan(),
        ];
        Self {
            snapshot,
            goal,
            bezier: eye_arc(&snapshot, &goal),
            zoom_k,
            start_ms: None,
            progress: 0.0,
        }
    }

    pub fn goal(&self) -> Camera {
        self.goal
    }

    /// Linear progress in [0, 1] as of the last advance.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Moves the timeline to `now_ms` and returns the eased parameter.
    /// The first call pins the start of the timeline.
    pub fn advance(&mut self, now_ms: f64, duration_secs: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = ((now_ms - start) / 1000.0).max(0.0);
        let linear = if duration_secs > 0.0 {
            ((elapsed / duration_secs) as f32).min(1.0)
        } else {
            1.0
        };
        // A clock running backward holds the pose instead of rewinding it.
        self.progress = linear.max(self.progress);
        smootherstep(self.progress)
    }

    /// Pose at eased parameter `t`. At 1 this is exactly the goal.
    pub fn sample(&self, t: f32) -> Camera {
        if t >= 1.0 {
            return self.goal;
        }

        let mut camera = self.goal;
        camera.center = self.snapshot.center.lerp(self.goal.center, t);
        camera.up = self.snapshot.up.lerp(self.goal.up, t);
        camera.eye = quadratic_bezier(t, self.bezier[0], self.bezier[1], self.bezier[2]);

        // Dolly-zoom: hold the apparent size of the subject while the eye travels.
        let distance = camera.eye.distance(camera.center);
        let k = lerp(self.zoom_k[0], self.zoom_k[1], t);
        camera.fov = if distance > EPSILON && k > 0.0 {
            (2.0 * (k / distance).atan()).to_degrees().clamp(MIN_FOV, MAX_FOV)
        } else {
            lerp(self.snapshot.fov, self.goal.fov, t)
        };

        camera.near_far = self.snapshot.near_far.lerp(self.goal.near_far, t);
        camera.ortho_mag = self.snapshot.ortho_mag.lerp(self.goal.ortho_mag, t);
        camera
    }
}

/// Control points for the eye path: the endpoints plus a middle point pushed
/// away from the interest points so the eye arcs around the subject instead
/// of cutting through it.
fn eye_arc(snapshot: &Camera, goal: &Camera) -> [Vec3; 3] {
    let p0 = snapshot.eye;
    let p2 = goal.eye;
    let interest = (snapshot.center + goal.center) * 0.5;

    let mid = (p0 + p2) * 0.5;
    let radius = 0.5 * (p0.distance(interest) + p2.distance(interest));

    let mut to_mid = mid - interest;
    if to_mid.length_squared() < EPSILON {
        // Endpoints sit opposite each other; any direction out of the
        // interest point works.
        to_mid = Vec3::Z;
    }
    let pass_through = interest + radius * to_mid.normalize();
    let mut p1 = 2.0 * pass_through - 0.5 * (p0 + p2);

    // Flatten the control point onto the average up plane so the arc does
    // not bob vertically.
    let avg_up = (snapshot.up + goal.up).normalize_or_zero();
    p1 += (mid - p1).dot(avg_up) * avg_up;

    [p0, p1, p2]
}
