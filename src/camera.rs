use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EPSILON: f32 = 1e-6;
pub const MIN_DISTANCE: f32 = 1e-6;

// Field-of-view limits, degrees
pub const MIN_FOV: f32 = 0.01;
pub const MAX_FOV: f32 = 179.0;

pub const MIN_ORTHO_SIZE: f32 = 0.01;
pub const MAX_DOLLY_DISPLACEMENT: f32 = 0.99;
pub const MIN_ASPECT_RATIO: f32 = EPSILON;

pub const DEFAULT_ANIMATION_DURATION: f64 = 0.5;

/// How the camera projects the scene onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Complete camera pose: where it sits, what it looks at, and how it projects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees (perspective only).
    pub fov: f32,
    pub near_far: Vec2,
    /// Orthographic half-width/half-height (glTF xmag, ymag).
    pub ortho_mag: Vec2,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(10.0, 10.0, 10.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
            near_far: Vec2::new(0.001, 100_000.0),
            ortho_mag: Vec2::new(5.0, 5.0),
            projection: Projection::Perspective,
        }
    }
}

impl Camera {
    pub fn distance_to_center(&self) -> f32 {
        self.eye.distance(self.center)
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    /// Checks that the pose can be used without producing NaN/Inf downstream:
    /// finite positions, a usable up vector, a real sightline, and an
    /// in-range field of view.
    pub fn is_valid(&self) -> bool {
        if !self.eye.is_finite() || !self.center.is_finite() || !self.up.is_finite() {
            return false;
        }
        if self.up.length() <= EPSILON {
            return false;
        }
        if self.distance_to_center() < MIN_DISTANCE {
            return false;
        }
        (MIN_FOV..=MAX_FOV).contains(&self.fov)
    }

    /// Applies fields parsed from the text format. Legacy strings that omit
    /// trailing fields leave the corresponding fields untouched.
    pub fn set_from_str(&mut self, text: &str) -> Result<(), ParseCameraError> {
        let fields = parse_fields(text);
        if fields.len() < 9 {
            return Err(ParseCameraError {
                fields: fields.len(),
            });
        }

        self.eye = Vec3::new(fields[0], fields[1], fields[2]);
        self.center = Vec3::new(fields[3], fields[4], fields[5]);
        self.up = Vec3::new(fields[6], fields[7], fields[8]);
        if fields.len() >= 10 {
            self.fov = fields[9];
        }
        if fields.len() >= 12 {
            self.near_far = Vec2::new(fields[10], fields[11]);
        }
        if fields.len() >= 14 {
            self.ortho_mag = Vec2::new(fields[12], fields[13]);
        }
        if fields.len() >= 15 {
            self.projection = if fields[14] as i32 == 1 {
                Projection::Orthographic
            } else {
                Projection::Perspective
            };
        }
        Ok(())
    }
}

/// Numeric fields in declaration order, stopping at the first token that is
/// not a float. Legacy strings simply have fewer fields.
fn parse_fields(text: &str) -> Vec<f32> {
    let scrubbed = text.replace(['{', '}'], " ");
    let mut fields = Vec::new();
    for token in scrubbed.split(',') {
        match token.trim().parse::<f32>() {
            Ok(value) => fields.push(value),
            Err(_) => break,
        }
    }
    fields
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}}}, {{{}, {}, {}}}, {{{}, {}, {}}}, {{{}}}, {{{}, {}}}, {{{}, {}}}, {{{}}}",
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.center.x,
            self.center.y,
            self.center.z,
            self.up.x,
            self.up.y,
            self.up.z,
            self.fov,
            self.near_far.x,
            self.near_far.y,
            self.ortho_mag.x,
            self.ortho_mag.y,
            self.projection as i32,
        )
    }
}

impl FromStr for Camera {
    type Err = ParseCameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut camera = Camera::default();
        camera.set_from_str(s)?;
        Ok(camera)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("camera string has {fields} numeric fields, expected at least 9")]
pub struct ParseCameraError {
    pub fields: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose_is_valid() {
        assert!(Camera::default().is_valid());
    }

    #[test]
    fn test_rejects_non_finite_positions() {
        let nan_eye = Camera {
            eye: Vec3::new(f32::NAN, 0.0, 0.0),
            ..Camera::default()
        };
        assert!(!nan_eye.is_valid());

        let inf_center = Camera {
            center: Vec3::new(0.0, f32::INFINITY, 0.0),
            ..Camera::default()
        };
        assert!(!inf_center.is_valid());
    }

    #[test]
    fn test_rejects_degenerate_up() {
        let zero_up = Camera {
            up: Vec3::ZERO,
            ..Camera::default()
        };
        assert!(!zero_up.is_valid());

        let tiny_up = Camera {
            up: Vec3::new(0.0, 1e-7, 0.0),
            ..Camera::default()
        };
        assert!(!tiny_up.is_valid());
    }

    #[test]
    fn test_rejects_eye_on_center() {
        let collapsed = Camera {
            eye: Vec3::new(1.0, 2.0, 3.0),
            center: Vec3::new(1.0, 2.0, 3.0),
            ..Camera::default()
        };
        assert!(!collapsed.is_valid());
    }

    #[test]
    fn test_rejects_fov_out_of_range() {
        let narrow = Camera {
            fov: 0.001,
            ..Camera::default()
        };
        assert!(!narrow.is_valid());

        let wide = Camera {
            fov: 179.5,
            ..Camera::default()
        };
        assert!(!wide.is_valid());

        let nan = Camera {
            fov: f32::NAN,
            ..Camera::default()
        };
        assert!(!nan.is_valid());
    }

    #[test]
    fn test_display_matches_field_order() {
        let text = Camera::default().to_string();
        assert_eq!(
            text,
            "{10, 10, 10}, {0, 0, 0}, {0, 1, 0}, {60}, {0.001, 100000}, {5, 5}, {0}"
        );
    }

    #[test]
    fn test_display_parse_round_trip() {
        let camera = Camera {
            eye: Vec3::new(1.25, -3.5, 9.75),
            center: Vec3::new(0.5, 0.25, -1.0),
            fov: 42.5,
            projection: Projection::Orthographic,
            ..Camera::default()
        };
        let parsed: Camera = camera.to_string().parse().unwrap();
        assert_eq!(parsed, camera);
    }

    #[test]
    fn test_nine_field_string_parses() {
        let mut camera = Camera::default();
        camera
            .set_from_str("{1, 2, 3}, {4, 5, 6}, {0, 1, 0}")
            .unwrap();
        assert_eq!(camera.eye, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.center, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(camera.up, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.fov, 60.0);
    }

    #[test]
    fn test_short_string_is_an_error() {
        let err = "{1, 2, 3}".parse::<Camera>().unwrap_err();
        assert_eq!(err.fields, 3);
    }
}
