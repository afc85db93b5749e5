use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// The configuration of the free-fly controller
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(FlyCamState)]
pub struct FlyCam {
    /// World units per second of keyboard movement
    pub move_speed: f32,
    /// Radians per pixel of mouse motion
    pub look_sensitivity: f32,
    /// Radians of field of view per scroll unit
    pub zoom_sensitivity: f32,
    /// For devices with a notched scroll wheel, like desktop mice
    pub scroll_line_sensitivity: f32,
    /// For devices with smooth scrolling, like touchpads
    pub scroll_pixel_sensitivity: f32,
    /// Pitch is clamped to this angle on either side to stay off the poles
    pub pitch_limit: f32,
    /// Field-of-view clamp range, radians
    pub fov_min: f32,
    pub fov_max: f32,
}

impl Default for FlyCam {
    fn default() -> Self {
        FlyCam {
            move_speed: 5.0,
            look_sensitivity: 0.1f32.to_radians(), // 0.1 degree per pixel
            zoom_sensitivity: 1.0f32.to_radians(),
            scroll_line_sensitivity: 1.0,
            scroll_pixel_sensitivity: 1.0 / 16.0, // 16 "pixels of motion" == 1 "line"
            pitch_limit: 89f32.to_radians(),
            fov_min: 1f32.to_radians(),
            fov_max: 45f32.to_radians(),
        }
    }
}

// The internal state of the free-fly controller
#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct FlyCamState {
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl Default for FlyCamState {
    fn default() -> Self {
        FlyCamState {
            yaw: 0.0,
            pitch: 0.0,
            fov: 45f32.to_radians(),
        }
    }
}

impl FlyCamState {
    /// Applies a pointer delta (pixels, +y looks up) to the orientation.
    pub fn apply_look(&mut self, settings: &FlyCam, delta: Vec2) {
        self.yaw -= delta.x * settings.look_sensitivity;
        // wrap around, to stay between +- 180 degrees
        if self.yaw > PI {
            self.yaw -= TAU;
        }
        if self.yaw < -PI {
            self.yaw += TAU;
        }
        self.pitch = (self.pitch + delta.y * settings.look_sensitivity)
            .clamp(-settings.pitch_limit, settings.pitch_limit);
    }

    /// Applies a scroll amount to the field of view. Scrolling up narrows
    /// the field of view (zooms in).
    pub fn apply_zoom(&mut self, settings: &FlyCam, amount: f32) {
        self.fov = (self.fov - amount * settings.zoom_sensitivity)
            .clamp(settings.fov_min, settings.fov_max);
    }

    /// The camera's world transform for this orientation at `position`.
    /// YXZ Euler rotation performs yaw then pitch, with no roll.
    pub fn camera_transform(&self, position: Vec3) -> Transform {
        Transform {
            translation: position,
            rotation: Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0),
            scale: Vec3::ONE,
        }
    }

    /// The view matrix: the inverse of the camera's world transform.
    pub fn view_matrix(&self, position: Vec3) -> Mat4 {
        self.camera_transform(position).compute_matrix().inverse()
    }
}
