use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::components::{FlyCam, FlyCamState};

pub(crate) fn grab_cursor(mut q_window: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = q_window.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

pub(crate) fn fly_camera(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut evr_motion: EventReader<MouseMotion>,
    mut evr_scroll: EventReader<MouseWheel>,
    mut q_camera: Query<(&FlyCam, &mut FlyCamState, &mut Transform, &mut Projection)>,
) {
    // Accumulate the total amount of mouse motion and scroll from all
    // pending events
    let mut total_motion: Vec2 = evr_motion.read().map(|ev| ev.delta).sum();

    // Events are in window coordinates (Y-Down); looking up is positive
    total_motion.y = -total_motion.y;

    let mut total_scroll_lines = 0.0;
    let mut total_scroll_pixels = 0.0;
    for ev in evr_scroll.read() {
        match ev.unit {
            MouseScrollUnit::Line => total_scroll_lines += ev.y,
            MouseScrollUnit::Pixel => total_scroll_pixels += ev.y,
        }
    }

    for (settings, mut state, mut transform, mut projection) in &mut q_camera {
        let mut any = false;

        if total_motion != Vec2::ZERO {
            state.apply_look(settings, total_motion);
            any = true;
        }

        let scroll = total_scroll_lines * settings.scroll_line_sensitivity
            + total_scroll_pixels * settings.scroll_pixel_sensitivity;
        if scroll != 0.0 {
            state.apply_zoom(settings, scroll);
            any = true;
        }

        // Write orientation and zoom back out when anything changed, or on
        // the controller's first run to pick up the configured pose
        if any || state.is_added() {
            transform.rotation = Quat::from_euler(EulerRot::YXZ, state.yaw, state.pitch, 0.0);
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.fov = state.fov;
            }
        }

        // Movement follows the current view direction and is scaled by the
        // frame delta, so speed is independent of the frame rate
        let mut direction = Vec3::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            direction += *transform.forward();
        }
        if keyboard.pressed(KeyCode::KeyS) {
            direction -= *transform.forward();
        }
        if keyboard.pressed(KeyCode::KeyD) {
            direction += *transform.right();
        }
        if keyboard.pressed(KeyCode::KeyA) {
            direction -= *transform.right();
        }
        let direction = direction.normalize_or_zero();
        if direction != Vec3::ZERO {
            transform.translation += direction * settings.move_speed * time.delta_secs();
        }
    }
}
