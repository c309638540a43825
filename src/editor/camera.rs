use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

#[derive(Component)]
pub struct EditorCamera;

/// World units per screen pixel. Map coordinates are meters, so the
/// default shows 100 pixels per meter.
#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ZOOM,
        }
    }
}

impl CameraZoom {
    /// Apply one scroll step; positive `amount` zooms in.
    pub fn zoom_by(&mut self, amount: f32) {
        let factor = (1.0 - amount).max(0.1);
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Projection::Orthographic(OrthographicProjection {
            scale: DEFAULT_ZOOM,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<EditorCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        zoom.zoom_by(scroll_amount);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<EditorCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_default() {
        assert_eq!(CameraZoom::default().scale, DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_in_shrinks_scale() {
        let mut zoom = CameraZoom::default();
        zoom.zoom_by(0.1);
        assert!(zoom.scale < DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut zoom = CameraZoom::default();
        for _ in 0..200 {
            zoom.zoom_by(0.5);
        }
        assert_eq!(zoom.scale, MIN_ZOOM);

        for _ in 0..200 {
            zoom.zoom_by(-0.5);
        }
        assert_eq!(zoom.scale, MAX_ZOOM);
    }
}
