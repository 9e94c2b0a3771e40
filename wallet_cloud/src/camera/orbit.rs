//! Orbit rig: drag to rotate around a focus point, scroll to zoom. The
//! touch-friendly alternative to the fly rig.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::CameraTarget;

const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera state. The transform is recomputed from these fields every
/// frame, so the rig fully owns the camera pose.
#[derive(Component)]
pub struct OrbitRig {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    /// Fractional zoom per scroll line.
    pub zoom_speed: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 5_000.0,
            yaw: 0.0,
            pitch: 0.2,
            min_distance: 1_000.0,
            max_distance: 50_000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.init_resource::<CameraTarget>()
        .add_systems(PostStartup, attach_orbit_rig)
        .add_systems(Update, (apply_camera_target, orbit_camera_system).chain());
}

fn attach_orbit_rig(mut commands: Commands, cameras: Query<Entity, With<Camera3d>>) {
    for entity in &cameras {
        commands.entity(entity).insert(OrbitRig::default());
    }
}

/// Consumes pending jump requests by re-aiming the orbit at the new focus.
fn apply_camera_target(mut target: ResMut<CameraTarget>, mut rigs: Query<&mut OrbitRig>) {
    if target.target.is_none() && target.look_at.is_none() {
        return;
    }
    let Ok(mut rig) = rigs.get_single_mut() else {
        return;
    };
    if let Some(look) = target.look_at.take() {
        rig.focus = look;
    }
    if let Some(position) = target.target.take() {
        let offset = position - rig.focus;
        let distance = offset.length();
        if distance > f32::EPSILON {
            rig.distance = distance.clamp(rig.min_distance, rig.max_distance);
            let dir = offset / distance;
            rig.pitch = dir.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
            rig.yaw = dir.x.atan2(dir.z);
        }
    }
}

fn orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut cameras: Query<(&mut Transform, &mut OrbitRig), With<Camera3d>>,
) {
    let Ok((mut tf, mut rig)) = cameras.get_single_mut() else {
        return;
    };
    // Egui is optional; without it the pointer is never over a panel.
    let over_ui = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.is_pointer_over_area());

    let mut drag = Vec2::ZERO;
    for ev in motion.read() {
        drag += ev.delta;
    }
    if buttons.pressed(MouseButton::Left) && !over_ui && drag != Vec2::ZERO {
        rig.yaw -= drag.x * rig.rotate_speed;
        rig.pitch = (rig.pitch + drag.y * rig.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    let mut zoom = 0.0;
    for ev in wheel.read() {
        zoom += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 50.0,
        };
    }
    if zoom != 0.0 && !over_ui {
        let factor = 1.0 - zoom * rig.zoom_speed;
        rig.distance = (rig.distance * factor.max(0.1)).clamp(rig.min_distance, rig.max_distance);
    }

    let rotation = Quat::from_euler(EulerRot::YXZ, rig.yaw, -rig.pitch, 0.0);
    tf.translation = rig.focus + rotation * (Vec3::Z * rig.distance);
    tf.look_at(rig.focus, Vec3::Y);
}
