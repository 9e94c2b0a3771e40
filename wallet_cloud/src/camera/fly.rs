//! Fly rig: WASD + mouse-drag look, zero-G drift with damping and a weak
//! gravity pull, Left-Shift jetpack boost backed by a fuel tank.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::CameraTarget;

const LOOK_SPEED: f32 = 0.003;
/// Just shy of straight up/down; keeps the look rotation well-defined.
const PITCH_LIMIT: f32 = 1.54;

/// Jetpack fuel tank. Drain and refill rates are per second at the
/// reference 60 fps frame, matching the feel of the original tuning.
#[derive(Clone, Debug)]
pub struct JetpackFuel {
    pub level: f32,
    pub capacity: f32,
    pub drain_rate: f32,
    pub refill_rate: f32,
    /// Once emptied, the jetpack stays off until fuel climbs back here.
    pub reactivate_level: f32,
    pub boost_factor: f32,
    pub active: bool,
    pub enabled: bool,
}

impl Default for JetpackFuel {
    fn default() -> Self {
        Self {
            level: 250.0,
            capacity: 250.0,
            drain_rate: 1.2,
            refill_rate: 0.8,
            reactivate_level: 25.0,
            boost_factor: 2.5,
            active: false,
            enabled: true,
        }
    }
}

impl JetpackFuel {
    /// Advances the tank by one frame.
    pub fn tick(&mut self, wants_boost: bool, dt: f32) {
        if wants_boost && self.enabled && self.level > 0.0 {
            self.active = true;
            self.level = (self.level - self.drain_rate * dt * 60.0).max(0.0);
            if self.level <= 0.0 {
                self.enabled = false;
                self.active = false;
            }
        } else {
            self.active = false;
            if self.level < self.capacity {
                self.level = (self.level + self.refill_rate * dt * 60.0).min(self.capacity);
                if !self.enabled && self.level >= self.reactivate_level {
                    self.enabled = true;
                }
            }
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        self.level / self.capacity
    }
}

/// Free-flight camera state.
#[derive(Component)]
pub struct FlyRig {
    pub movement_speed: f32,
    pub velocity: Vec3,
    /// Per-second velocity decay; lower means more inertia.
    pub damping: f32,
    /// Weak world-space downward pull for the floating feel.
    pub gravity: f32,
    pub fuel: JetpackFuel,
    yaw: f32,
    pitch: f32,
}

impl Default for FlyRig {
    fn default() -> Self {
        Self {
            movement_speed: 400.0,
            velocity: Vec3::ZERO,
            damping: 0.2,
            gravity: 0.5,
            fuel: JetpackFuel::default(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

pub fn fly_camera_plugin(app: &mut App) {
    app.init_resource::<CameraTarget>()
        .add_systems(PostStartup, attach_fly_rig)
        .add_systems(Update, (apply_camera_target, fly_camera_system).chain());
}

fn attach_fly_rig(mut commands: Commands, cameras: Query<Entity, With<Camera3d>>) {
    for entity in &cameras {
        commands.entity(entity).insert(FlyRig::default());
    }
}

/// Consumes pending jump requests: snap the camera, kill momentum, and
/// resync the rig's look angles with the new orientation.
fn apply_camera_target(
    mut target: ResMut<CameraTarget>,
    mut cameras: Query<(&mut Transform, Option<&mut FlyRig>), With<Camera3d>>,
) {
    if target.target.is_none() && target.look_at.is_none() {
        return;
    }
    let Ok((mut tf, rig)) = cameras.get_single_mut() else {
        return;
    };
    if let Some(position) = target.target.take() {
        tf.translation = position;
    }
    if let Some(look) = target.look_at.take() {
        tf.look_at(look, Vec3::Y);
    }
    if let Some(mut rig) = rig {
        rig.velocity = Vec3::ZERO;
        let (yaw, pitch, _) = tf.rotation.to_euler(EulerRot::YXZ);
        rig.yaw = yaw;
        rig.pitch = pitch;
    }
}

fn fly_camera_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut contexts: EguiContexts,
    mut cameras: Query<(&mut Transform, &mut FlyRig), With<Camera3d>>,
) {
    let Ok((mut tf, mut rig)) = cameras.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    // Egui is optional; without it the pointer is never over a panel.
    let over_ui = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.is_pointer_over_area());

    let mut look_delta = Vec2::ZERO;
    for ev in motion.read() {
        look_delta += ev.delta;
    }
    if buttons.pressed(MouseButton::Left) && !over_ui && look_delta != Vec2::ZERO {
        rig.yaw -= look_delta.x * LOOK_SPEED;
        rig.pitch = (rig.pitch - look_delta.y * LOOK_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        tf.rotation = Quat::from_euler(EulerRot::YXZ, rig.yaw, rig.pitch, 0.0);
    }

    let forward = *tf.forward();
    let right = *tf.right();
    let up = *tf.up();
    let speed = rig.movement_speed;

    rig.fuel.tick(keys.pressed(KeyCode::ShiftLeft), dt);

    let mut thrust = Vec3::ZERO;
    if rig.fuel.active {
        // Jetpack overrides WASD: full thrust along the view direction.
        thrust += forward * speed * rig.fuel.boost_factor * dt;
    } else {
        if keys.pressed(KeyCode::KeyW) {
            thrust += forward * speed * dt;
        }
        if keys.pressed(KeyCode::KeyS) {
            thrust -= forward * speed * dt;
        }
        if keys.pressed(KeyCode::KeyD) {
            thrust += right * speed * dt;
        }
        if keys.pressed(KeyCode::KeyA) {
            thrust -= right * speed * dt;
        }
        if keys.pressed(KeyCode::KeyR) {
            thrust += up * speed * dt;
        }
        if keys.pressed(KeyCode::KeyF) {
            thrust -= up * speed * dt;
        }
    }

    rig.velocity += thrust;
    let decay = 1.0 - rig.damping * dt;
    rig.velocity *= decay.max(0.0);
    if !keys.pressed(KeyCode::KeyR) && !keys.pressed(KeyCode::KeyF) {
        rig.velocity.y -= rig.gravity * dt;
    }
    tf.translation += rig.velocity * dt;

    if !tf.translation.is_finite() {
        eprintln!("orrery: camera position went non-finite, resetting");
        tf.translation = Vec3::new(0.0, 0.0, 5_000.0);
        tf.look_at(Vec3::ZERO, Vec3::Y);
        rig.velocity = Vec3::ZERO;
        let (yaw, pitch, _) = tf.rotation.to_euler(EulerRot::YXZ);
        rig.yaw = yaw;
        rig.pitch = pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn boosting_drains_until_the_tank_disables() {
        let mut fuel = JetpackFuel::default();
        let mut ticks = 0;
        while fuel.enabled && ticks < 100_000 {
            fuel.tick(true, DT);
            ticks += 1;
        }
        assert!(ticks < 100_000, "tank never emptied");
        assert_eq!(fuel.level, 0.0);
        assert!(!fuel.active);
        assert!(!fuel.enabled);
    }

    #[test]
    fn refill_reenables_at_the_threshold() {
        let mut fuel = JetpackFuel {
            level: 0.0,
            enabled: false,
            active: false,
            ..Default::default()
        };
        // Below the threshold the jetpack stays off even when requested.
        fuel.tick(true, DT);
        assert!(!fuel.active);

        while !fuel.enabled {
            fuel.tick(false, DT);
        }
        assert!(fuel.level >= fuel.reactivate_level);
    }

    #[test]
    fn refill_clamps_at_capacity() {
        let mut fuel = JetpackFuel::default();
        for _ in 0..1_000 {
            fuel.tick(false, DT);
        }
        assert_eq!(fuel.level, fuel.capacity);
    }

    #[test]
    fn fraction_is_bounded() {
        let fuel = JetpackFuel::default();
        assert_eq!(fuel.fraction(), 1.0);
        let empty = JetpackFuel {
            level: 0.0,
            ..Default::default()
        };
        assert_eq!(empty.fraction(), 0.0);
    }
}
