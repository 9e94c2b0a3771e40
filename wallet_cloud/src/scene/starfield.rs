//! Background starfield: a far band of faint spheres that drifts slowly.

use bevy::prelude::*;

use crate::scene::cloud::LayoutEngine;
use crate::scene::materials;

const STAR_COUNT: usize = 2_000;
const MIN_RADIUS: f32 = 5_000.0;
const RADIUS_SPAN: f32 = 10_000.0;
const STAR_RADIUS: f32 = 6.0;

const STREAM_RADIUS: u64 = 48;
const STREAM_THETA: u64 = 49;
const STREAM_PHI: u64 = 50;
const STREAM_SCALE: u64 = 51;

/// Marker on the starfield root entity.
#[derive(Component)]
pub struct Starfield;

/// Spawns the starfield once at startup. Positions come from the jitter
/// source, so the sky is identical run to run for a given seed.
pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
    engine: Res<LayoutEngine>,
) {
    let jitter = engine.ctx.jitter();
    let star_mesh = meshes.add(Sphere::new(STAR_RADIUS));
    let star_material = materials::star_material(&mut materials_res);

    commands
        .spawn((Transform::default(), Visibility::Visible, Starfield))
        .with_children(|builder| {
            for i in 0..STAR_COUNT {
                let key = i as u64;
                let radius = MIN_RADIUS + jitter.unit(STREAM_RADIUS, key) * RADIUS_SPAN;
                let theta = jitter.unit(STREAM_THETA, key) * std::f32::consts::TAU;
                let phi = jitter.unit(STREAM_PHI, key) * std::f32::consts::PI;
                let position = Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                );
                let scale = 1.0 + jitter.unit(STREAM_SCALE, key) * 4.0;
                builder.spawn((
                    Mesh3d(star_mesh.clone()),
                    MeshMaterial3d(star_material.clone()),
                    Transform::from_translation(position).with_scale(Vec3::splat(scale)),
                ));
            }
        });
}

/// Barely-perceptible drift of the whole field.
pub fn rotate_starfield(time: Res<Time>, mut roots: Query<&mut Transform, With<Starfield>>) {
    let dt = time.delta_secs();
    for mut tf in &mut roots {
        tf.rotate_y(dt * 0.01);
        tf.rotate_x(dt * 0.005);
    }
}
