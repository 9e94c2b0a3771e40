use bevy::prelude::*;

use crate::layout::{generate_shell, Jitter, LayoutPoint, ShellConfig, WalletCategory};
use crate::render::{PointCloudRenderer, SpawnedPoint};
use crate::scene::cloud::PointSprite;
use crate::scene::materials;
use crate::scene::shells::ShellCluster;

#[derive(Clone, Debug)]
pub struct SpritesAndShellsSettings {
    /// Spawn a drill-down shell around every wallet sprite.
    pub enable_shells: bool,
    /// Slowest per-cluster rotation, radians per second.
    pub min_shell_spin: f32,
    /// Extra rotation on top of the minimum, scaled per cluster.
    pub shell_spin_span: f32,
}

impl Default for SpritesAndShellsSettings {
    fn default() -> Self {
        Self {
            enable_shells: true,
            min_shell_spin: 0.05,
            shell_spin_span: 0.10,
        }
    }
}

/// Default renderer: one glow billboard per wallet, plus an orbiting
/// Fibonacci shell of small spheres around it.
#[derive(Default)]
pub struct SpritesAndShellsRenderer {
    pub settings: SpritesAndShellsSettings,
}

impl PointCloudRenderer for SpritesAndShellsRenderer {
    fn spawn_point(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials_res: &mut ResMut<Assets<StandardMaterial>>,
        glow: &Handle<Image>,
        jitter: &Jitter,
        shell_config: &ShellConfig,
        category: WalletCategory,
        slot: usize,
        point: &LayoutPoint,
    ) -> SpawnedPoint {
        let material = materials::sprite_material(materials_res, glow, point.color);
        let sprite = commands
            .spawn((
                Mesh3d(meshes.add(Rectangle::new(1.0, 1.0))),
                MeshMaterial3d(material),
                Transform::from_translation(point.position)
                    .with_scale(Vec3::new(point.size_basis, point.size_basis, 1.0)),
                Visibility::Visible,
                PointSprite {
                    category,
                    slot,
                    base_scale: point.size_basis,
                },
            ))
            .id();

        let shell = self.settings.enable_shells.then(|| {
            spawn_shell_cluster(
                commands,
                meshes,
                materials_res,
                jitter,
                shell_config,
                &self.settings,
                category,
                slot,
                point,
            )
        });

        SpawnedPoint { sprite, shell }
    }
}

/// Spawns one shell cluster: a root at the parent position, a duplicate
/// center node, and the generated shell points as children. One mesh and
/// one material are shared across the whole cluster.
#[allow(clippy::too_many_arguments)]
fn spawn_shell_cluster(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials_res: &mut ResMut<Assets<StandardMaterial>>,
    jitter: &Jitter,
    shell_config: &ShellConfig,
    settings: &SpritesAndShellsSettings,
    category: WalletCategory,
    slot: usize,
    point: &LayoutPoint,
) -> Entity {
    let shell_points = generate_shell(point.size_basis, point.color, shell_config);

    let point_size = shell_points.first().map_or(1.0, |p| p.size);
    let sphere_mesh = meshes.add(Sphere::new(point_size / 2.0));
    let shell_color = shell_points.first().map_or(point.color, |p| p.color);
    let shell_material = materials::shell_material(materials_res, shell_color);

    let center_radius = point.size_basis * shell_config.center_size_scale / 2.0;
    let center_mesh = meshes.add(Sphere::new(center_radius));
    let center_material = materials::shell_center_material(materials_res, point.color);

    let cluster = ShellCluster::seeded(
        category,
        slot,
        jitter,
        settings.min_shell_spin,
        settings.shell_spin_span,
    );

    let mut root = commands.spawn((
        Transform::from_translation(point.position),
        Visibility::Visible,
        cluster,
    ));
    root.with_children(|builder| {
        builder.spawn((
            Mesh3d(center_mesh),
            MeshMaterial3d(center_material),
            Transform::default(),
        ));
        for shell_point in &shell_points {
            builder.spawn((
                Mesh3d(sphere_mesh.clone()),
                MeshMaterial3d(shell_material.clone()),
                Transform::from_translation(shell_point.offset),
            ));
        }
    });
    root.id()
}
