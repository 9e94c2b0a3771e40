//! Wallet cloud state and ingestion: `CloudState`, `PointSprite`, the
//! snapshot ingest system, and scene setup.

use bevy::prelude::*;

use crate::camera::CameraTarget;
use crate::data::SnapshotChannel;
use crate::layout::{LayoutContext, LayoutPoint, ShellConfig, WalletCategory, WalletLayout};
use crate::render::RendererResource;
use crate::scene::materials;
use crate::ui::HudState;

/// Camera fit: never closer than this, and back off with the cloud size.
const MIN_CAMERA_DISTANCE: f32 = 5_000.0;
const CAMERA_FILL: f32 = 3.0;

/// Layout context and shell config bundled as the ECS-facing engine handle.
#[derive(Resource)]
pub struct LayoutEngine {
    pub ctx: LayoutContext,
    pub shell: ShellConfig,
}

/// Marker + arena key for wallet sprite entities. Domain data stays in
/// [`CloudState`]; the sprite only knows where to look it up.
#[derive(Component)]
pub struct PointSprite {
    pub category: WalletCategory,
    pub slot: usize,
    pub base_scale: f32,
}

/// slot → entity maps, one per category.
#[derive(Default)]
pub struct EntityArena {
    pub token_a: Vec<Entity>,
    pub token_b: Vec<Entity>,
    pub shared: Vec<Entity>,
}

impl EntityArena {
    pub fn of_mut(&mut self, category: WalletCategory) -> &mut Vec<Entity> {
        match category {
            WalletCategory::TokenA => &mut self.token_a,
            WalletCategory::TokenB => &mut self.token_b,
            WalletCategory::Shared => &mut self.shared,
        }
    }

    fn drain_all(&mut self) -> impl Iterator<Item = Entity> + '_ {
        self.token_a
            .drain(..)
            .chain(self.token_b.drain(..))
            .chain(self.shared.drain(..))
    }
}

/// The current generation of the visualization. Replaced wholesale when a
/// snapshot arrives — consumers never see a half-swapped point set.
#[derive(Resource, Default)]
pub struct CloudState {
    pub layout: Option<WalletLayout>,
    pub sprites: EntityArena,
    pub shell_roots: Vec<Entity>,
    pub generation: u64,
    glow: Option<Handle<Image>>,
}

impl CloudState {
    pub fn point_for(&self, sprite: &PointSprite) -> Option<&LayoutPoint> {
        self.layout.as_ref()?.point(sprite.category, sprite.slot)
    }
}

pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(CloudState::default());
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 1.0,
            far: 50_000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 5_000.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
    });
}

/// Drains the snapshot channel and rebuilds the cloud from the most recent
/// snapshot. The full layout is computed before any entity is touched, and
/// the state swap happens last. With nothing pending this is a no-op, so
/// re-running it is always safe.
#[allow(clippy::too_many_arguments)]
pub fn ingest_snapshots(
    mut commands: Commands,
    channel: Res<SnapshotChannel>,
    engine: Res<LayoutEngine>,
    renderer: Res<RendererResource>,
    mut state: ResMut<CloudState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut camera_target: ResMut<CameraTarget>,
    mut hud_state: Option<ResMut<HudState>>,
) {
    let mut snapshot = None;
    while let Ok(pending) = channel.0.try_recv() {
        snapshot = Some(pending);
    }
    let Some(snapshot) = snapshot else {
        return;
    };

    let layout = engine.ctx.layout_all(&snapshot);
    if layout.total_skipped() > 0 {
        eprintln!(
            "orrery: skipped {} invalid holder records",
            layout.total_skipped()
        );
    }
    eprintln!(
        "orrery: laid out {} wallets ({} a / {} b / {} shared)",
        layout.total_points(),
        layout.token_a.points.len(),
        layout.token_b.points.len(),
        layout.shared.points.len(),
    );

    for entity in state.sprites.drain_all() {
        commands.entity(entity).despawn();
    }
    for entity in state.shell_roots.drain(..) {
        commands.entity(entity).despawn_recursive();
    }

    let glow = state
        .glow
        .get_or_insert_with(|| images.add(materials::glow_texture()))
        .clone();

    for category in [
        WalletCategory::Shared,
        WalletCategory::TokenA,
        WalletCategory::TokenB,
    ] {
        for (slot, point) in layout.category(category).points.iter().enumerate() {
            let spawned = renderer.0.spawn_point(
                &mut commands,
                &mut meshes,
                &mut materials_res,
                &glow,
                engine.ctx.jitter(),
                &engine.shell,
                category,
                slot,
                point,
            );
            state.sprites.of_mut(category).push(spawned.sprite);
            if let Some(shell) = spawned.shell {
                state.shell_roots.push(shell);
            }
        }
    }

    let bounds = layout.bounds;
    let distance = bounds.camera_distance(MIN_CAMERA_DISTANCE, CAMERA_FILL);
    camera_target.target = Some(Vec3::new(
        bounds.center.x,
        bounds.center.y + bounds.max_dimension() * 0.5,
        bounds.center.z + distance,
    ));
    camera_target.look_at = Some(bounds.center);

    if let Some(hud) = hud_state.as_mut() {
        hud.update_from_layout(&layout);
    }

    state.generation += 1;
    state.layout = Some(layout);
}

/// Rotates every wallet sprite to face the camera each frame.
pub fn billboard_sprites(
    camera_query: Query<&Transform, With<Camera3d>>,
    mut sprites: Query<&mut Transform, (With<PointSprite>, Without<Camera3d>)>,
) {
    let Ok(cam_tf) = camera_query.get_single() else {
        return;
    };
    let cam_pos = cam_tf.translation;
    for mut tf in &mut sprites {
        tf.look_at(cam_pos, Vec3::Y);
    }
}
