//! Renderer traits and default implementations.

mod sprites_and_shells;

use bevy::prelude::*;

use crate::layout::{Jitter, LayoutPoint, ShellConfig, WalletCategory};

pub use sprites_and_shells::{SpritesAndShellsRenderer, SpritesAndShellsSettings};

/// Entities created for one wallet point.
pub struct SpawnedPoint {
    pub sprite: Entity,
    pub shell: Option<Entity>,
}

/// Interface for turning layout points into renderable entities. The
/// default implementation spawns glow sprites with orbiting shells; swap in
/// another implementation through the SDK builder to render differently.
pub trait PointCloudRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}

    #[allow(clippy::too_many_arguments)]
    fn spawn_point(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials: &mut ResMut<Assets<StandardMaterial>>,
        glow: &Handle<Image>,
        jitter: &Jitter,
        shell_config: &ShellConfig,
        category: WalletCategory,
        slot: usize,
        point: &LayoutPoint,
    ) -> SpawnedPoint;
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn PointCloudRenderer>);

impl RendererResource {
    pub fn new(renderer: impl PointCloudRenderer) -> Self {
        Self(Box::new(renderer))
    }
}
