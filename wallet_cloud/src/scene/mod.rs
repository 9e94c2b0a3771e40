pub(crate) mod cloud;
pub(crate) mod materials;
mod screenshot;
pub(crate) mod shells;
pub(crate) mod starfield;

pub use cloud::{
    billboard_sprites, ingest_snapshots, setup_scene, CloudState, LayoutEngine, PointSprite,
};
pub use screenshot::{screenshot_plugin, ScreenshotMode};
pub use shells::animate_shells;
pub use starfield::{rotate_starfield, spawn_starfield};
