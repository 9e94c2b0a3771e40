//! Auto-screenshot: waits for the wallet cloud to be ingested, lets a few
//! frames render, captures the window, and exits.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use crate::scene::cloud::CloudState;

/// Resource controlling automatic screenshot capture. Arms once the first
/// snapshot has been laid out, counts down settle frames, captures, exits.
#[derive(Resource)]
pub struct ScreenshotMode {
    pub path: PathBuf,
    pub settle_frames: u32,
    pub captured: bool,
}

impl ScreenshotMode {
    pub fn new(path: PathBuf, settle_frames: u32) -> Self {
        Self {
            path,
            settle_frames,
            captured: false,
        }
    }
}

pub fn auto_screenshot_system(
    mut commands: Commands,
    mut mode: ResMut<ScreenshotMode>,
    state: Res<CloudState>,
    mut exit: EventWriter<AppExit>,
) {
    if mode.captured {
        exit.send(AppExit::Success);
        return;
    }

    // Nothing worth capturing until the first generation is on screen.
    if state.generation == 0 {
        return;
    }
    if mode.settle_frames > 0 {
        mode.settle_frames -= 1;
        return;
    }

    eprintln!("orrery: capturing screenshot to {}", mode.path.display());
    let path = mode.path.clone();
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
    mode.captured = true;
}

pub fn screenshot_plugin(app: &mut App) {
    app.add_systems(Update, auto_screenshot_system);
}
