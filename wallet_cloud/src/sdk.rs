//! SDK entry points and builder for composing the wallet cloud app.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::camera::{fly_camera_plugin, orbit_camera_plugin};
use crate::config::{self, TokenSymbols};
use crate::data::{init_snapshot_channel, SourceConfig};
use crate::layout::{LayoutConfig, LayoutContext, ShellConfig};
use crate::render::{PointCloudRenderer, RendererResource, SpritesAndShellsRenderer};
use crate::scene::{
    animate_shells, billboard_sprites, ingest_snapshots, rotate_starfield, screenshot_plugin,
    setup_scene, spawn_starfield, LayoutEngine, ScreenshotMode,
};
use crate::ui::{hud_plugin, tooltip_plugin};

/// Which camera rig to drive the viewpoint with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Free flight with jetpack boost. The desktop default.
    Fly,
    /// Rotate-around-focus, the touch-style alternative.
    Orbit,
}

/// Builder for constructing an Orrery app with customizable plugins.
pub struct WalletCloudBuilder {
    source: Option<SourceConfig>,
    layout_config: LayoutConfig,
    shell_config: ShellConfig,
    renderer: Option<Box<dyn PointCloudRenderer>>,
    symbols: Option<TokenSymbols>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    camera_mode: CameraMode,
    enable_hud: bool,
    enable_tooltip: bool,
    enable_starfield: bool,
    enable_shells: bool,
    enable_shell_animation: bool,
    screenshot: Option<(PathBuf, u32)>,
}

impl Default for WalletCloudBuilder {
    fn default() -> Self {
        Self {
            source: None,
            layout_config: LayoutConfig::default(),
            shell_config: ShellConfig::default(),
            renderer: None,
            symbols: None,
            window_title: "Orrery".to_string(),
            window_resolution: (1280.0, 720.0),
            // Deep space blue.
            clear_color: Color::srgb(0.0, 0.031, 0.082),
            camera_mode: CameraMode::Fly,
            enable_hud: true,
            enable_tooltip: true,
            enable_starfield: true,
            enable_shells: true,
            enable_shell_animation: true,
            screenshot: None,
        }
    }
}

impl WalletCloudBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull source config, layout seed, and token symbols from the
    /// environment.
    pub fn from_env(mut self) -> Self {
        self.source = Some(config::source_config());
        self.layout_config.seed = config::layout_seed();
        self.symbols = Some(config::token_symbols());
        self
    }

    /// Use an explicit holdings source configuration.
    pub fn source(mut self, source: SourceConfig) -> Self {
        self.source = Some(source);
        self
    }

    pub fn layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    pub fn shell_config(mut self, config: ShellConfig) -> Self {
        self.shell_config = config;
        self
    }

    /// Provide a custom point cloud renderer implementation.
    pub fn renderer(mut self, renderer: impl PointCloudRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn token_symbols(mut self, symbols: TokenSymbols) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn camera_mode(mut self, mode: CameraMode) -> Self {
        self.camera_mode = mode;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_tooltip(mut self) -> Self {
        self.enable_tooltip = false;
        self
    }

    pub fn disable_starfield(mut self) -> Self {
        self.enable_starfield = false;
        self
    }

    /// Skip spawning drill-down shells entirely. Ignored when a custom
    /// renderer is installed.
    pub fn disable_shells(mut self) -> Self {
        self.enable_shells = false;
        self
    }

    pub fn disable_shell_animation(mut self) -> Self {
        self.enable_shell_animation = false;
        self
    }

    /// Capture a screenshot and exit: waits for the first snapshot to be
    /// laid out, lets `settle_frames` render, then saves to `path`.
    pub fn screenshot_after(mut self, path: impl Into<PathBuf>, settle_frames: u32) -> Self {
        self.screenshot = Some((path.into(), settle_frames));
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    /// Panics on out-of-domain configuration — bad parameters must never
    /// reach a layout pass.
    pub fn build(self) -> App {
        let source = self.source.unwrap_or_else(config::source_config);
        let channel = init_snapshot_channel(source);

        let ctx = LayoutContext::new(self.layout_config)
            .unwrap_or_else(|err| panic!("orrery: invalid layout config: {err}"));
        self.shell_config
            .validate()
            .unwrap_or_else(|err| panic!("orrery: invalid shell config: {err}"));

        let renderer = self.renderer.unwrap_or_else(|| {
            let mut default = SpritesAndShellsRenderer::default();
            default.settings.enable_shells = self.enable_shells;
            Box::new(default)
        });

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(channel)
        .insert_resource(LayoutEngine {
            ctx,
            shell: self.shell_config,
        })
        .insert_resource(self.symbols.unwrap_or_default())
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (ingest_snapshots, billboard_sprites));

        renderer.setup(&mut app);
        app.insert_resource(RendererResource(renderer));

        match self.camera_mode {
            CameraMode::Fly => app.add_plugins(fly_camera_plugin),
            CameraMode::Orbit => app.add_plugins(orbit_camera_plugin),
        };

        if self.enable_shell_animation {
            app.add_systems(Update, animate_shells);
        }
        if self.enable_starfield {
            app.add_systems(Startup, spawn_starfield.after(setup_scene))
                .add_systems(Update, rotate_starfield);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_tooltip {
            app.add_plugins(tooltip_plugin);
        }
        if let Some((path, settle_frames)) = self.screenshot {
            app.insert_resource(ScreenshotMode::new(path, settle_frames))
                .add_plugins(screenshot_plugin);
        }

        app
    }
}
