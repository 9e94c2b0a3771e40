//! Shared material and texture helpers for wallet sprites, shells, and
//! stars.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

const GLOW_TEXTURE_SIZE: u32 = 64;

/// Opacity stops of the radial glow, center to rim.
const GLOW_STOPS: &[(f32, f32)] = &[(0.0, 1.0), (0.2, 0.9), (0.4, 0.7), (0.8, 0.3), (1.0, 0.0)];

pub fn rgb(color: [f32; 3]) -> Color {
    Color::srgb(color[0], color[1], color[2])
}

/// Procedural radial-gradient glow. White so the sprite material's base
/// color tints it per wallet.
pub fn glow_texture() -> Image {
    let size = GLOW_TEXTURE_SIZE;
    let center = (size as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for row in 0..size {
        for col in 0..size {
            let dx = (col as f32 - center) / center;
            let dy = (row as f32 - center) / center;
            let alpha = glow_falloff((dx * dx + dy * dy).sqrt());
            data.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
        }
    }
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

fn glow_falloff(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    for pair in GLOW_STOPS.windows(2) {
        let (start, start_alpha) = pair[0];
        let (end, end_alpha) = pair[1];
        if t <= end {
            let local = (t - start) / (end - start);
            return start_alpha + (end_alpha - start_alpha) * local;
        }
    }
    0.0
}

/// Billboard sprite material for a wallet point: unlit, blended, tinted by
/// the layout color with a soft emissive push so bright holders glow.
pub fn sprite_material(
    materials: &mut Assets<StandardMaterial>,
    glow: &Handle<Image>,
    color: [f32; 3],
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: rgb(color),
        base_color_texture: Some(glow.clone()),
        emissive: LinearRgba::rgb(color[0] * 0.6, color[1] * 0.6, color[2] * 0.6),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    })
}

/// Translucent material shared by the points of one shell cluster.
pub fn shell_material(
    materials: &mut Assets<StandardMaterial>,
    color: [f32; 3],
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgba(color[0], color[1], color[2], 0.7),
        emissive: LinearRgba::rgb(color[0] * 0.4, color[1] * 0.4, color[2] * 0.4),
        alpha_mode: AlphaMode::Blend,
        ..default()
    })
}

/// Brighter variant for the duplicate center node inside a shell.
pub fn shell_center_material(
    materials: &mut Assets<StandardMaterial>,
    color: [f32; 3],
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgba(color[0], color[1], color[2], 0.9),
        emissive: LinearRgba::rgb(color[0] * 0.6, color[1] * 0.6, color[2] * 0.6),
        alpha_mode: AlphaMode::Blend,
        ..default()
    })
}

pub fn star_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.8),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    })
}
