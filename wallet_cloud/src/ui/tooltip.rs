//! Hover tooltip: cursor-ray hit testing against wallet sprites, a pulse
//! animation on the hovered sprite, and wallet details near the cursor.
//!
//! Hit testing is proximity-based rather than mesh picking: sprites are
//! billboards, so the perpendicular distance from the cursor ray to the
//! sprite center scaled against the sprite size is the right test, and it
//! avoids input conflicts with bevy_egui.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::config::TokenSymbols;
use crate::scene::materials;
use crate::scene::{CloudState, PointSprite};
use crate::ui::hud::format_amount;

/// Hit radius as a fraction of the sprite's base scale. Generous on
/// purpose: glow sprites read larger than their quad.
const HOVER_THRESHOLD: f32 = 0.75;

/// Currently hovered sprite plus the bookkeeping needed to restore it.
#[derive(Resource, Default)]
pub struct HoveredWallet {
    pub entity: Option<Entity>,
    previous: Option<Entity>,
    pulse_time: f32,
}

pub fn tooltip_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<HoveredWallet>().add_systems(
        Update,
        (hover_raycast_system, pulse_hovered_system, tooltip_panel_system).chain(),
    );
}

fn hover_raycast_system(
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    sprites: Query<(Entity, &GlobalTransform, &PointSprite)>,
    mut hovered: ResMut<HoveredWallet>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        hovered.entity = None;
        return;
    };
    if contexts.ctx_mut().is_pointer_over_area() {
        hovered.entity = None;
        return;
    }
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, cursor_pos) else {
        return;
    };

    let origin = ray.origin;
    let dir: Vec3 = *ray.direction;

    let mut best_hit: Option<(Entity, f32)> = None;
    for (entity, transform, sprite) in &sprites {
        let center = transform.translation();
        let along = (center - origin).dot(dir);
        if along <= 0.0 {
            continue;
        }
        let closest = origin + dir * along;
        if closest.distance(center) > sprite.base_scale * HOVER_THRESHOLD {
            continue;
        }
        if best_hit.is_none_or(|(_, d)| along < d) {
            best_hit = Some((entity, along));
        }
    }

    hovered.entity = best_hit.map(|(entity, _)| entity);
}

/// Pulses the hovered sprite's scale and color, restoring the previous
/// hover target exactly from the layout data.
fn pulse_hovered_system(
    time: Res<Time>,
    mut hovered: ResMut<HoveredWallet>,
    state: Res<CloudState>,
    mut material_assets: ResMut<Assets<StandardMaterial>>,
    mut sprites: Query<(
        &PointSprite,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    if hovered.previous != hovered.entity {
        if let Some(prev) = hovered.previous {
            if let Ok((sprite, mut tf, material)) = sprites.get_mut(prev) {
                tf.scale = Vec3::new(sprite.base_scale, sprite.base_scale, 1.0);
                if let (Some(point), Some(mat)) = (
                    state.point_for(sprite),
                    material_assets.get_mut(&material.0),
                ) {
                    mat.base_color = materials::rgb(point.color);
                }
            }
        }
        hovered.previous = hovered.entity;
        hovered.pulse_time = 0.0;
    }

    let Some(entity) = hovered.entity else {
        return;
    };
    hovered.pulse_time += time.delta_secs();
    let t = hovered.pulse_time;

    let Ok((sprite, mut tf, material)) = sprites.get_mut(entity) else {
        return;
    };
    let scale = sprite.base_scale * (5.0 + (t * 8.0).sin() * 3.0);
    tf.scale = Vec3::new(scale, scale, 1.0);
    if let Some(mat) = material_assets.get_mut(&material.0) {
        mat.base_color = Color::srgb(1.0, 1.0, 0.7 + (t * 16.0).sin() * 0.3);
    }
}

fn tooltip_panel_system(
    mut contexts: EguiContexts,
    hovered: Res<HoveredWallet>,
    windows: Query<&Window>,
    state: Res<CloudState>,
    symbols: Res<TokenSymbols>,
    sprites: Query<&PointSprite>,
) {
    let Some(entity) = hovered.entity else {
        return;
    };
    let Ok(sprite) = sprites.get(entity) else {
        return;
    };
    let Some(point) = state.point_for(sprite) else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    egui::Window::new("wallet-tooltip")
        .title_bar(false)
        .resizable(false)
        .interactable(false)
        .fixed_pos([cursor.x + 15.0, cursor.y + 15.0])
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 205))
                .inner_margin(egui::Margin::same(10))
                .corner_radius(egui::CornerRadius::same(5)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);

            ui.label(
                egui::RichText::new("Wallet Details")
                    .size(14.0)
                    .color(egui::Color32::from_rgb(136, 204, 255)),
            );
            let display = if let Some(name) = known_wallet_label(&point.address) {
                format!("{} ({})", abbreviate(&point.address, 8, 6), name)
            } else {
                abbreviate(&point.address, 8, 6)
            };
            ui.label(
                egui::RichText::new(display).color(egui::Color32::from_rgb(170, 204, 255)),
            );
            ui.add_space(6.0);

            ui.label(
                egui::RichText::new(format!(
                    "{}: {}",
                    symbols.token_a,
                    format_amount(point.amount_a)
                ))
                .color(egui::Color32::from_rgb(136, 255, 136)),
            );
            ui.label(
                egui::RichText::new(format!(
                    "{}: {}",
                    symbols.token_b,
                    format_amount(point.amount_b)
                ))
                .color(egui::Color32::from_rgb(136, 136, 255)),
            );
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!("Total: {}", format_amount(point.total_holding)))
                    .color(egui::Color32::WHITE),
            );
        });
}

fn abbreviate(s: &str, prefix_len: usize, suffix_len: usize) -> String {
    if s.len() <= prefix_len + suffix_len + 2 {
        return s.to_string();
    }
    format!("{}..{}", &s[..prefix_len], &s[s.len() - suffix_len..])
}

/// Exchange hot wallets and AMM authorities that show up in holder lists.
fn known_wallet_label(address: &str) -> Option<&'static str> {
    match address {
        "5tzFkiKscXHK5ZXCGbXZxdw7gTjjD1mBwuoFbhUvuAi9" => Some("Binance"),
        "AC5RDfQFmDS1deWZos921JfqscXdByf8BKHs5ACWjtW2" => Some("Bybit"),
        "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1" => Some("Raydium"),
        "u6PJ8DtQuPFnfmwHbGFULQ4u4EgjDiyYKjVEsynXq2w" => Some("Gate.io"),
        "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM" => Some("Kraken"),
        _ => None,
    }
}
