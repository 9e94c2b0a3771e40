//! HUD overlay: holder counts, skipped records, jetpack fuel meter, FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::camera::FlyRig;
use crate::config::TokenSymbols;
use crate::layout::WalletLayout;

/// Live HUD state, refreshed whenever a snapshot is ingested.
#[derive(Resource, Default)]
pub struct HudState {
    pub token_a_count: usize,
    pub token_b_count: usize,
    pub shared_count: usize,
    pub skipped: usize,
    pub token_a_total: f64,
    pub token_b_total: f64,
    pub generations: u64,
}

impl HudState {
    pub fn update_from_layout(&mut self, layout: &WalletLayout) {
        self.token_a_count = layout.token_a.points.len();
        self.token_b_count = layout.token_b.points.len();
        self.shared_count = layout.shared.points.len();
        self.skipped = layout.total_skipped();
        self.token_a_total = layout
            .token_a
            .points
            .iter()
            .chain(&layout.shared.points)
            .map(|p| p.amount_a)
            .sum();
        self.token_b_total = layout
            .token_b
            .points
            .iter()
            .chain(&layout.shared.points)
            .map(|p| p.amount_b)
            .sum();
        self.generations += 1;
    }
}

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    symbols: Res<TokenSymbols>,
    diagnostics: Res<DiagnosticsStore>,
    rigs: Query<&FlyRig>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Wallet Cloud")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            let total = hud.token_a_count + hud.token_b_count + hud.shared_count;
            ui.label(
                egui::RichText::new(format!("{total} wallets"))
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            ui.label(
                egui::RichText::new(format!(
                    "{}  {} ({})",
                    symbols.token_a,
                    hud.token_a_count,
                    format_amount(hud.token_a_total)
                ))
                .color(egui::Color32::from_rgb(120, 230, 120)),
            );
            ui.label(
                egui::RichText::new(format!(
                    "{}  {} ({})",
                    symbols.token_b,
                    hud.token_b_count,
                    format_amount(hud.token_b_total)
                ))
                .color(egui::Color32::from_rgb(130, 150, 255)),
            );
            ui.label(format!("Both  {}", hud.shared_count));
            if hud.skipped > 0 {
                ui.label(
                    egui::RichText::new(format!("Skipped  {}", hud.skipped))
                        .color(egui::Color32::from_rgb(220, 160, 80)),
                );
            }

            if let Ok(rig) = rigs.get_single() {
                ui.add_space(4.0);
                ui.separator();
                let fraction = rig.fuel.fraction();
                ui.label("Jetpack fuel");
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .text(format!("{:.0}%", fraction * 100.0))
                        .fill(fuel_color(fraction)),
                );
            }

            ui.add_space(4.0);
            ui.separator();
            ui.label(format!("FPS  {fps:.0}"));
        });
}

/// Green when full, yellow below half, red when nearly dry.
fn fuel_color(fraction: f32) -> egui::Color32 {
    if fraction < 0.2 {
        egui::Color32::from_rgb(204, 34, 34)
    } else if fraction < 0.5 {
        egui::Color32::from_rgb(204, 204, 34)
    } else {
        egui::Color32::from_rgb(34, 204, 34)
    }
}

pub(crate) fn format_amount(amount: f64) -> String {
    if amount >= 1.0e9 {
        format!("{:.2}B", amount / 1.0e9)
    } else if amount >= 1.0e6 {
        format!("{:.2}M", amount / 1.0e6)
    } else if amount >= 1.0e3 {
        format!("{:.1}K", amount / 1.0e3)
    } else {
        format!("{amount:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HoldingsSnapshot, WalletHolding};
    use crate::layout::{LayoutConfig, LayoutContext};

    #[test]
    fn format_amount_picks_sane_units() {
        assert_eq!(format_amount(12.0), "12");
        assert_eq!(format_amount(4_500.0), "4.5K");
        assert_eq!(format_amount(2_500_000.0), "2.50M");
        assert_eq!(format_amount(7_100_000_000.0), "7.10B");
    }

    #[test]
    fn hud_state_tracks_counts_and_totals() {
        let ctx = LayoutContext::new(LayoutConfig::default()).unwrap();
        let snapshot = HoldingsSnapshot {
            token_a: vec![
                WalletHolding {
                    address: "a0".into(),
                    amount_a: 100.0,
                    amount_b: 0.0,
                },
                WalletHolding {
                    address: "bad".into(),
                    amount_a: -1.0,
                    amount_b: 0.0,
                },
            ],
            token_b: vec![],
            shared: vec![WalletHolding {
                address: "s0".into(),
                amount_a: 10.0,
                amount_b: 20.0,
            }],
        };
        let layout = ctx.layout_all(&snapshot);

        let mut hud = HudState::default();
        hud.update_from_layout(&layout);

        assert_eq!(hud.token_a_count, 1);
        assert_eq!(hud.token_b_count, 0);
        assert_eq!(hud.shared_count, 1);
        assert_eq!(hud.skipped, 1);
        assert_eq!(hud.token_a_total, 110.0);
        assert_eq!(hud.token_b_total, 20.0);
        assert_eq!(hud.generations, 1);
    }
}
