//! Wallet placement: golden-angle spirals, mirrored ±X groups, fractal
//! sub-arms, holding-driven color and size.

use bevy::math::Vec3;

use crate::data::WalletHolding;
use crate::layout::{BoundingVolume, Jitter, LayoutConfig};

/// ≈137.5° — non-repeating angular coverage as the index grows.
const GOLDEN_ANGLE: f32 = 137.5 * (std::f32::consts::PI / 180.0);

/// Which holder list a wallet came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalletCategory {
    /// Holds only token A — spiral translated into +X space.
    TokenA,
    /// Holds only token B — mirror of token A in -X space.
    TokenB,
    /// Holds both — clustered in a bounded sphere around the origin.
    Shared,
}

impl WalletCategory {
    pub fn label(&self) -> &'static str {
        match self {
            WalletCategory::TokenA => "token-a",
            WalletCategory::TokenB => "token-b",
            WalletCategory::Shared => "shared",
        }
    }

    pub(crate) fn stream_tag(&self) -> u64 {
        match self {
            WalletCategory::TokenA => 1,
            WalletCategory::TokenB => 2,
            WalletCategory::Shared => 3,
        }
    }
}

/// One wallet mapped into space. Created once per layout pass and never
/// mutated; a data refresh regenerates the whole set.
#[derive(Clone, Debug)]
pub struct LayoutPoint {
    /// Index of the wallet in its source list. Placement is keyed by this,
    /// so skipping an invalid record never shifts its neighbors.
    pub source_index: usize,
    pub position: Vec3,
    pub address: String,
    pub amount_a: f64,
    pub amount_b: f64,
    pub total_holding: f64,
    pub category: WalletCategory,
    /// sRGB fractions, 0..=1 per channel.
    pub color: [f32; 3],
    /// Rendered scale basis, floor-clamped so every wallet stays visible.
    pub size_basis: f32,
}

/// Output of laying out one category.
#[derive(Clone, Debug, Default)]
pub struct CategoryLayout {
    pub points: Vec<LayoutPoint>,
    /// Records excluded for negative/non-finite amounts or degenerate
    /// coordinates.
    pub skipped: usize,
}

/// The complete, atomically-swappable layout of all three categories.
#[derive(Clone, Debug)]
pub struct WalletLayout {
    pub shared: CategoryLayout,
    pub token_a: CategoryLayout,
    pub token_b: CategoryLayout,
    pub bounds: BoundingVolume,
}

impl WalletLayout {
    pub fn category(&self, category: WalletCategory) -> &CategoryLayout {
        match category {
            WalletCategory::TokenA => &self.token_a,
            WalletCategory::TokenB => &self.token_b,
            WalletCategory::Shared => &self.shared,
        }
    }

    pub fn point(&self, category: WalletCategory, slot: usize) -> Option<&LayoutPoint> {
        self.category(category).points.get(slot)
    }

    pub fn total_points(&self) -> usize {
        self.shared.points.len() + self.token_a.points.len() + self.token_b.points.len()
    }

    pub fn total_skipped(&self) -> usize {
        self.shared.skipped + self.token_a.skipped + self.token_b.skipped
    }
}

pub(crate) fn layout_category(
    config: &LayoutConfig,
    jitter: &Jitter,
    category: WalletCategory,
    wallets: &[WalletHolding],
) -> CategoryLayout {
    let mut layout = CategoryLayout {
        points: Vec::with_capacity(wallets.len()),
        skipped: 0,
    };
    let count = wallets.len();
    for (i, wallet) in wallets.iter().enumerate() {
        match place_wallet(config, jitter, category, wallet, i, count) {
            Some(point) => layout.points.push(point),
            None => layout.skipped += 1,
        }
    }
    layout
}

fn place_wallet(
    config: &LayoutConfig,
    jitter: &Jitter,
    category: WalletCategory,
    wallet: &WalletHolding,
    index: usize,
    count: usize,
) -> Option<LayoutPoint> {
    if !amount_is_valid(wallet.amount_a) || !amount_is_valid(wallet.amount_b) {
        return None;
    }
    let total = wallet.amount_a + wallet.amount_b;

    let position = match category {
        WalletCategory::Shared => shared_position(config, jitter, index, count),
        WalletCategory::TokenA => outer_position(config, jitter, category, 1.0, index),
        WalletCategory::TokenB => outer_position(config, jitter, category, -1.0, index),
    };
    if !position.is_finite() {
        return None;
    }

    let color = match category {
        WalletCategory::Shared => shared_color(total),
        WalletCategory::TokenA => token_a_color(wallet.amount_a),
        WalletCategory::TokenB => token_b_color(wallet.amount_b),
    };

    Some(LayoutPoint {
        source_index: index,
        position,
        address: wallet.address.clone(),
        amount_a: wallet.amount_a,
        amount_b: wallet.amount_b,
        total_holding: total,
        category,
        color,
        size_basis: size_basis(config, total),
    })
}

fn amount_is_valid(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Shared wallets sit in a bounded ball around the origin: logarithmically
/// compressed radius over the normalized index, golden-angle azimuth, fixed
/// elevation step.
fn shared_position(config: &LayoutConfig, jitter: &Jitter, index: usize, count: usize) -> Vec3 {
    let normalized = index as f32 / count as f32;
    let r = (config.base_radius * (normalized + 1.5).ln() / 3.0).min(config.shared_max_radius);
    let theta = index as f32 * GOLDEN_ANGLE;
    let phi = index as f32 * config.elevation_step;
    let s = config.spacing_factor;

    let base = Vec3::new(
        r * s * theta.cos() * phi.sin(),
        r * s * theta.sin() * phi.sin(),
        r * s * phi.cos(),
    );
    base + jitter_offset(
        jitter,
        WalletCategory::Shared,
        index,
        config.base_radius * config.shared_jitter,
    )
}

/// Single-token wallets spiral outward with an unbounded log radius and a
/// fixed translation along ±X; `sign` selects the half-space. Every
/// `arm_interval`-th wallet is deflected onto a sinusoidal sub-arm, which
/// breaks the spiral into distinct fractal arms.
fn outer_position(
    config: &LayoutConfig,
    jitter: &Jitter,
    category: WalletCategory,
    sign: f32,
    index: usize,
) -> Vec3 {
    let r = outer_radius(config, index);
    let theta = index as f32 * GOLDEN_ANGLE;
    let phi = index as f32 * config.elevation_step;
    let s = config.spacing_factor;

    let mut x = sign * (r * s * theta.cos() + config.base_radius);
    let mut y = r * s * theta.sin();
    let z = r * s * phi.sin();

    if index % config.arm_interval == 0 {
        x += sign * config.arm_offset * (index as f32).sin();
        y += config.arm_offset * (index as f32).cos();
    }

    Vec3::new(x, y, z)
        + jitter_offset(
            jitter,
            category,
            index,
            config.base_radius * config.outer_jitter,
        )
}

/// Radial distance for the single-token groups. Monotone in the index:
/// later wallets always sit at least as far out.
pub(crate) fn outer_radius(config: &LayoutConfig, index: usize) -> f32 {
    config.base_radius * (index as f32 + 2.0).ln()
}

fn jitter_offset(jitter: &Jitter, category: WalletCategory, index: usize, bound: f32) -> Vec3 {
    let tag = category.stream_tag() << 2;
    Vec3::new(
        jitter.symmetric(tag, index as u64, bound),
        jitter.symmetric(tag | 1, index as u64, bound),
        jitter.symmetric(tag | 2, index as u64, bound),
    )
}

/// Shared wallets read as white-gray; brightness tracks the combined
/// holding and saturates at full white.
fn shared_color(total: f64) -> [f32; 3] {
    let brightness = (200.0 + total / 1.0e6).min(255.0) as f32 / 255.0;
    [brightness, brightness, brightness]
}

/// Token-A wallets sit on the reserved green hue; the variable part of the
/// brightness saturates at a lower ceiling than the shared group's.
fn token_a_color(amount: f64) -> [f32; 3] {
    [0.0, token_brightness(amount), 0.0]
}

/// Token-B mirror: same brightness curve on the blue channel.
fn token_b_color(amount: f64) -> [f32; 3] {
    [0.0, 0.0, token_brightness(amount)]
}

fn token_brightness(amount: f64) -> f32 {
    ((50.0 + amount / 1.0e6).min(200.0) + 55.0) as f32 / 255.0
}

fn size_basis(config: &LayoutConfig, total: f64) -> f32 {
    if total <= 0.0 {
        return config.size_floor;
    }
    let scaled = total.ln() as f32 * config.size_log_scale * config.size_gain;
    scaled.max(config.size_floor)
}
