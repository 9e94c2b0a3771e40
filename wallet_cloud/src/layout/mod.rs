//! Spatial layout core: deterministic placement of wallets in 3D space.
//!
//! Everything in this module is pure computation over validated
//! configuration — no ECS types, no rendering, no hidden state. The scene
//! layer consumes the output; regeneration means calling [`LayoutContext::layout_all`]
//! again and swapping the whole result.

mod bounds;
mod jitter;
mod points;
mod shell;

use std::error::Error;
use std::fmt;

pub use bounds::BoundingVolume;
pub use jitter::Jitter;
pub use points::{CategoryLayout, LayoutPoint, WalletCategory, WalletLayout};
pub use shell::{generate_shell, ShellConfig, ShellPoint};

use crate::data::HoldingsSnapshot;

/// A configuration parameter outside its valid domain. Raised at context
/// construction, never mid-layout.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    OutOfDomain { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfDomain { field, value } => {
                write!(f, "configuration field `{field}` out of domain: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Tunables for the wallet placement formulas. All distances are world
/// units; angles are radians.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Base radial scale for all three spiral groups.
    pub base_radius: f32,
    /// Hard cap on the shared group's radial distance from the origin.
    pub shared_max_radius: f32,
    /// Multiplier applied on top of the radial formulas to spread nodes out.
    pub spacing_factor: f32,
    /// Fixed per-index elevation angle step.
    pub elevation_step: f32,
    /// Every `arm_interval`-th wallet is pushed onto a fractal sub-arm.
    pub arm_interval: usize,
    /// Magnitude of the sub-arm perturbation.
    pub arm_offset: f32,
    /// Jitter bound for the shared group, as a fraction of `base_radius`.
    pub shared_jitter: f32,
    /// Jitter bound for the single-token groups, as a fraction of `base_radius`.
    pub outer_jitter: f32,
    /// Minimum size basis — zero-holding wallets still render visibly.
    pub size_floor: f32,
    /// Scale applied to `ln(total_holding)`.
    pub size_log_scale: f32,
    /// Final multiplier on the size basis.
    pub size_gain: f32,
    /// Seed for the deterministic jitter source.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: 1250.0,
            shared_max_radius: 1000.0,
            spacing_factor: 1.25,
            elevation_step: 0.5,
            arm_interval: 5,
            arm_offset: 250.0,
            shared_jitter: 1.0 / 18.0,
            outer_jitter: 1.0 / 12.0,
            size_floor: 200.0,
            size_log_scale: 10.0,
            size_gain: 3.0,
            seed: 0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: &[(&'static str, f32)] = &[
            ("base_radius", self.base_radius),
            ("shared_max_radius", self.shared_max_radius),
            ("spacing_factor", self.spacing_factor),
            ("elevation_step", self.elevation_step),
            ("size_floor", self.size_floor),
            ("size_log_scale", self.size_log_scale),
            ("size_gain", self.size_gain),
        ];
        for &(field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfDomain {
                    field,
                    value: value as f64,
                });
            }
        }
        let non_negative: &[(&'static str, f32)] = &[
            ("arm_offset", self.arm_offset),
            ("shared_jitter", self.shared_jitter),
            ("outer_jitter", self.outer_jitter),
        ];
        for &(field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfDomain {
                    field,
                    value: value as f64,
                });
            }
        }
        if self.arm_interval == 0 {
            return Err(ConfigError::OutOfDomain {
                field: "arm_interval",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Owns a validated config and the jitter source. Construct one explicitly
/// and pass it where layout happens — there is no global instance.
#[derive(Clone, Debug)]
pub struct LayoutContext {
    config: LayoutConfig,
    jitter: Jitter,
}

impl LayoutContext {
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let jitter = Jitter::new(config.seed);
        Ok(Self { config, jitter })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn jitter(&self) -> &Jitter {
        &self.jitter
    }

    /// Lay out one category. Input order is preserved: index `i` of the
    /// input is index `i` of the output, which downstream uses as a stable
    /// key. Invalid records are excluded and counted, never propagated.
    pub fn layout(&self, category: WalletCategory, wallets: &[crate::data::WalletHolding]) -> CategoryLayout {
        points::layout_category(&self.config, &self.jitter, category, wallets)
    }

    /// Lay out all three categories and fit a bounding volume over the
    /// result. The returned value is complete — callers swap it in whole.
    pub fn layout_all(&self, snapshot: &HoldingsSnapshot) -> WalletLayout {
        let shared = self.layout(WalletCategory::Shared, &snapshot.shared);
        let token_a = self.layout(WalletCategory::TokenA, &snapshot.token_a);
        let token_b = self.layout(WalletCategory::TokenB, &snapshot.token_b);
        let bounds = BoundingVolume::from_points(
            shared
                .points
                .iter()
                .chain(&token_a.points)
                .chain(&token_b.points)
                .map(|p| p.position),
        );
        WalletLayout {
            shared,
            token_a,
            token_b,
            bounds,
        }
    }
}
