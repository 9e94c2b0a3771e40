//! Wallet cloud — 3D visualization of token holders as glowing point
//! constellations with drill-down shells.
//!
//! Library root: config, data, layout core, and SDK builder modules.

mod camera;
pub mod config;
pub mod data;
pub mod layout;
pub mod render;
mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use data::{FixtureSource, HoldingsSnapshot, HoldingsSource, SourceConfig, WalletHolding};
pub use layout::{LayoutConfig, LayoutContext, ShellConfig, WalletCategory};
