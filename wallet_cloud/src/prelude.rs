//! Minimal prelude for SDK consumers.

pub use crate::config::{source_config, token_symbols, TokenSymbols};
pub use crate::data::{
    HolderCaps, HoldingsSnapshot, HoldingsSource, SourceConfig, WalletHolding,
};
pub use crate::layout::{
    generate_shell, BoundingVolume, LayoutConfig, LayoutContext, LayoutPoint, ShellConfig,
    ShellPoint, WalletCategory, WalletLayout,
};
pub use crate::render::{PointCloudRenderer, SpritesAndShellsRenderer};
pub use crate::sdk::{CameraMode, WalletCloudBuilder};
