mod hud;
mod tooltip;

pub use hud::{hud_plugin, HudState};
pub use tooltip::{tooltip_plugin, HoveredWallet};
