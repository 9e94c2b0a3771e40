// Renderer-agnostic holder records. Everything the scene needs to know
// about a wallet crosses the snapshot channel in these types.

use serde::{Deserialize, Serialize};

/// A single wallet's holdings of the two tracked tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletHolding {
    pub address: String,
    #[serde(default)]
    pub amount_a: f64,
    #[serde(default)]
    pub amount_b: f64,
}

/// Three ordered holder lists: one per category. The unit of ingestion —
/// a snapshot always replaces the whole visualization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    #[serde(default)]
    pub token_a: Vec<WalletHolding>,
    #[serde(default)]
    pub token_b: Vec<WalletHolding>,
    #[serde(default)]
    pub shared: Vec<WalletHolding>,
}

impl HoldingsSnapshot {
    pub fn total_wallets(&self) -> usize {
        self.token_a.len() + self.token_b.len() + self.shared.len()
    }

    /// Truncates each list to its cap, keeping the existing order (the
    /// fixture lists holders largest-first, so this keeps the top N).
    pub fn capped(mut self, caps: &HolderCaps) -> Self {
        self.token_a.truncate(caps.token_a);
        self.token_b.truncate(caps.token_b);
        self.shared.truncate(caps.shared);
        self
    }
}

/// Per-category holder limits, applied by the data layer before layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderCaps {
    pub token_a: usize,
    pub token_b: usize,
    pub shared: usize,
}

impl Default for HolderCaps {
    fn default() -> Self {
        Self {
            token_a: 500,
            token_b: 500,
            shared: 100,
        }
    }
}
