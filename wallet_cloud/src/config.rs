//! Env parsing and runtime configuration.

use std::path::PathBuf;

use bevy::prelude::Resource;

use crate::data::{HolderCaps, SourceConfig};

const FIXTURE_ENV: &str = "HOLDERS_FIXTURE";
const DEFAULT_FIXTURE: &str = "fixtures/holders.sample.json";

const CAP_ENV_VARS: &[(&str, CapField)] = &[
    ("HOLDER_CAP_A", CapField::TokenA),
    ("HOLDER_CAP_B", CapField::TokenB),
    ("HOLDER_CAP_SHARED", CapField::Shared),
];

const SEED_ENV: &str = "LAYOUT_SEED";
const SYMBOL_A_ENV: &str = "TOKEN_A_SYMBOL";
const SYMBOL_B_ENV: &str = "TOKEN_B_SYMBOL";

#[derive(Clone, Copy)]
enum CapField {
    TokenA,
    TokenB,
    Shared,
}

/// Display symbols for the two tracked tokens, shown on the HUD and in the
/// wallet tooltip.
#[derive(Resource, Clone, Debug)]
pub struct TokenSymbols {
    pub token_a: String,
    pub token_b: String,
}

impl Default for TokenSymbols {
    fn default() -> Self {
        Self {
            token_a: "FART".to_string(),
            token_b: "GOAT".to_string(),
        }
    }
}

/// Returns the holdings source configuration from the environment: fixture
/// path plus per-category caps. Malformed cap values fail fast.
pub fn source_config() -> SourceConfig {
    let fixture_path = std::env::var(FIXTURE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FIXTURE));

    let mut caps = HolderCaps::default();
    for &(env_var, field) in CAP_ENV_VARS {
        if let Ok(raw) = std::env::var(env_var) {
            let value = raw.parse::<usize>().unwrap_or_else(|err| {
                panic!("orrery: invalid {env_var} {raw:?}: {err}");
            });
            match field {
                CapField::TokenA => caps.token_a = value,
                CapField::TokenB => caps.token_b = value,
                CapField::Shared => caps.shared = value,
            }
        }
    }

    SourceConfig { fixture_path, caps }
}

/// Jitter seed for the layout context. Defaults to 0 so two runs over the
/// same fixture produce the same constellation.
pub fn layout_seed() -> u64 {
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw.parse::<u64>().unwrap_or_else(|err| {
            panic!("orrery: invalid {SEED_ENV} {raw:?}: {err}");
        }),
        Err(_) => 0,
    }
}

/// Token display symbols from the environment, with the product defaults.
pub fn token_symbols() -> TokenSymbols {
    let defaults = TokenSymbols::default();
    TokenSymbols {
        token_a: std::env::var(SYMBOL_A_ENV).unwrap_or(defaults.token_a),
        token_b: std::env::var(SYMBOL_B_ENV).unwrap_or(defaults.token_b),
    }
}
