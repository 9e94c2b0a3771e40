//! Orrery — token holder space. Runs the wallet_cloud app.

use bevy::prelude::*;
use wallet_cloud::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();

    WalletCloudBuilder::new()
        .from_env()
        .window_title("Orrery")
        .clear_color(Color::srgb(0.0, 0.031, 0.082))
        .build()
        .run();
}
