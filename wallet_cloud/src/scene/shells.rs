//! Shell cluster component and orbit animation.

use bevy::prelude::*;

use crate::layout::{Jitter, WalletCategory};

// Jitter streams for the decorative cluster motion. Keys fold the category
// tag in so clusters with the same slot still move differently.
const STREAM_AXIS_X: u64 = 32;
const STREAM_AXIS_Y: u64 = 33;
const STREAM_AXIS_Z: u64 = 34;
const STREAM_SPIN: u64 = 35;

/// Root of one drill-down shell. Children carry the shell spheres; the
/// whole group rotates around a fixed per-cluster axis.
#[derive(Component)]
pub struct ShellCluster {
    pub category: WalletCategory,
    pub slot: usize,
    pub axis: Dir3,
    /// Radians per second around `axis`.
    pub spin: f32,
}

impl ShellCluster {
    /// Axis and spin are derived from the jitter source, so a regenerated
    /// cloud animates exactly like the one it replaced.
    pub fn seeded(
        category: WalletCategory,
        slot: usize,
        jitter: &Jitter,
        min_spin: f32,
        spin_span: f32,
    ) -> Self {
        let key = (category.stream_tag() << 40) | slot as u64;
        let raw_axis = Vec3::new(
            jitter.unit(STREAM_AXIS_X, key) - 0.5,
            jitter.unit(STREAM_AXIS_Y, key) - 0.5,
            jitter.unit(STREAM_AXIS_Z, key) - 0.5,
        );
        let axis = Dir3::new(raw_axis).unwrap_or(Dir3::Y);
        let spin = min_spin + jitter.unit(STREAM_SPIN, key) * spin_span;
        Self {
            category,
            slot,
            axis,
            spin,
        }
    }
}

/// Slow orbital rotation of every shell cluster, plus a gentle roll.
pub fn animate_shells(time: Res<Time>, mut clusters: Query<(&ShellCluster, &mut Transform)>) {
    let dt = time.delta_secs();
    for (cluster, mut tf) in &mut clusters {
        tf.rotate_axis(cluster.axis, cluster.spin * dt);
        tf.rotate_local_z(0.1 * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_clusters_are_deterministic() {
        let jitter = Jitter::new(11);
        let a = ShellCluster::seeded(WalletCategory::TokenA, 7, &jitter, 0.05, 0.10);
        let b = ShellCluster::seeded(WalletCategory::TokenA, 7, &jitter, 0.05, 0.10);
        assert_eq!(a.axis, b.axis);
        assert_eq!(a.spin, b.spin);
    }

    #[test]
    fn spin_stays_in_the_configured_band() {
        let jitter = Jitter::new(3);
        for slot in 0..200 {
            let cluster = ShellCluster::seeded(WalletCategory::Shared, slot, &jitter, 0.05, 0.10);
            assert!((0.05..=0.15).contains(&cluster.spin));
        }
    }

    #[test]
    fn categories_get_distinct_axes() {
        let jitter = Jitter::new(5);
        let a = ShellCluster::seeded(WalletCategory::TokenA, 0, &jitter, 0.05, 0.10);
        let b = ShellCluster::seeded(WalletCategory::TokenB, 0, &jitter, 0.05, 0.10);
        assert_ne!(a.axis, b.axis);
    }
}
