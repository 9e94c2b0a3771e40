//! Properties of the layout core, exercised through the public API.

use wallet_cloud::layout::{
    generate_shell, BoundingVolume, LayoutConfig, LayoutContext, ShellConfig, WalletCategory,
};
use wallet_cloud::{HoldingsSnapshot, WalletHolding};

fn holder(address: &str, amount_a: f64, amount_b: f64) -> WalletHolding {
    WalletHolding {
        address: address.to_string(),
        amount_a,
        amount_b,
    }
}

fn context() -> LayoutContext {
    LayoutContext::new(LayoutConfig::default()).unwrap()
}

#[test]
fn single_token_a_wallet_scenario() {
    let ctx = context();
    let snapshot = HoldingsSnapshot {
        token_a: vec![holder("a1", 1_000_000.0, 0.0)],
        token_b: vec![],
        shared: vec![],
    };
    let layout = ctx.layout_all(&snapshot);

    assert_eq!(layout.token_a.points.len(), 1);
    assert!(layout.token_b.points.is_empty());
    assert!(layout.shared.points.is_empty());

    let point = &layout.token_a.points[0];
    assert_eq!(point.category, WalletCategory::TokenA);
    assert_eq!(point.total_holding, 1_000_000.0);
    assert!(point.position.x > 0.0);
}

#[test]
fn negative_amount_is_reported_as_skipped() {
    let ctx = context();
    let layout = ctx.layout(
        WalletCategory::TokenA,
        &[holder("bad", -5.0, 0.0), holder("ok", 1.0, 0.0)],
    );
    assert_eq!(layout.skipped, 1);
    assert_eq!(layout.points.len(), 1);
}

#[test]
fn empty_categories_are_a_valid_state() {
    let ctx = context();
    let layout = ctx.layout_all(&HoldingsSnapshot::default());
    assert_eq!(layout.total_points(), 0);
    assert_eq!(layout.total_skipped(), 0);
    // The bounding volume still has usable extent for the camera.
    assert!(layout.bounds.max_dimension() > 0.0);
}

#[test]
fn zero_holdings_render_at_the_size_floor() {
    let ctx = context();
    let layout = ctx.layout(WalletCategory::Shared, &[holder("z", 0.0, 0.0)]);
    assert_eq!(layout.points[0].size_basis, ctx.config().size_floor);
}

#[test]
fn token_groups_occupy_opposite_half_spaces_near_the_origin() {
    let ctx = context();
    let a = ctx.layout(WalletCategory::TokenA, &[holder("a", 1.0, 0.0)]);
    let b = ctx.layout(WalletCategory::TokenB, &[holder("b", 0.0, 1.0)]);
    assert!(a.points[0].position.x > 0.0);
    assert!(b.points[0].position.x < 0.0);
    // Mirror positions never coincide.
    assert!(a.points[0].position.distance(b.points[0].position) > 1.0);
}

#[test]
fn adversarial_indices_keep_the_mirror_groups_apart() {
    let ctx = context();
    let wallets: Vec<WalletHolding> = (0..=1000)
        .map(|i| holder(&format!("w{i}"), 1.0, 1.0))
        .collect();
    let a = ctx.layout(WalletCategory::TokenA, &wallets);
    let b = ctx.layout(WalletCategory::TokenB, &wallets);
    for index in [0usize, 1000] {
        let pa = a.points[index].position;
        let pb = b.points[index].position;
        assert!(
            pa.distance(pb) > 1.0,
            "mirror groups coincide at index {index}"
        );
    }
}

#[test]
fn full_layout_is_reproducible_for_a_fixed_seed() {
    let snapshot = HoldingsSnapshot {
        token_a: (0..40).map(|i| holder(&format!("a{i}"), i as f64 * 7.0, 0.0)).collect(),
        token_b: (0..40).map(|i| holder(&format!("b{i}"), 0.0, i as f64 * 3.0)).collect(),
        shared: (0..10).map(|i| holder(&format!("s{i}"), 5.0, 5.0)).collect(),
    };
    let first = context().layout_all(&snapshot);
    let second = context().layout_all(&snapshot);

    assert_eq!(first.bounds, second.bounds);
    for category in [
        WalletCategory::TokenA,
        WalletCategory::TokenB,
        WalletCategory::Shared,
    ] {
        let lhs = &first.category(category).points;
        let rhs = &second.category(category).points;
        assert_eq!(lhs.len(), rhs.len());
        for (p, q) in lhs.iter().zip(rhs.iter()) {
            assert_eq!(p.position, q.position);
        }
    }
}

#[test]
fn shell_generation_matches_the_spec_scenario() {
    let config = ShellConfig::default();
    let shell = generate_shell(200.0, [1.0, 1.0, 1.0], &config);

    assert_eq!(shell.len(), 200);
    let radius = config.shell_radius(200.0);
    for point in &shell {
        assert!((point.offset.length() - radius).abs() < radius * 1.0e-4);
    }

    // Nearest-neighbor distances stay bounded below: no two points meet.
    let mut min_distance = f32::MAX;
    for i in 0..shell.len() {
        for j in (i + 1)..shell.len() {
            min_distance = min_distance.min(shell[i].offset.distance(shell[j].offset));
        }
    }
    assert!(min_distance > 0.0);
    let mean_spacing = radius * (4.0 * std::f32::consts::PI / shell.len() as f32).sqrt();
    assert!(min_distance > mean_spacing * 0.2);
}

#[test]
fn shells_of_leading_parents_never_intersect() {
    // Coupled invariant between the layout engine and the shell generator:
    // at default configuration, floor-size parents in the leading stretch
    // of an outer spiral sit farther apart than two shell radii, so their
    // shells stay disjoint.
    let ctx = context();
    let config = ShellConfig::default();
    let wallets: Vec<WalletHolding> = (0..16)
        .map(|i| holder(&format!("w{i}"), 0.0, 0.0))
        .collect();
    let layout = ctx.layout(WalletCategory::TokenA, &wallets);

    let shell_reach = config.shell_radius(ctx.config().size_floor);
    let mut min_gap = f32::MAX;
    for i in 0..layout.points.len() {
        for j in (i + 1)..layout.points.len() {
            let gap = layout.points[i]
                .position
                .distance(layout.points[j].position);
            min_gap = min_gap.min(gap);
        }
    }
    assert!(
        min_gap > 2.0 * shell_reach,
        "adjacent shells would intersect: min parent gap {min_gap}, shell reach {shell_reach}"
    );
}

#[test]
fn bounding_volume_covers_the_outermost_wallets() {
    let ctx = context();
    let snapshot = HoldingsSnapshot {
        token_a: (0..100).map(|i| holder(&format!("a{i}"), 1.0, 0.0)).collect(),
        token_b: (0..100).map(|i| holder(&format!("b{i}"), 0.0, 1.0)).collect(),
        shared: vec![holder("s", 1.0, 1.0)],
    };
    let layout = ctx.layout_all(&snapshot);
    let bounds = layout.bounds;

    let half = bounds.size / 2.0;
    for point in layout
        .token_a
        .points
        .iter()
        .chain(&layout.token_b.points)
        .chain(&layout.shared.points)
    {
        let delta = (point.position - bounds.center).abs();
        assert!(delta.x <= half.x + 1.0e-3);
        assert!(delta.y <= half.y + 1.0e-3);
        assert!(delta.z <= half.z + 1.0e-3);
    }

    // Independent reduction over the same points agrees.
    let recomputed = BoundingVolume::from_points(
        layout
            .token_a
            .points
            .iter()
            .chain(&layout.token_b.points)
            .chain(&layout.shared.points)
            .map(|p| p.position),
    );
    assert_eq!(recomputed, bounds);
}
