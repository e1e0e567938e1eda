//! Generation gate integration tests.
//!
//! Tests verify:
//! - Decisions for named sizes, including unknown names
//! - Rejected sizes fail before any resampling
//! - Kernel parameters follow the size's filter
//! - Generated thumbnails have the expected dimensions

use thumbgate::size::{COLORS, FIT_1920, FIT_2048, FIT_4096, LEFT_224, TILE_224, TILE_500};
use thumbgate::{DenyReason, ResampleFilter, ThumbError, Tier};

use super::test_utils::{
    create_gate, create_gate_with_filter, create_test_image, relaxed_thresholds,
    strict_thresholds,
};

// =============================================================================
// Decisions
// =============================================================================

#[test]
fn test_can_generate_reference_sizes() {
    let gate = create_gate(strict_thresholds());

    let rejected = gate.can_generate_named(FIT_4096).unwrap();
    assert!(!rejected.is_allowed());
    assert_eq!(rejected.reason(), Some(DenyReason::ResourceLimitExceeded));

    let on_demand = gate.can_generate_named(FIT_2048).unwrap();
    assert!(on_demand.is_allowed());
    assert!(!on_demand.should_persist());
    assert_eq!(on_demand.tier, Tier::OnDemand);

    let precached = gate.can_generate_named(TILE_500).unwrap();
    assert!(precached.is_allowed());
    assert!(precached.should_persist());
}

#[test]
fn test_unknown_size() {
    let gate = create_gate(strict_thresholds());

    match gate.can_generate_named("tile_42") {
        Err(ThumbError::UnknownSize(name)) => assert_eq!(name, "tile_42"),
        other => panic!("Expected UnknownSize, got {:?}", other),
    }
}

#[test]
fn test_decision_follows_policy_update() {
    let gate = create_gate(strict_thresholds());
    assert_eq!(gate.can_generate_named(FIT_2048).unwrap().tier, Tier::OnDemand);

    gate.policy().update(relaxed_thresholds());
    assert_eq!(gate.can_generate_named(FIT_2048).unwrap().tier, Tier::Precached);
}

#[test]
fn test_clones_share_policy() {
    let gate = create_gate(strict_thresholds());
    let clone = gate.clone();

    clone.policy().update(relaxed_thresholds());
    assert_eq!(gate.policy().thresholds(), relaxed_thresholds());
}

// =============================================================================
// Resample Parameters
// =============================================================================

#[test]
fn test_resample_params_by_filter() {
    for (filter, support) in [
        (ResampleFilter::Blackman, 3.0),
        (ResampleFilter::Cubic, 2.0),
        (ResampleFilter::Linear, 1.0),
    ] {
        let gate = create_gate_with_filter(strict_thresholds(), filter);
        let size = gate.catalog().get(FIT_1920).unwrap();
        let kernel = gate.resample_params(size);

        assert_eq!(kernel.filter, filter);
        assert_eq!(kernel.support, support);
    }
}

#[test]
fn test_colors_always_nearest() {
    let gate = create_gate_with_filter(strict_thresholds(), ResampleFilter::Blackman);
    let colors = gate.catalog().get(COLORS).unwrap();
    assert_eq!(gate.resample_params(colors).support, 0.0);
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_rejected_fails_fast() {
    let gate = create_gate(strict_thresholds());
    let img = create_test_image(64, 64);

    match gate.generate_named(&img, FIT_4096) {
        Err(ThumbError::ResourceLimitExceeded {
            name,
            footprint,
            limit,
        }) => {
            assert_eq!(name, FIT_4096);
            assert_eq!(footprint, 4096 * 4096);
            assert_eq!(limit, 2048 * 2048);
        }
        other => panic!("Expected ResourceLimitExceeded, got {:?}", other.map(|t| t.tier)),
    }
}

#[test]
fn test_generate_on_demand_is_not_persisted() {
    let gate = create_gate(strict_thresholds());
    let img = create_test_image(2200, 1650);

    let thumb = gate.generate_named(&img, FIT_2048).unwrap();
    assert_eq!(thumb.tier, Tier::OnDemand);
    assert!(!thumb.should_persist());
    assert_eq!((thumb.image.width(), thumb.image.height()), (2048, 1536));
}

#[test]
fn test_generate_crop_sizes() {
    let gate = create_gate(strict_thresholds());
    let img = create_test_image(900, 600);

    for name in [TILE_224, LEFT_224, COLORS] {
        let size = gate.catalog().get(name).unwrap();
        let thumb = gate.generate(&img, size).unwrap();

        assert_eq!(thumb.size, name);
        assert_eq!(thumb.tier, Tier::Precached);
        assert_eq!(
            (thumb.image.width(), thumb.image.height()),
            (size.width, size.height)
        );
    }
}

#[test]
fn test_precache_sizes() {
    let gate = create_gate(strict_thresholds());

    let names: Vec<&str> = gate
        .precache_sizes()
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();

    assert!(names.contains(&TILE_500));
    assert!(!names.contains(&FIT_2048));
    assert!(!names.contains(&FIT_4096));
    for size in gate.precache_sizes() {
        assert!(gate.can_generate(size).should_persist());
    }
}
