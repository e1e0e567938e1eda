//! Limit policy integration tests.
//!
//! Tests verify:
//! - Reference classifications for fit_4096, fit_2048 and tile_500
//! - Default limits compare pixel area, not individual edges
//! - Reconfiguration takes effect without rebuilding anything
//! - Tiers partition the footprint axis and are monotonic
//! - Concurrent readers never observe a half-updated limit pair

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use thumbgate::size::{FIT_2048, FIT_2560, FIT_3840, FIT_4096, TILE_500};
use thumbgate::{LimitPolicy, LimitThresholds, ResampleFilter, Size, SizeCatalog, Tier};

use super::test_utils::{relaxed_thresholds, strict_thresholds};

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_size_exceeds_limit() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let t = strict_thresholds();

    assert!(t.exceeds_limit(catalog.get(FIT_4096).unwrap()));
    assert!(!t.exceeds_limit(catalog.get(FIT_2048).unwrap()));
    assert!(!t.exceeds_limit(catalog.get(TILE_500).unwrap()));
}

#[test]
fn test_size_uncached() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let t = strict_thresholds();

    assert!(t.uncached(catalog.get(FIT_4096).unwrap()));
    assert!(t.uncached(catalog.get(FIT_2048).unwrap()));
    assert!(!t.uncached(catalog.get(TILE_500).unwrap()));
}

#[test]
fn test_reference_tiers() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let policy = LimitPolicy::new(strict_thresholds());

    // Exceeds both limits, but rejection wins
    assert_eq!(policy.classify(catalog.get(FIT_4096).unwrap()), Tier::Rejected);
    assert_eq!(policy.classify(catalog.get(FIT_2048).unwrap()), Tier::OnDemand);
    assert_eq!(policy.classify(catalog.get(TILE_500).unwrap()), Tier::Precached);
}

#[test]
fn test_reconfiguration_without_restart() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let policy = LimitPolicy::new(strict_thresholds());
    let fit_2048 = catalog.get(FIT_2048).unwrap();

    assert_eq!(policy.classify(fit_2048), Tier::OnDemand);

    let previous = policy.update(relaxed_thresholds());
    assert_eq!(policy.classify(fit_2048), Tier::Precached);
    assert_eq!(policy.classify(catalog.get(FIT_4096).unwrap()), Tier::OnDemand);

    policy.update(previous);
    assert_eq!(policy.classify(fit_2048), Tier::OnDemand);
}

#[test]
fn test_default_limits_compare_area_not_edges() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let policy = LimitPolicy::default();
    let fit_2560 = catalog.get(FIT_2560).unwrap();

    // 2560 px wide, but 2560 x 1600 = 4,096,000 <= 2048 x 2048 = 4,194,304
    assert!(fit_2560.width > policy.thresholds().precached_limit());
    assert!(fit_2560.footprint() <= policy.thresholds().precached_footprint());
    assert_eq!(policy.classify(fit_2560), Tier::Precached);

    assert_eq!(policy.classify(catalog.get(FIT_3840).unwrap()), Tier::OnDemand);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_every_size_has_exactly_one_tier() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);

    for t in [strict_thresholds(), relaxed_thresholds()] {
        for size in &catalog {
            let tier = t.classify(size);
            let expected = match (t.uncached(size), t.exceeds_limit(size)) {
                (_, true) => Tier::Rejected,
                (true, false) => Tier::OnDemand,
                (false, false) => Tier::Precached,
            };
            assert_eq!(tier, expected, "{}", size.name);
        }
    }
}

#[test]
fn test_partition_has_no_gap_at_boundaries() {
    let t = strict_thresholds();
    let precached = t.precached_footprint();
    let uncached = t.uncached_footprint();

    // Footprints 1 x n make every integer on the axis reachable
    let line = |n: u64| Size::new("line", 1, n as u32);

    assert_eq!(t.classify(&line(precached)), Tier::Precached);
    assert_eq!(t.classify(&line(precached + 1)), Tier::OnDemand);
    assert_eq!(t.classify(&line(uncached)), Tier::OnDemand);
    assert_eq!(t.classify(&line(uncached + 1)), Tier::Rejected);
}

#[test]
fn test_monotonicity() {
    let t = strict_thresholds();
    let mut sizes: Vec<Size> = (1..=64u32)
        .map(|i| Size::new(format!("s{i}"), i * 64, i * 48))
        .collect();
    sizes.sort_by_key(|s| s.footprint());

    for pair in sizes.windows(2) {
        assert!(
            t.classify(&pair[0]) <= t.classify(&pair[1]),
            "{} ({}) vs {} ({})",
            pair[0].name,
            pair[0].footprint(),
            pair[1].name,
            pair[1].footprint()
        );
    }
}

#[test]
fn test_idempotence() {
    let catalog = SizeCatalog::builtin(ResampleFilter::Lanczos);
    let policy = LimitPolicy::new(strict_thresholds());

    for size in &catalog {
        let first = policy.classify(size);
        for _ in 0..10 {
            assert_eq!(policy.classify(size), first);
        }
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_no_torn_reads_under_concurrent_updates() {
    let a = LimitThresholds::new(720, 1024).unwrap();
    let b = LimitThresholds::new(4096, 7680).unwrap();
    let policy = LimitPolicy::new(a);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = policy.thresholds();
                    assert!(snapshot == a || snapshot == b, "torn read: {:?}", snapshot);
                }
            });
        }

        for i in 0..10_000 {
            policy.update(if i % 2 == 0 { b } else { a });
        }
        done.store(true, Ordering::Relaxed);
    });
}

#[test]
fn test_policy_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LimitPolicy>();
}
