use rstest::rstest;
use serial_test::serial;

use anemone_core::common_tests::concurrent_set_core_tests::*;
use anemone_core::common_tests::concurrent_set_stress_tests::*;
use anemone_core::data_structures::{ConcurrentSet, SortedSet};
use anemone_crossbeam::EpochGuard;

// Type alias for cleaner test code
type EpochSortedSet = SortedSet<i32, EpochGuard>;

// ============================================================================
// Functional battery
// ============================================================================

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_basic<C: ConcurrentSet<i32>>(#[case] set: C) {
    test_basic_operations(&set);
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_scenario<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_empty_to_nonempty_scenario::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_idempotent_remove<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_idempotent_removal::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_reinsert<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_reinsert_after_remove::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_order<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_sorted_order::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_sequential<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_sequential_operations::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_len<C: ConcurrentSet<i32>>(#[case] set: C) {
    test_len_operations(&set);
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_empty<C: ConcurrentSet<i32> + Default>(#[case] _set: C) {
    test_is_empty::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_concurrent<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(#[case] _set: C) {
    test_concurrent_add::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn test_contention<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(#[case] _set: C) {
    test_high_contention::<C>();
}

// ============================================================================
// Stress battery
// ============================================================================

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_contains_during_modifications<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_contains_during_modifications::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_memory_ordering<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_memory_ordering::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_concurrent_remove_same_value<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_concurrent_remove_same_value::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_concurrent_add_same_value<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_concurrent_add_same_value::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_linearizability<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_linearizability::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_progress_guarantee<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_progress_guarantee::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_extreme_contention_single_key<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_extreme_contention_single_key::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_rapid_reinsertion<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_rapid_reinsertion::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_concurrent_mixed<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_concurrent_mixed_operations::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_final_state_consistency<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_final_state_consistency::<C>();
}

#[rstest]
#[serial]
#[case::sorted_set(EpochSortedSet::default())]
fn stress_order_invariant_after_settle<C: ConcurrentSet<i32> + Default + Send + Sync + 'static>(
    #[case] _set: C,
) {
    test_order_invariant_after_settle::<C>();
}
