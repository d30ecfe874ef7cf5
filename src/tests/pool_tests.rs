use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;

#[test]
fn empty_input_spawns_nothing() {
    let out: Vec<u32> = run_bounded(8, Vec::<u32>::new(), |_, x| x);
    assert!(out.is_empty());
}

#[test]
fn results_follow_input_order() {
    let items: Vec<u64> = (0..50).collect();
    let out = run_bounded(7, items, |_, x| {
        // Later items finish first.
        std::thread::sleep(Duration::from_millis(50 - x));
        x * 2
    });
    assert_eq!(out, (0..50).map(|x| x * 2).collect::<Vec<_>>());
}

#[test]
fn never_exceeds_thread_budget() {
    let active = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);
    run_bounded(3, (0..20).collect::<Vec<_>>(), |_, _x: i32| {
        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(5));
        active.fetch_sub(1, Ordering::SeqCst);
    });
    assert!(peak.load(Ordering::SeqCst) <= 3);
}

#[test]
fn nested_pools_do_not_deadlock() {
    let outer: Vec<usize> = (0..4).collect();
    let sums = run_bounded(2, outer, |_, ch| {
        let inner: Vec<usize> = (0..10).collect();
        run_bounded(3, inner, |_, c| ch * 100 + c).into_iter().sum::<usize>()
    });
    assert_eq!(sums, vec![45, 1045, 2045, 3045]);
}

#[test]
fn zero_threads_still_runs_sequentially() {
    let out = run_bounded(0, vec![1, 2, 3], |i, x| (i, x));
    assert_eq!(out, vec![(0, 1), (1, 2), (2, 3)]);
}
