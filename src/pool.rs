//! Bounded scoped worker pool.
//!
//! Workers pull item indices from a shared counter and send `(index, result)`
//! back; results are reassembled in input order after every worker has
//! joined. Each call owns its workers, so a task may itself call
//! `run_bounded` without competing for the outer budget.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

pub fn run_bounded<I, R, F>(threads: usize, items: Vec<I>, f: F) -> Vec<R>
where
    I: Send,
    R: Send,
    F: Fn(usize, I) -> R + Sync,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = threads.clamp(1, total);

    if workers == 1 {
        return items
            .into_iter()
            .enumerate()
            .map(|(i, item)| f(i, item))
            .collect();
    }

    let slots: Vec<Mutex<Option<I>>> = items.into_iter().map(|i| Mutex::new(Some(i))).collect();
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, R)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (slots, next, f) = (&slots, &next, &f);
            scope.spawn(move || {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= total {
                        break;
                    }
                    let item = slots[index]
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .take();
                    if let Some(item) = item {
                        // The receiver outlives the scope.
                        let _ = tx.send((index, f(index, item)));
                    }
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<Option<R>> = (0..total).map(|_| None).collect();
    for (index, result) in rx {
        results[index] = Some(result);
    }
    results.into_iter().flatten().collect()
}

#[cfg(test)]
#[path = "tests/pool_tests.rs"]
mod tests;
