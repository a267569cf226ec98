use std::fmt;

use once_cell::race::OnceBox;

/// A slot that is realized at most once and then shared.
///
/// Realization is lock-free: on a miss every racing thread builds its own
/// candidate and tries a single atomic compare-and-publish. One candidate
/// wins; the others are dropped and their threads return the winner.
/// Readers only ever see a fully built value.
pub struct ChildCell<T> {
    inner: OnceBox<T>,
}

impl<T> ChildCell<T> {
    pub const fn new() -> Self {
        Self {
            inner: OnceBox::new(),
        }
    }

    /// The published value, if any.
    pub fn get(&self) -> Option<&T> {
        self.inner.get()
    }

    /// Returns the published value, building and publishing one with
    /// `realize` if the cell is still empty.
    ///
    /// `realize` may run on several threads at once; only one result is kept.
    pub fn get_or_realize(&self, realize: impl FnOnce() -> T) -> &T {
        self.inner.get_or_init(|| Box::new(realize()))
    }

    pub fn is_realized(&self) -> bool {
        self.get().is_some()
    }
}

impl<T> Default for ChildCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ChildCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("ChildCell").field(value).finish(),
            None => f.write_str("ChildCell(<unrealized>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;

    #[test]
    fn realizes_once_sequentially() {
        let cell = ChildCell::new();
        assert!(!cell.is_realized());
        assert_eq!(*cell.get_or_realize(|| 1), 1);
        assert_eq!(*cell.get_or_realize(|| 2), 1);
        assert_eq!(cell.get(), Some(&1));
    }

    #[test]
    fn racing_threads_adopt_a_single_winner() {
        const THREADS: usize = 8;

        let cell: ChildCell<Arc<usize>> = ChildCell::new();
        let built = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let (cell_ref, built_ref, barrier_ref) = (&cell, &built, &barrier);
        let observed: Vec<Arc<usize>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|id| {
                    scope.spawn(move || {
                        let (cell, built, barrier) = (cell_ref, built_ref, barrier_ref);
                        barrier.wait();
                        cell.get_or_realize(|| {
                            built.fetch_add(1, Ordering::SeqCst);
                            Arc::new(id)
                        })
                        .clone()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("realizing thread panicked"))
                .collect()
        });

        let winner = cell.get().expect("published");
        assert!(built.load(Ordering::SeqCst) >= 1);
        for value in &observed {
            assert!(Arc::ptr_eq(value, winner));
        }
        // Losing candidates were dropped, so only the cell and `observed`
        // hold the winner.
        assert_eq!(Arc::strong_count(winner), THREADS + 1);
    }
}
