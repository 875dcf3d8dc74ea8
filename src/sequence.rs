//! Lazily evaluated sequences
//!
//! [`LazySequence`] produces its elements on demand by calling a producer
//! closure. Nothing is computed ahead of consumption, so a search such as
//! [`LazySequence::find`] stops calling the producer at the first match.

use std::iter::FusedIterator;

/// An unbounded sequence whose elements come from repeated producer calls
pub struct LazySequence<P> {
    producer: P,
    produced: usize,
}

impl<T, P> LazySequence<P>
where
    P: FnMut() -> T,
{
    /// Build a sequence that invokes `producer` once per consumed element
    pub fn continually(producer: P) -> Self {
        Self {
            producer,
            produced: 0,
        }
    }

    /// Number of elements produced so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Advance until `predicate` holds and return that element
    ///
    /// The producer runs exactly once per position up to and including the
    /// match. On an unbounded sequence with no matching element this never
    /// returns.
    #[allow(clippy::should_implement_trait)]
    pub fn find(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        loop {
            let element = self.next()?;
            if predicate(&element) {
                return Some(element);
            }
        }
    }
}

impl<T, P> Iterator for LazySequence<P>
where
    P: FnMut() -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.produced += 1;
        Some((self.producer)())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T, P> FusedIterator for LazySequence<P> where P: FnMut() -> T {}

impl<P> std::fmt::Debug for LazySequence<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySequence")
            .field("produced", &self.produced)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Processed {
        id: u32,
        successful: bool,
    }

    fn fixtures() -> Vec<Processed> {
        [true, true, false, false, true, true]
            .iter()
            .zip(1..)
            .map(|(&successful, id)| Processed { id, successful })
            .collect()
    }

    #[test]
    fn test_find_stops_at_first_match() {
        let calls = Cell::new(0usize);
        let results = fixtures();
        let mut sequence = LazySequence::continually(|| {
            let next = results[calls.get()];
            calls.set(calls.get() + 1);
            next
        });

        let found = sequence.find(|r| !r.successful);

        assert_eq!(found.map(|r| r.id), Some(3));
        assert_eq!(calls.get(), 3);
        assert_eq!(sequence.produced(), 3);
    }

    #[test]
    fn test_nothing_produced_before_consumption() {
        let calls = Cell::new(0);
        let sequence = LazySequence::continually(|| calls.set(calls.get() + 1));
        assert_eq!(sequence.produced(), 0);
        drop(sequence);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_find_matching_first_element() {
        let mut n = 0;
        let mut sequence = LazySequence::continually(|| {
            n += 1;
            n
        });
        assert_eq!(sequence.find(|_| true), Some(1));
        assert_eq!(sequence.produced(), 1);
    }

    #[test]
    fn test_find_resumes_after_previous_match() {
        let mut n = 0;
        let mut sequence = LazySequence::continually(|| {
            n += 1;
            n
        });
        assert_eq!(sequence.find(|v| v % 2 == 0), Some(2));
        assert_eq!(sequence.find(|v| v % 2 == 0), Some(4));
        assert_eq!(sequence.produced(), 4);
    }

    #[test]
    fn test_take_while_is_lazy() {
        let calls = Cell::new(0usize);
        let results = fixtures();
        let taken: Vec<_> = LazySequence::continually(|| {
            let next = results[calls.get()];
            calls.set(calls.get() + 1);
            next
        })
        .take_while(|r| r.successful)
        .collect();

        assert_eq!(taken.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        // the first failing element is produced to end the run, nothing after it
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_skip_while_then_take_is_lazy() {
        let calls = Cell::new(0usize);
        let results = fixtures();
        let first_failure = LazySequence::continually(|| {
            let next = results[calls.get()];
            calls.set(calls.get() + 1);
            next
        })
        .skip_while(|r| r.successful)
        .next();

        assert_eq!(first_failure.map(|r| r.id), Some(3));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_size_hint_is_unbounded() {
        let sequence = LazySequence::continually(|| 0);
        assert_eq!(sequence.size_hint(), (usize::MAX, None));
    }
}
