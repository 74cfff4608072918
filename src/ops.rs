//! Lazy operator adapters over a pull source.
//!
//! Each adapter wraps its upstream iterator and pulls from it only what a
//! downstream request requires. Constructing an adapter performs no
//! upstream pulls. The stateful adapters ([`Sorted`], [`SortedBy`],
//! [`Distinct`]) are the exception to the per-request discipline: their
//! semantics require observing earlier (or all) upstream elements before
//! an output can be produced.

use std::cmp::Ordering;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::vec;

use rustc_hash::FxHashSet;

use crate::lookahead::Lookahead;

/// Keeps elements matching a predicate.
///
/// A single downstream pull may consume several upstream elements before
/// one matches.
pub struct Filter<I, F> {
    iter: I,
    predicate: F,
}

impl<I, F> Filter<I, F> {
    pub fn new(iter: I, predicate: F) -> Self {
        Self { iter, predicate }
    }
}

impl<I, F> Iterator for Filter<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let value = self.iter.next()?;
            if (self.predicate)(&value) {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, F> FusedIterator for Filter<I, F>
where
    I: FusedIterator,
    F: FnMut(&I::Item) -> bool,
{
}

/// Transforms each element one to one.
pub struct Map<I, F> {
    iter: I,
    mapper: F,
}

impl<I, F> Map<I, F> {
    pub fn new(iter: I, mapper: F) -> Self {
        Self { iter, mapper }
    }
}

impl<I, F, B> Iterator for Map<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> B,
{
    type Item = B;

    #[inline]
    fn next(&mut self) -> Option<B> {
        self.iter.next().map(&mut self.mapper)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F, B> FusedIterator for Map<I, F>
where
    I: FusedIterator,
    F: FnMut(I::Item) -> B,
{
}

/// Passes elements through unchanged, invoking an action on each one.
///
/// The action fires exactly once per element, at the moment the element
/// is pulled downstream.
pub struct Inspect<I, F> {
    iter: I,
    action: F,
}

impl<I, F> Inspect<I, F> {
    pub fn new(iter: I, action: F) -> Self {
        Self { iter, action }
    }
}

impl<I, F> Iterator for Inspect<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let value = self.iter.next()?;
        (self.action)(&value);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Replaces each outer element with the elements of a derived sub-source.
///
/// Keeps a current-inner slot: when the inner source runs out, the outer
/// source is advanced and a new inner derived from it. Empty inner
/// sources are skipped without emitting anything.
pub struct FlatMap<I, F, P: IntoIterator> {
    outer: I,
    mapper: F,
    inner: Option<P::IntoIter>,
}

impl<I, F, P: IntoIterator> FlatMap<I, F, P> {
    pub fn new(outer: I, mapper: F) -> Self {
        Self {
            outer,
            mapper,
            inner: None,
        }
    }
}

impl<I, F, P> Iterator for FlatMap<I, F, P>
where
    I: Iterator,
    P: IntoIterator,
    F: FnMut(I::Item) -> P,
{
    type Item = P::Item;

    fn next(&mut self) -> Option<P::Item> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(value) = inner.next() {
                    return Some(value);
                }
                self.inner = None;
            }
            let outer = self.outer.next()?;
            self.inner = Some((self.mapper)(outer).into_iter());
        }
    }
}

/// Emits every `step`-th element, starting from the first.
///
/// Each downstream pull consumes up to `step` upstream elements: the one
/// emitted plus the `step - 1` discarded behind it (fewer at the tail).
pub struct Sample<I> {
    iter: I,
    step: usize,
}

impl<I> Sample<I> {
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(iter: I, step: usize) -> Self {
        assert!(step > 0, "sample step must be positive");
        Self { iter, step }
    }
}

impl<I: Iterator> Iterator for Sample<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let value = self.iter.next()?;
        for _ in 1..self.step {
            if self.iter.next().is_none() {
                break;
            }
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        (
            lower.div_ceil(self.step),
            upper.map(|upper| upper.div_ceil(self.step)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for Sample<I> {}

/// Emits elements until the predicate first fails, then stays exhausted.
///
/// Each candidate is examined through a lookahead before being exposed,
/// so the first failing element is never emitted, even when later
/// elements would pass the predicate again.
pub struct TakeWhile<I: Iterator, F> {
    iter: Lookahead<I>,
    predicate: F,
    done: bool,
}

impl<I: Iterator, F> TakeWhile<I, F> {
    pub fn new(iter: I, predicate: F) -> Self {
        Self {
            iter: Lookahead::new(iter),
            predicate,
            done: false,
        }
    }
}

impl<I, F> Iterator for TakeWhile<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        match self.iter.peek() {
            Some(value) if (self.predicate)(value) => {}
            _ => {
                self.done = true;
                return None;
            }
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        (0, self.iter.size_hint().1)
    }
}

impl<I, F> FusedIterator for TakeWhile<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> bool,
{
}

/// Discards the leading run of elements matching the predicate, then
/// passes everything through.
///
/// The discarding happens once, on the first downstream pull. The first
/// failing element is observed through a lookahead and not consumed by
/// the initialization, so it becomes the first emitted element.
pub struct DropWhile<I: Iterator, F> {
    iter: Lookahead<I>,
    predicate: F,
    primed: bool,
}

impl<I: Iterator, F> DropWhile<I, F> {
    pub fn new(iter: I, predicate: F) -> Self {
        Self {
            iter: Lookahead::new(iter),
            predicate,
            primed: false,
        }
    }
}

impl<I, F> Iterator for DropWhile<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.primed {
            self.primed = true;
            loop {
                match self.iter.peek() {
                    Some(value) if (self.predicate)(value) => {}
                    _ => break,
                }
                self.iter.next();
            }
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        if self.primed {
            (lower, upper)
        } else {
            (0, upper)
        }
    }
}

/// Caps the number of elements emitted.
///
/// Once the cap is reached the upstream is never pulled again.
pub struct Limit<I> {
    iter: I,
    remaining: usize,
}

impl<I> Limit<I> {
    pub fn new(iter: I, max_size: usize) -> Self {
        Self {
            iter,
            remaining: max_size,
        }
    }
}

impl<I: Iterator> Iterator for Limit<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let upper = upper.map_or(self.remaining, |upper| upper.min(self.remaining));
        (lower.min(self.remaining), Some(upper))
    }
}

/// Discards a fixed-length prefix, then passes everything through.
///
/// The prefix is discarded eagerly on the first downstream pull, with an
/// early exit if the upstream exhausts first.
pub struct Skip<I> {
    iter: I,
    to_skip: usize,
    skipped: bool,
}

impl<I> Skip<I> {
    pub fn new(iter: I, n: usize) -> Self {
        Self {
            iter,
            to_skip: n,
            skipped: false,
        }
    }
}

impl<I: Iterator> Iterator for Skip<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.skipped {
            self.skipped = true;
            for _ in 0..self.to_skip {
                self.iter.next()?;
            }
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        if self.skipped {
            return (lower, upper);
        }
        (
            lower.saturating_sub(self.to_skip),
            upper.map(|upper| upper.saturating_sub(self.to_skip)),
        )
    }
}

/// Buffers the entire upstream, sorts it ascending, then serves the
/// sorted run.
///
/// The first downstream pull drains the upstream completely.
pub struct Sorted<I: Iterator> {
    pending: Option<I>,
    sorted: vec::IntoIter<I::Item>,
}

impl<I: Iterator> Sorted<I> {
    pub fn new(iter: I) -> Self {
        Self {
            pending: Some(iter),
            sorted: Vec::new().into_iter(),
        }
    }
}

impl<I> Iterator for Sorted<I>
where
    I: Iterator,
    I::Item: Ord,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(iter) = self.pending.take() {
            let mut buffer: Vec<I::Item> = iter.collect();
            buffer.sort_unstable();
            self.sorted = buffer.into_iter();
        }
        self.sorted.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Some(iter) => iter.size_hint(),
            None => self.sorted.size_hint(),
        }
    }
}

/// Like [`Sorted`], with a caller-supplied comparator.
///
/// Uses a stable sort: a comparator may induce ties whose relative order
/// is observable.
pub struct SortedBy<I: Iterator, F> {
    pending: Option<I>,
    comparator: F,
    sorted: vec::IntoIter<I::Item>,
}

impl<I: Iterator, F> SortedBy<I, F> {
    pub fn new(iter: I, comparator: F) -> Self {
        Self {
            pending: Some(iter),
            comparator,
            sorted: Vec::new().into_iter(),
        }
    }
}

impl<I, F> Iterator for SortedBy<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(iter) = self.pending.take() {
            let mut buffer: Vec<I::Item> = iter.collect();
            buffer.sort_by(|a, b| (self.comparator)(a, b));
            self.sorted = buffer.into_iter();
        }
        self.sorted.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Some(iter) => iter.size_hint(),
            None => self.sorted.size_hint(),
        }
    }
}

/// Drops elements equal to one already seen, keeping first occurrences.
///
/// Runs lazily in encounter order, so the output order is the order of
/// first occurrence; the seen-set grows with the number of distinct
/// elements observed.
pub struct Distinct<I: Iterator> {
    iter: I,
    seen: FxHashSet<I::Item>,
}

impl<I: Iterator> Distinct<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            seen: FxHashSet::default(),
        }
    }
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let value = self.iter.next()?;
            if self.seen.insert(value.clone()) {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_pulls_until_match() {
        let values: Vec<i64> = Filter::new([1, 2, 3, 4, -8, 0, 11].into_iter(), |v: &i64| *v > 2).collect();
        assert_eq!(values, vec![3, 4, 11]);
    }

    #[test]
    fn test_map_is_one_to_one() {
        let values: Vec<i64> = Map::new([1, 2, 3, 4].into_iter(), |v: i64| v + 5).collect();
        assert_eq!(values, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_inspect_fires_once_per_pulled_element() {
        let mut seen = Vec::new();
        let mut iter = Inspect::new([1, 2, 3].into_iter(), |v: &i64| seen.push(*v));
        iter.next();
        iter.next();
        drop(iter);
        // The third element was never pulled, so the action never saw it.
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_flat_map_interleaves_inner_sources() {
        let values: Vec<i64> =
            FlatMap::new([1, 2, 3, 4].into_iter(), |v: i64| vec![v, v + 5]).collect();
        assert_eq!(values, vec![1, 6, 2, 7, 3, 8, 4, 9]);
    }

    #[test]
    fn test_flat_map_skips_empty_inner_sources() {
        let values: Vec<i64> = FlatMap::new([1, 2, 3].into_iter(), |v: i64| {
            if v == 2 {
                vec![]
            } else {
                vec![v]
            }
        })
        .collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_sample_keeps_every_nth_from_first() {
        let values: Vec<i64> = Sample::new([1, 2, 3, 4, 5, 6, 7, 8].into_iter(), 3).collect();
        assert_eq!(values, vec![1, 4, 7]);
    }

    #[test]
    #[should_panic(expected = "sample step must be positive")]
    fn test_sample_rejects_zero_step() {
        let _ = Sample::new([1].into_iter(), 0);
    }

    #[test]
    fn test_take_while_stops_permanently_at_first_failure() {
        let values: Vec<i64> =
            TakeWhile::new([1, 2, 3, 4, 1, 2, 3, 4].into_iter(), |v: &i64| *v < 3).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_take_while_consumes_only_the_failing_candidate() {
        let mut upstream = [1, 2, 9, 4].into_iter();
        let mut iter = TakeWhile::new(upstream.by_ref(), |v: &i32| *v < 3);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        drop(iter);
        // 9 was consumed as the failing candidate; 4 is still upstream.
        assert_eq!(upstream.next(), Some(4));
    }

    #[test]
    fn test_drop_while_emits_from_first_failure() {
        let values: Vec<i64> =
            DropWhile::new([1, 2, 3, 4, 1, 2, 3, 4].into_iter(), |v: &i64| *v < 3).collect();
        assert_eq!(values, vec![3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn test_drop_while_on_all_matching_input_is_empty() {
        let values: Vec<i64> = DropWhile::new([1, 1, 1].into_iter(), |v: &i64| *v < 3).collect();
        assert_eq!(values, Vec::<i64>::new());
    }

    #[test]
    fn test_limit_stops_pulling_at_cap() {
        let mut upstream = [1, 2, 3, 4, 5].into_iter();
        let values: Vec<i64> = Limit::new(upstream.by_ref(), 3).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(upstream.next(), Some(4));
    }

    #[test]
    fn test_limit_beyond_upstream_length() {
        let values: Vec<i64> = Limit::new([1, 2].into_iter(), 10).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_skip_discards_prefix_once() {
        let values: Vec<i64> = Skip::new([1, 2, 3, 4, 5].into_iter(), 3).collect();
        assert_eq!(values, vec![4, 5]);
    }

    #[test]
    fn test_skip_beyond_upstream_length_is_empty() {
        let values: Vec<i64> = Skip::new([1, 2].into_iter(), 10).collect();
        assert_eq!(values, Vec::<i64>::new());
    }

    #[test]
    fn test_sorted_serves_ascending_run() {
        let values: Vec<i64> = Sorted::new([3, 4, 1, 2].into_iter()).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sorted_is_lazy_until_first_pull() {
        let pulls = std::cell::Cell::new(0i64);
        let upstream = std::iter::from_fn(|| {
            pulls.set(pulls.get() + 1);
            if pulls.get() <= 3 {
                Some(4 - pulls.get())
            } else {
                None
            }
        });
        let mut iter = Sorted::new(upstream);
        assert_eq!(pulls.get(), 0);
        // The first pull drains the upstream completely.
        assert_eq!(iter.next(), Some(1));
        assert_eq!(pulls.get(), 4);
        assert_eq!(iter.next(), Some(2));
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn test_sorted_by_custom_order() {
        let values: Vec<i64> =
            SortedBy::new([1, 2, 3, 4].into_iter(), |a: &i64, b: &i64| b.cmp(a)).collect();
        assert_eq!(values, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_distinct_keeps_first_occurrence_order() {
        let values: Vec<i64> = Distinct::new([1, 4, 2, 3, 3, 4, 1].into_iter()).collect();
        assert_eq!(values, vec![1, 4, 2, 3]);
    }
}
