use std::cmp::Ordering;
use std::iter;

use crate::error::{PipelineError, Result};
use crate::generic::Pipeline;
use crate::ops;
use crate::source::{Concat, Generate, Iterate, Range};

/// A lazy pipeline over `i64` elements.
///
/// A pipeline owns exactly one pull source. Every intermediate operation
/// consumes the pipeline and returns a new one whose source is a lazy
/// decorator over the previous source; no element moves until a terminal
/// operation pulls it. Terminal operations consume the pipeline, so a
/// finished pipeline cannot be reused by accident.
///
/// Elements reach every operator in the order the original source
/// produces them; only `sorted`/`sorted_by`/`distinct` reorder or drop
/// elements.
pub struct IntPipeline {
    source: Box<dyn Iterator<Item = i64>>,
}

impl IntPipeline {
    pub(crate) fn from_boxed(source: Box<dyn Iterator<Item = i64>>) -> IntPipeline {
        IntPipeline { source }
    }

    /// A pipeline with no elements.
    pub fn empty() -> IntPipeline {
        Self::from_boxed(Box::new(iter::empty()))
    }

    /// A pipeline over the given values, in order.
    pub fn of(values: impl Into<Vec<i64>>) -> IntPipeline {
        Self::from_boxed(Box::new(values.into().into_iter()))
    }

    /// A pipeline producing `value` exactly once.
    pub fn once(value: i64) -> IntPipeline {
        Self::from_boxed(Box::new(iter::once(value)))
    }

    /// Wraps an arbitrary pull source.
    pub fn from_source(source: impl Iterator<Item = i64> + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(source))
    }

    /// Counts from `start` (inclusive) up to `end` (exclusive); empty when
    /// `start >= end`.
    pub fn range(start: i64, end: i64) -> IntPipeline {
        Self::from_boxed(Box::new(Range::new(start, end)))
    }

    /// Counts from `start` up to `end`, both inclusive.
    pub fn range_closed(start: i64, end: i64) -> IntPipeline {
        Self::from_boxed(Box::new(Range::closed(start, end)))
    }

    /// An infinite pipeline that invokes the supplier once per pull.
    pub fn generate(supplier: impl FnMut() -> i64 + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(Generate::new(supplier)))
    }

    /// An infinite pipeline of `seed`, `f(seed)`, `f(f(seed))`, ...
    ///
    /// Applications of `f` happen lazily, one step behind the pulls.
    pub fn iterate(seed: i64, f: impl FnMut(i64) -> i64 + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(Iterate::new(seed, f)))
    }

    /// All elements of `a`, then all elements of `b`.
    pub fn concat(a: IntPipeline, b: IntPipeline) -> IntPipeline {
        Self::from_boxed(Box::new(Concat::new(a.source, b.source)))
    }

    /// Keeps elements for which the predicate holds.
    pub fn filter(self, mut predicate: impl FnMut(i64) -> bool + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::Filter::new(
            self.source,
            move |value: &i64| predicate(*value),
        )))
    }

    /// Keeps elements for which the predicate fails.
    pub fn filter_not(self, mut predicate: impl FnMut(i64) -> bool + 'static) -> IntPipeline {
        self.filter(move |value| !predicate(value))
    }

    /// Transforms each element one to one.
    pub fn map(self, mapper: impl FnMut(i64) -> i64 + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::Map::new(self.source, mapper)))
    }

    /// Transforms each element into a different element kind, moving to
    /// the generic pipeline.
    pub fn map_to<U: 'static>(self, mapper: impl FnMut(i64) -> U + 'static) -> Pipeline<U> {
        Pipeline::from_boxed(Box::new(ops::Map::new(self.source, mapper)))
    }

    /// Replaces each element with the elements of the pipeline the mapper
    /// derives from it; empty derived pipelines contribute nothing.
    pub fn flat_map(self, mapper: impl FnMut(i64) -> IntPipeline + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::FlatMap::new(self.source, mapper)))
    }

    /// Drops elements equal to one seen earlier, keeping first
    /// occurrences in order.
    ///
    /// Stateful: the seen-set grows with the number of distinct elements.
    /// Delegates to the generic pipeline's deduplication.
    pub fn distinct(self) -> IntPipeline {
        self.boxed().distinct().map_to_int(|value| value)
    }

    /// Sorts ascending.
    ///
    /// Stateful: the first pull drains the whole upstream into a buffer.
    pub fn sorted(self) -> IntPipeline {
        Self::from_boxed(Box::new(ops::Sorted::new(self.source)))
    }

    /// Sorts by a caller-supplied comparator.
    ///
    /// Stateful; delegates to the generic pipeline's comparator sort.
    pub fn sorted_by(
        self,
        comparator: impl FnMut(&i64, &i64) -> Ordering + 'static,
    ) -> IntPipeline {
        self.boxed().sorted_by(comparator).map_to_int(|value| value)
    }

    /// Keeps every `step`-th element, starting from the first.
    ///
    /// A step of `1` returns the pipeline unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn sample(self, step: usize) -> IntPipeline {
        if step == 1 {
            return self;
        }
        Self::from_boxed(Box::new(ops::Sample::new(self.source, step)))
    }

    /// Invokes an action on each element as it is pulled through,
    /// without altering the sequence. Handy for debugging.
    pub fn inspect(self, mut action: impl FnMut(i64) + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::Inspect::new(
            self.source,
            move |value: &i64| action(*value),
        )))
    }

    /// Emits elements until the predicate first fails, then ends, even if
    /// later elements would pass again.
    pub fn take_while(self, mut predicate: impl FnMut(i64) -> bool + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::TakeWhile::new(
            self.source,
            move |value: &i64| predicate(*value),
        )))
    }

    /// Skips elements while the predicate holds; the first failing
    /// element and everything after it is emitted.
    pub fn drop_while(self, mut predicate: impl FnMut(i64) -> bool + 'static) -> IntPipeline {
        Self::from_boxed(Box::new(ops::DropWhile::new(
            self.source,
            move |value: &i64| predicate(*value),
        )))
    }

    /// Truncates to at most `max_size` elements.
    ///
    /// A size of `0` short-circuits to the empty pipeline without
    /// touching the upstream.
    pub fn limit(self, max_size: usize) -> IntPipeline {
        if max_size == 0 {
            return Self::empty();
        }
        Self::from_boxed(Box::new(ops::Limit::new(self.source, max_size)))
    }

    /// Discards the first `n` elements; `0` is the identity.
    pub fn skip(self, n: usize) -> IntPipeline {
        if n == 0 {
            return self;
        }
        Self::from_boxed(Box::new(ops::Skip::new(self.source, n)))
    }

    /// Moves to the generic pipeline over the same elements.
    ///
    /// Changes representation only, never order or multiplicity; used to
    /// borrow the generic set- and sort-based algorithms.
    pub fn boxed(self) -> Pipeline<i64> {
        Pipeline::from_boxed(self.source)
    }

    /// Applies a caller-supplied operator to the whole pipeline.
    ///
    /// The operator may return another pipeline (an intermediate
    /// operation) or any terminal value.
    pub fn custom<R>(self, f: impl FnOnce(IntPipeline) -> R) -> R {
        f(self)
    }

    /// Surrenders the underlying pull source.
    pub fn into_source(self) -> Box<dyn Iterator<Item = i64>> {
        self.source
    }

    /// Drains the pipeline, invoking an action per element, in order.
    pub fn for_each(mut self, mut action: impl FnMut(i64)) {
        while let Some(value) = self.source.next() {
            action(value);
        }
    }

    /// Left-folds all elements onto an explicit identity.
    ///
    /// Returns the identity when the pipeline is empty.
    pub fn fold(mut self, identity: i64, mut op: impl FnMut(i64, i64) -> i64) -> i64 {
        let mut result = identity;
        while let Some(value) = self.source.next() {
            result = op(result, value);
        }
        result
    }

    /// Folds all elements using the first as the seed; `None` when the
    /// pipeline is empty.
    pub fn reduce(mut self, op: impl FnMut(i64, i64) -> i64) -> Option<i64> {
        let first = self.source.next()?;
        Some(self.fold(first, op))
    }

    /// Builds a container by accumulating every element into it.
    pub fn collect_with<R>(
        mut self,
        supplier: impl FnOnce() -> R,
        mut accumulator: impl FnMut(&mut R, i64),
    ) -> R {
        let mut container = supplier();
        while let Some(value) = self.source.next() {
            accumulator(&mut container, value);
        }
        container
    }

    /// Sum of all elements; `0` for an empty pipeline.
    pub fn sum(self) -> i64 {
        self.fold(0, |acc, value| acc + value)
    }

    /// Smallest element, or `None` for an empty pipeline.
    pub fn min(self) -> Option<i64> {
        self.reduce(i64::min)
    }

    /// Largest element, or `None` for an empty pipeline.
    pub fn max(self) -> Option<i64> {
        self.reduce(i64::max)
    }

    /// Number of elements. Always drains the whole pipeline.
    pub fn count(mut self) -> usize {
        let mut count = 0;
        while self.source.next().is_some() {
            count += 1;
        }
        count
    }

    /// Whether any element matches; `false` on an empty pipeline.
    ///
    /// Stops pulling at the first match.
    pub fn any_match(mut self, mut predicate: impl FnMut(i64) -> bool) -> bool {
        while let Some(value) = self.source.next() {
            if predicate(value) {
                return true;
            }
        }
        false
    }

    /// Whether every element matches; vacuously `true` on an empty
    /// pipeline.
    ///
    /// Stops pulling at the first failure.
    pub fn all_match(mut self, mut predicate: impl FnMut(i64) -> bool) -> bool {
        while let Some(value) = self.source.next() {
            if !predicate(value) {
                return false;
            }
        }
        true
    }

    /// Whether no element matches; vacuously `true` on an empty pipeline.
    ///
    /// Stops pulling at the first match.
    pub fn none_match(mut self, mut predicate: impl FnMut(i64) -> bool) -> bool {
        while let Some(value) = self.source.next() {
            if predicate(value) {
                return false;
            }
        }
        true
    }

    /// First element, or `None` when empty. Pulls at most one element.
    pub fn find_first(mut self) -> Option<i64> {
        self.source.next()
    }

    /// The only element of the pipeline.
    ///
    /// Pulls at most two elements to verify cardinality; when a second
    /// element exists, both pulled elements are lost to the check.
    pub fn single(mut self) -> Result<i64> {
        match self.source.next() {
            None => Err(PipelineError::NoElements),
            Some(value) => match self.source.next() {
                None => Ok(value),
                Some(_) => Err(PipelineError::MultipleElements),
            },
        }
    }

    /// Like [`single`], but an empty pipeline yields `Ok(None)` instead
    /// of an error.
    ///
    /// [`single`]: IntPipeline::single
    pub fn find_single(mut self) -> Result<Option<i64>> {
        match self.source.next() {
            None => Ok(None),
            Some(value) => match self.source.next() {
                None => Ok(Some(value)),
                Some(_) => Err(PipelineError::MultipleElements),
            },
        }
    }

    /// Drains every element into a vector, preserving encounter order.
    pub fn to_vec(self) -> Vec<i64> {
        self.source.collect()
    }
}

impl Iterator for IntPipeline {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.source.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl FromIterator<i64> for IntPipeline {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self::of(iter.into_iter().collect::<Vec<_>>())
    }
}
