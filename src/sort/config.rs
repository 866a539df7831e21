use derive_more::{Display, IsVariant};

/// Which quicksort variant [`sort_with`](super::sort_with) runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum Strategy {
    /// Plain recursive quicksort, all the way down to single elements. The insertion threshold is
    /// ignored.
    Quick,
    /// Quicksort that hands ranges of at most `insertion_threshold` elements to insertion sort.
    /// The smaller partition is sorted recursively and the larger one in a loop, which keeps the
    /// recursion depth logarithmic even for badly skewed partitions.
    #[default]
    Hybrid,
    /// Like [`Strategy::Hybrid`], but recursing into both partitions.
    HybridRecursive,
}

/// Tunables for a single sort. Passed explicitly to every call, so there is no shared state
/// between sorts.
///
/// # Examples
/// ```
/// # use sequence_sort::sort::{self, SortConfig, Strategy};
/// let config = SortConfig::new()
///     .with_strategy(Strategy::HybridRecursive)
///     .with_threshold(8);
///
/// let mut values = [3, 1, 2];
/// sort::sort_with(&mut values, |a, b| a < b, &config);
/// assert_eq!(values, [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortConfig {
    /// Ranges with at most this many elements are finished with insertion sort. Values of 0 and
    /// 1 disable the fallback.
    pub insertion_threshold: usize,
    /// The quicksort variant to run.
    pub strategy: Strategy,
}

impl SortConfig {
    /// The insertion threshold used by [`SortConfig::new`].
    pub const DEFAULT_THRESHOLD: usize = 20;

    /// Creates the default configuration: [`Strategy::Hybrid`] with an insertion threshold of
    /// [`SortConfig::DEFAULT_THRESHOLD`].
    pub const fn new() -> SortConfig {
        SortConfig {
            insertion_threshold: Self::DEFAULT_THRESHOLD,
            strategy: Strategy::Hybrid,
        }
    }

    /// Returns the configuration with a different insertion threshold.
    pub const fn with_threshold(self, insertion_threshold: usize) -> SortConfig {
        SortConfig {
            insertion_threshold,
            ..self
        }
    }

    /// Returns the configuration with a different strategy.
    pub const fn with_strategy(self, strategy: Strategy) -> SortConfig {
        SortConfig {
            strategy,
            ..self
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What a sort did, as returned by [`sort_with`](super::sort_with).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortReport {
    /// The deepest level of recursion reached, where the initial call is depth 0.
    pub max_depth: usize,
    /// The number of Hoare partitions performed.
    pub partitions: usize,
}

impl SortReport {
    pub(crate) fn enter(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }
}
