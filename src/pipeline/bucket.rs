//! A single interval of a feature with its class distribution

use std::collections::BTreeMap;

use super::interval::Interval;

/// One sub-range of a feature together with the class labels observed in it.
///
/// The dominant class is a cached value. It is only written by
/// [`Bucket::determine_dominant_class`] or by imputation from neighbouring
/// buckets, and [`Bucket::merge`] deliberately leaves it alone: a bucket that
/// absorbs another keeps its own label even if the combined table would now
/// favour a different class.
#[derive(Debug, Clone)]
pub struct Bucket {
    range: Interval,
    count: usize,
    class_frequency: BTreeMap<String, usize>,
    dominant_class: Option<String>,
}

impl Bucket {
    /// Create an empty bucket covering `range`
    pub fn new(range: Interval) -> Self {
        Self {
            range,
            count: 0,
            class_frequency: BTreeMap::new(),
            dominant_class: None,
        }
    }

    /// Record one observation of `class`
    pub fn add(&mut self, class: &str) {
        self.count += 1;
        *self.class_frequency.entry(class.to_string()).or_insert(0) += 1;
    }

    /// Number of observations of `class`, zero if never seen
    pub fn frequency(&self, class: &str) -> usize {
        self.class_frequency.get(class).copied().unwrap_or(0)
    }

    /// Check whether a single class strictly outnumbers every other class.
    pub fn has_dominant_class(&self) -> bool {
        if self.count == 0 {
            return false;
        }
        if self.class_frequency.len() == 1 {
            return true;
        }

        let mut values: Vec<usize> = self.class_frequency.values().copied().collect();
        values.sort_unstable();
        values[values.len() - 1] != values[values.len() - 2]
    }

    /// Compute and cache the dominant class, or clear it if there is none.
    pub fn determine_dominant_class(&mut self) {
        if !self.has_dominant_class() {
            self.dominant_class = None;
            return;
        }

        let mut best: Option<(&String, usize)> = None;
        for (class, &freq) in &self.class_frequency {
            if best.map_or(true, |(_, max)| freq > max) {
                best = Some((class, freq));
            }
        }
        self.dominant_class = best.map(|(class, _)| class.clone());
    }

    /// Proportion of observations belonging to the dominant class.
    ///
    /// Returns 0.0 when no class dominates. If a label is already cached it
    /// is used as-is, otherwise it is computed first.
    pub fn dominant_class_probability(&mut self) -> f64 {
        if !self.has_dominant_class() {
            return 0.0;
        }
        if self.dominant_class.is_none() {
            self.determine_dominant_class();
        }

        match &self.dominant_class {
            Some(class) => self.frequency(class) as f64 / self.count as f64,
            None => 0.0,
        }
    }

    /// Absorb `other`: counts and class tallies are summed and the range
    /// becomes the span of both. The cached dominant class is not touched.
    pub fn merge(&mut self, other: &Bucket) {
        self.count += other.count;
        for (class, &freq) in &other.class_frequency {
            *self.class_frequency.entry(class.clone()).or_insert(0) += freq;
        }
        self.range = self.range.span(&other.range);
    }

    pub fn contains(&self, value: f64) -> bool {
        self.range.contains(value)
    }

    pub fn range(&self) -> &Interval {
        &self.range
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn class_frequency(&self) -> &BTreeMap<String, usize> {
        &self.class_frequency
    }

    pub fn dominant_class(&self) -> Option<&str> {
        self.dominant_class.as_deref()
    }

    /// Overwrite the cached label (used for imputation)
    pub fn set_dominant_class(&mut self, class: Option<String>) {
        self.dominant_class = class;
    }
}

/// Dominant class probability of the bucket that merging `first` and
/// `second` would produce, without modifying either.
pub fn trial_merge_probability(first: &Bucket, second: &Bucket) -> f64 {
    let mut scratch = Bucket::new(first.range);
    scratch.merge(first);
    scratch.merge(second);
    scratch.dominant_class_probability()
}
