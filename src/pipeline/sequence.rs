//! Ordered bucket sequence implementing the LUCS-KDD DN discretisation
//!
//! The pipeline for one feature is strictly ordered:
//!
//! 1. [`DiscretizationSequence::fill`] - equal-width pre-binning and class tallies
//! 2. [`DiscretizationSequence::determine_dominant_classes`] - label every bucket,
//!    imputing ambiguous ones from the nearest labelled neighbour
//! 3. [`DiscretizationSequence::form_divisions`] - merge runs of equal labels
//! 4. [`DiscretizationSequence::merge_divisions`] - called until the division
//!    budget is met
//! 5. [`DiscretizationSequence::category`] - per-value lookup
//!
//! At every stage the buckets are non-empty, ordered, and jointly cover the
//! whole real line without gaps or overlaps.

use serde::Serialize;

use super::bucket::{trial_merge_probability, Bucket};
use super::error::{DiscretizeError, DiscretizeResult};
use super::interval::Interval;

/// Upper limit on the number of initial equal-width buckets
pub const MAX_INITIAL_BUCKETS: usize = 100;

/// Declared value range of a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    /// Smallest value of the feature
    pub low: f64,
    /// Largest value of the feature
    pub high: f64,
    /// Whether the feature has an integer type
    pub is_integer: bool,
}

impl FeatureRange {
    pub fn new(low: f64, high: f64, is_integer: bool) -> Self {
        Self {
            low,
            high,
            is_integer,
        }
    }

    /// Number of equal-width buckets used for pre-binning.
    ///
    /// Integer features spanning fewer than 100 units get one bucket per unit,
    /// everything else gets 100. A zero-width range gets a single bucket.
    pub fn initial_bucket_count(&self) -> usize {
        if self.high == self.low {
            return 1;
        }
        let width = (self.high - self.low).ceil();
        if self.is_integer && width < MAX_INITIAL_BUCKETS as f64 {
            width as usize
        } else {
            MAX_INITIAL_BUCKETS
        }
    }
}

/// Label used when no bucket obtains a dominant class at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassFallback {
    /// Use exactly this label
    Label(String),
    /// Use the first label of this ordering of the class domain
    Domain(Vec<String>),
}

impl ClassFallback {
    pub fn label(&self) -> Option<&str> {
        match self {
            ClassFallback::Label(label) => Some(label),
            ClassFallback::Domain(values) => values.first().map(String::as_str),
        }
    }
}

/// Final interval of a discretised feature, for reporting
#[derive(Debug, Clone, Serialize)]
pub struct Division {
    /// Position along the feature axis
    pub index: usize,
    /// Category string emitted for values in this division
    pub category: String,
    /// Covered value range
    pub range: Interval,
    /// Class label of the division
    pub dominant_class: Option<String>,
    /// Number of observations that fell into the division
    pub count: usize,
}

/// Bucket sequence for a single feature/class column pair.
#[derive(Debug, Clone)]
pub struct DiscretizationSequence {
    feature: String,
    class_attribute: String,
    buckets: Vec<Bucket>,
}

impl DiscretizationSequence {
    /// Create a sequence holding one empty bucket over the whole real line
    pub fn new(feature: impl Into<String>, class_attribute: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            class_attribute: class_attribute.into(),
            buckets: vec![Bucket::new(Interval::all())],
        }
    }

    /// Run the whole pipeline for one feature.
    pub fn build<'a, I>(
        feature: &str,
        class_attribute: &str,
        range: &FeatureRange,
        rows: I,
        fallback: &ClassFallback,
        max_divisions: usize,
    ) -> DiscretizeResult<Self>
    where
        I: IntoIterator<Item = (Option<f64>, Option<&'a str>)>,
    {
        if max_divisions < 1 {
            return Err(DiscretizeError::InvalidMaxDivisions(max_divisions));
        }

        let mut sequence = Self::new(feature, class_attribute);
        sequence.fill(range, rows)?;
        sequence.determine_dominant_classes(fallback)?;
        sequence.form_divisions();
        sequence.reduce_to(max_divisions)?;
        Ok(sequence)
    }

    /// Replace the buckets with equal-width buckets over `range` and tally
    /// the class label of every row into its bucket.
    ///
    /// Rows missing either value (NaN counts as missing) are skipped. The
    /// outermost buckets are unbounded so that any future value has a bucket.
    pub fn fill<'a, I>(&mut self, range: &FeatureRange, rows: I) -> DiscretizeResult<()>
    where
        I: IntoIterator<Item = (Option<f64>, Option<&'a str>)>,
    {
        let FeatureRange { low, high, .. } = *range;
        if !low.is_finite() || !high.is_finite() || low > high || !(high - low).is_finite() {
            return Err(DiscretizeError::InvalidRange {
                feature: self.feature.clone(),
                low,
                high,
            });
        }

        self.buckets = initial_buckets(range);
        let n = self.buckets.len();

        for (value, class) in rows {
            let (Some(x), Some(class)) = (value, class) else {
                continue;
            };
            if x.is_nan() {
                continue;
            }

            let index = if high == low {
                0
            } else {
                let z = (x - low) / (high - low);
                if z <= 0.0 {
                    0
                } else {
                    (n as f64 * z - 1.0).ceil() as usize
                }
            };

            let bucket = self
                .buckets
                .get_mut(index)
                .ok_or_else(|| DiscretizeError::ValueOutOfRange {
                    feature: self.feature.clone(),
                    value: x,
                })?;
            bucket.add(class);
        }

        Ok(())
    }

    /// Give every bucket a dominant class.
    ///
    /// Buckets without an unambiguous class take the class of the nearest
    /// bucket that has one. Buckets before the first labelled bucket take its
    /// class, buckets after the last one take that one's class, and a gap
    /// between two labelled buckets is filled from both ends inward. In a gap
    /// of odd length the middle bucket takes the class of the later bucket.
    /// If no bucket has a dominant class, all of them get the fallback label.
    pub fn determine_dominant_classes(&mut self, fallback: &ClassFallback) -> DiscretizeResult<()> {
        let mut anchor: Option<usize> = None;

        for i in 0..self.buckets.len() {
            if !self.buckets[i].has_dominant_class() {
                continue;
            }
            self.buckets[i].determine_dominant_class();
            let current = self.buckets[i].dominant_class().map(str::to_string);

            match anchor {
                None => {
                    for bucket in &mut self.buckets[..i] {
                        bucket.set_dominant_class(current.clone());
                    }
                }
                Some(previous) if previous + 1 != i => {
                    let earlier = self.buckets[previous].dominant_class().map(str::to_string);
                    let mut lo = previous + 1;
                    let mut hi = i - 1;
                    // hi >= previous + 1 >= 1 while the loop runs
                    while lo <= hi {
                        self.buckets[lo].set_dominant_class(earlier.clone());
                        self.buckets[hi].set_dominant_class(current.clone());
                        lo += 1;
                        hi -= 1;
                    }
                }
                Some(_) => {}
            }
            anchor = Some(i);
        }

        match anchor {
            None => {
                let label = fallback
                    .label()
                    .ok_or_else(|| DiscretizeError::EmptyClassDomain(self.class_attribute.clone()))?
                    .to_string();
                for bucket in &mut self.buckets {
                    bucket.set_dominant_class(Some(label.clone()));
                }
            }
            Some(last) if last + 1 < self.buckets.len() => {
                let class = self.buckets[last].dominant_class().map(str::to_string);
                for bucket in &mut self.buckets[last + 1..] {
                    bucket.set_dominant_class(class.clone());
                }
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Merge every run of consecutive buckets sharing a dominant class into
    /// its first bucket.
    pub fn form_divisions(&mut self) {
        let mut i = 0;
        while i < self.buckets.len() {
            while i + 1 < self.buckets.len()
                && self.buckets[i + 1].dominant_class() == self.buckets[i].dominant_class()
            {
                let next = self.buckets.remove(i + 1);
                self.buckets[i].merge(&next);
            }
            i += 1;
        }
    }

    /// Perform one merge of two adjacent divisions.
    ///
    /// The pair whose union has the purest dominant class is merged into its
    /// left member, which keeps its label. Neighbours that now carry the same
    /// label are folded in as well: first the following division into the
    /// merged one, then the merged one into the preceding division. Shrinks
    /// the sequence by one or two; does nothing with fewer than two buckets.
    pub fn merge_divisions(&mut self) {
        if self.buckets.len() < 2 {
            return;
        }

        let (current, next) = self.select_best_merge();
        let absorbed = self.buckets.remove(next);
        self.buckets[current].merge(&absorbed);

        if current + 1 < self.buckets.len()
            && self.buckets[current + 1].dominant_class() == self.buckets[current].dominant_class()
        {
            let absorbed = self.buckets.remove(current + 1);
            self.buckets[current].merge(&absorbed);
        }

        if current > 0
            && self.buckets[current - 1].dominant_class() == self.buckets[current].dominant_class()
        {
            let absorbed = self.buckets.remove(current);
            self.buckets[current - 1].merge(&absorbed);
        }
    }

    /// Adjacent pair whose merge yields the highest dominant class
    /// probability. The earliest pair wins ties and `(0, 1)` is returned when
    /// no merge produces a dominant class.
    pub fn select_best_merge(&self) -> (usize, usize) {
        let mut best = (0, 1);
        let mut max_prob = 0.0;
        for (i, pair) in self.buckets.windows(2).enumerate() {
            let prob = trial_merge_probability(&pair[0], &pair[1]);
            if prob > max_prob {
                best = (i, i + 1);
                max_prob = prob;
            }
        }
        best
    }

    /// Merge divisions until at most `max_divisions` remain. Returns the
    /// number of merge steps taken.
    pub fn reduce_to(&mut self, max_divisions: usize) -> DiscretizeResult<usize> {
        if max_divisions < 1 {
            return Err(DiscretizeError::InvalidMaxDivisions(max_divisions));
        }
        let mut steps = 0;
        while self.buckets.len() > max_divisions {
            self.merge_divisions();
            steps += 1;
        }
        Ok(steps)
    }

    /// Index of the first bucket containing `value`
    pub fn category_index(&self, value: f64) -> Option<usize> {
        self.buckets.iter().position(|b| b.contains(value))
    }

    /// Category label for `value`, `"Interval_-1"` if no bucket contains it
    pub fn category(&self, value: f64) -> String {
        match self.category_index(value) {
            Some(index) => category_label(index),
            None => "Interval_-1".to_string(),
        }
    }

    /// Snapshot of the current buckets for reporting
    pub fn divisions(&self) -> Vec<Division> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| Division {
                index,
                category: category_label(index),
                range: *bucket.range(),
                dominant_class: bucket.dominant_class().map(str::to_string),
                count: bucket.count(),
            })
            .collect()
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn class_attribute(&self) -> &str {
        &self.class_attribute
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false; a sequence holds at least one bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[cfg(test)]
    fn from_buckets(buckets: Vec<Bucket>) -> Self {
        Self {
            feature: "feature".to_string(),
            class_attribute: "class".to_string(),
            buckets,
        }
    }
}

fn category_label(index: usize) -> String {
    format!("Interval_{}", index)
}

/// Round to two decimals, halves toward positive infinity.
/// Values too large to scale are returned unchanged.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    (scaled + 0.5).floor() / 100.0
}

/// Equal-width buckets over `range` with unbounded outer ends
fn initial_buckets(range: &FeatureRange) -> Vec<Bucket> {
    let n = range.initial_bucket_count();
    if n == 1 {
        return vec![Bucket::new(Interval::all())];
    }

    let width = (range.high - range.low) / n as f64;
    let mut lower = round2(range.low);
    let mut buckets = Vec::with_capacity(n);
    for i in 0..n {
        let interval = if i == 0 {
            Interval::at_most(round2(lower + width))
        } else if i == n - 1 {
            Interval::greater_than(round2(lower))
        } else {
            Interval::open_closed(round2(lower), round2(lower + width))
        };
        buckets.push(Bucket::new(interval));
        lower += width;
    }
    buckets
}
