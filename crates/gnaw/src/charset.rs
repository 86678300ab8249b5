use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

const MAX_SCALAR: u32 = char::MAX as u32;
const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;

/// An immutable set of unicode scalar values.
///
/// Sets built from equal collections of scalars compare equal no matter how
/// they were constructed:
///
/// ```rust
/// use gnaw::CharSet;
///
/// assert_eq!(CharSet::from_range('a'..='c'), CharSet::from_chars("cab"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CharSet {
    /// Sorted, disjoint, non-adjacent inclusive scalar ranges. None of them
    /// intersects the surrogate block, so structural equality on this
    /// canonical form is equality of the underlying scalar set.
    ranges: Vec<(u32, u32)>,
}

impl CharSet {
    /// The set holding a single scalar.
    pub fn from_char(scalar: char) -> Self {
        Self {
            ranges: vec![(scalar as u32, scalar as u32)],
        }
    }

    /// The set holding every scalar in a closed range.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty (`start > end`), which is a grammar
    /// construction bug rather than an input error.
    pub fn from_range(range: RangeInclusive<char>) -> Self {
        let (start, end) = (*range.start() as u32, *range.end() as u32);
        assert!(
            start <= end,
            "empty scalar range {:?}..={:?}",
            range.start(),
            range.end(),
        );
        Self {
            ranges: split_surrogates(vec![(start, end)]),
        }
    }

    /// The set holding every scalar that occurs in `members`.
    pub fn from_chars(members: &str) -> Self {
        let mut ranges: Vec<(u32, u32)> = members
            .chars()
            .map(|scalar| (scalar as u32, scalar as u32))
            .collect();
        ranges.sort_unstable();
        Self {
            ranges: coalesce(ranges),
        }
    }

    /// The set of every unicode scalar value not in `self`.
    pub fn complement(&self) -> Self {
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        let mut next = 0u32;
        for &(start, end) in &self.ranges {
            if next < start {
                ranges.push((next, start - 1));
            }
            next = end + 1;
            // A range ending right below the surrogate block resumes right
            // above it; synthesizing the block itself as a gap would put
            // non-scalars in the set.
            if next == SURROGATE_FIRST {
                next = SURROGATE_LAST + 1;
            }
        }
        if next <= MAX_SCALAR {
            ranges.push((next, MAX_SCALAR));
        }
        Self {
            ranges: split_surrogates(ranges),
        }
    }

    /// Whether `scalar` is a member of the set.
    pub fn contains(&self, scalar: char) -> bool {
        let scalar = scalar as u32;
        self.ranges
            .binary_search_by(|&(start, end)| {
                if end < scalar {
                    Ordering::Less
                } else if start > scalar {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The set of scalars in `self`, `other`, or both.
    pub fn union(&self, other: &CharSet) -> CharSet {
        let mut ranges = Vec::with_capacity(self.ranges.len() + other.ranges.len());
        ranges.extend_from_slice(&self.ranges);
        ranges.extend_from_slice(&other.ranges);
        ranges.sort_unstable();
        CharSet {
            ranges: coalesce(ranges),
        }
    }
}

/// Merge sorted ranges that overlap or are numerically adjacent. Ranges
/// separated only by the surrogate block stay separate, which keeps the
/// representation canonical.
fn coalesce(sorted: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    let mut ranges: Vec<(u32, u32)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match ranges.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

/// Split any range spanning the surrogate block, which `RangeInclusive<char>`
/// endpoints and complements can produce.
fn split_surrogates(ranges: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(ranges.len() + 1);
    for (start, end) in ranges {
        if start < SURROGATE_FIRST && end > SURROGATE_LAST {
            out.push((start, SURROGATE_FIRST - 1));
            out.push((SURROGATE_LAST + 1, end));
        } else {
            out.push((start, end));
        }
    }
    out
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            let start = char::from_u32(start).unwrap_or(char::REPLACEMENT_CHARACTER);
            let end = char::from_u32(end).unwrap_or(char::REPLACEMENT_CHARACTER);
            if start == end {
                write!(f, "{start:?}")?;
            } else {
                write!(f, "{start:?}..={end:?}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharSet({self})")
    }
}
