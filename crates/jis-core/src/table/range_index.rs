use serde::{Deserialize, Serialize};

/// A value stored in a dense range slot, with a sentinel for "absent".
pub trait Slot: Clone {
    fn vacant() -> Self;
    fn is_vacant(&self) -> bool;
}

/// Packed JIS codes use `u16::MAX` as the sentinel.
impl Slot for u16 {
    fn vacant() -> Self {
        u16::MAX
    }

    fn is_vacant(&self) -> bool {
        *self == u16::MAX
    }
}

/// Contiguous codepoint range `[start, end]` with one slot per codepoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange<T> {
    pub start: u32,
    pub end: u32,
    pub slots: Vec<T>,
}

/// Sorted, non-overlapping codepoint ranges queried by binary search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeIndex<T> {
    ranges: Vec<CodeRange<T>>,
}

impl<T> Default for RangeIndex<T> {
    fn default() -> Self {
        Self { ranges: Vec::new() }
    }
}

impl<T: Slot> RangeIndex<T> {
    /// Build from `(codepoint, value)` pairs sorted by codepoint.
    ///
    /// A new range starts whenever the distance to the previous populated
    /// codepoint is `gap_threshold` or more; shorter gaps are padded with
    /// vacant slots. Repeated codepoints keep the first value.
    pub fn build(items: impl IntoIterator<Item = (u32, T)>, gap_threshold: u32) -> Self {
        let mut ranges = Vec::new();
        let mut current: Option<CodeRange<T>> = None;

        for (cp, value) in items {
            if let Some(r) = current.as_mut() {
                debug_assert!(cp >= r.end, "range index input must be sorted");
                if cp <= r.end {
                    continue;
                }
                if cp - r.end < gap_threshold {
                    r.slots.resize((cp - r.start) as usize, T::vacant());
                    r.slots.push(value);
                    r.end = cp;
                    continue;
                }
            }
            ranges.extend(current.take());
            current = Some(CodeRange {
                start: cp,
                end: cp,
                slots: vec![value],
            });
        }
        ranges.extend(current);

        Self { ranges }
    }

    pub fn get(&self, cp: u32) -> Option<&T> {
        let idx = self.ranges.partition_point(|r| r.start <= cp);
        let range = self.ranges.get(idx.checked_sub(1)?)?;
        if cp > range.end {
            return None;
        }
        range
            .slots
            .get((cp - range.start) as usize)
            .filter(|slot| !slot.is_vacant())
    }

    /// Iterate over all populated `(codepoint, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.ranges.iter().flat_map(|r| {
            r.slots
                .iter()
                .zip(r.start..)
                .filter(|(slot, _)| !slot.is_vacant())
                .map(|(slot, cp)| (cp, slot))
        })
    }

    pub fn ranges(&self) -> &[CodeRange<T>] {
        &self.ranges
    }

    /// Structural check used after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        let mut prev_end: Option<u32> = None;
        for r in &self.ranges {
            if r.start > r.end {
                return Err(format!("range {:#x}..{:#x} is inverted", r.start, r.end));
            }
            if r.slots.len() as u64 != (r.end - r.start) as u64 + 1 {
                return Err(format!(
                    "range {:#x}..{:#x} has {} slots",
                    r.start,
                    r.end,
                    r.slots.len()
                ));
            }
            if prev_end.is_some_and(|e| r.start <= e) {
                return Err(format!(
                    "range {:#x}..{:#x} overlaps or is out of order",
                    r.start, r.end
                ));
            }
            if r.slots.first().map_or(true, Slot::is_vacant)
                || r.slots.last().map_or(true, Slot::is_vacant)
            {
                return Err(format!(
                    "range {:#x}..{:#x} has vacant boundary",
                    r.start, r.end
                ));
            }
            prev_end = Some(r.end);
        }
        Ok(())
    }
}
