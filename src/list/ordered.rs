//! Lookups for lists kept sorted ascending.
//!
//! These helpers serve time-series and keyframe style data: find the sample
//! nearest to a time, or drop everything before or after it. They assume the
//! live range is sorted ascending by the compared key and scan linearly, with
//! early exits when the target falls outside the first or last element.

use std::ops::Sub;

use super::ArrayList;

impl<T> ArrayList<T> {
    /// Returns the index of the element whose key is nearest to `target`.
    ///
    /// Ties go to the lower index. Returns `None` for an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// struct Keyframe {
    ///     time: f32,
    /// }
    ///
    /// let frames: ArrayList<Keyframe> = [0.0, 0.5, 2.0]
    ///     .into_iter()
    ///     .map(|time| Keyframe { time })
    ///     .collect();
    ///
    /// assert_eq!(frames.closest_index_by_key(0.6, |frame| frame.time), Some(1));
    /// assert_eq!(frames.closest_index_by_key(1.5, |frame| frame.time), Some(2));
    /// ```
    pub fn closest_index_by_key<K, F>(&self, target: K, mut key: F) -> Option<usize>
    where
        K: PartialOrd + Sub<Output = K> + Copy,
        F: FnMut(&T) -> K,
    {
        let last_index = self.len().checked_sub(1)?;
        if target <= key(&self.items[0]) {
            return Some(0);
        }
        if target >= key(&self.items[last_index]) {
            return Some(last_index);
        }
        let mut lower = key(&self.items[0]);
        for index in 1..=last_index {
            let upper = key(&self.items[index]);
            if upper >= target {
                return if target - lower <= upper - target {
                    Some(index - 1)
                } else {
                    Some(index)
                };
            }
            lower = upper;
        }
        Some(last_index)
    }

    /// Drops every element before the one nearest to `target` and returns how
    /// many were removed.
    pub fn trim_closest_start_by_key<K, F>(&mut self, target: K, key: F) -> usize
    where
        K: PartialOrd + Sub<Output = K> + Copy,
        F: FnMut(&T) -> K,
    {
        match self.closest_index_by_key(target, key) {
            Some(index) if index > 0 => self.remove_range(0, index).unwrap_or(0),
            _ => 0,
        }
    }

    /// Drops every element after the one nearest to `target` and returns how
    /// many were removed.
    pub fn trim_closest_end_by_key<K, F>(&mut self, target: K, key: F) -> usize
    where
        K: PartialOrd + Sub<Output = K> + Copy,
        F: FnMut(&T) -> K,
    {
        let len = self.len();
        match self.closest_index_by_key(target, key) {
            Some(index) if index + 1 < len => {
                self.remove_range(index + 1, len - index - 1).unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl<T> ArrayList<T>
where
    T: PartialOrd + Sub<Output = T> + Copy,
{
    /// Returns the index of the element nearest to `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let times: ArrayList<u32> = [10, 20, 40].into_iter().collect();
    /// assert_eq!(times.closest_index(&0), Some(0));
    /// assert_eq!(times.closest_index(&29), Some(1));
    /// assert_eq!(times.closest_index(&31), Some(2));
    /// assert_eq!(times.closest_index(&99), Some(2));
    /// ```
    pub fn closest_index(&self, target: &T) -> Option<usize> {
        self.closest_index_by_key(*target, |item| *item)
    }

    /// Drops every element before the one nearest to `target`.
    pub fn trim_closest_start(&mut self, target: &T) -> usize {
        self.trim_closest_start_by_key(*target, |item| *item)
    }

    /// Drops every element after the one nearest to `target`.
    pub fn trim_closest_end(&mut self, target: &T) -> usize {
        self.trim_closest_end_by_key(*target, |item| *item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn samples() -> ArrayList<i64> {
        [0, 10, 20, 30, 40].into_iter().collect()
    }

    #[rstest]
    #[case(-5, 0)]
    #[case(0, 0)]
    #[case(4, 0)]
    #[case(5, 0)]
    #[case(6, 1)]
    #[case(20, 2)]
    #[case(39, 4)]
    #[case(100, 4)]
    fn test_closest_index(#[case] target: i64, #[case] expected: usize) {
        assert_eq!(samples().closest_index(&target), Some(expected));
    }

    #[rstest]
    fn test_closest_index_empty() {
        let list: ArrayList<i64> = ArrayList::new();
        assert_eq!(list.closest_index(&3), None);
    }

    #[rstest]
    fn test_trim_closest_start() {
        let mut list = samples();
        assert_eq!(list.trim_closest_start(&21), 2);
        assert_eq!(list.as_slice(), &[20, 30, 40]);
        assert_eq!(list.trim_closest_start(&-1), 0);
    }

    #[rstest]
    fn test_trim_closest_end() {
        let mut list = samples();
        assert_eq!(list.trim_closest_end(&12), 3);
        assert_eq!(list.as_slice(), &[0, 10]);
        assert_eq!(list.trim_closest_end(&500), 0);
    }

    #[rstest]
    fn test_closest_index_by_key_with_duplicates() {
        let list: ArrayList<(u32, char)> = [(1, 'a'), (1, 'b'), (3, 'c')].into_iter().collect();
        assert_eq!(list.closest_index_by_key(1, |pair| pair.0), Some(0));
        assert_eq!(list.closest_index_by_key(2, |pair| pair.0), Some(1));
    }
}
