//! Set-like helpers and key grouping on lists.
//!
//! Unlike [`OpenHashSet`], a list keeps duplicates and order. These helpers
//! treat the list as a sequence with set flavor: find or drop duplicates,
//! append only what is missing, subtract or intersect with another sequence,
//! and group by a caller-supplied key.

use std::collections::HashMap;
use std::hash::Hash;

use super::ArrayList;
use crate::hashset::OpenHashSet;

impl<T: Hash + Eq> ArrayList<T> {
    /// Returns the positions of first occurrences: `true` where an element
    /// has not been seen earlier in the list.
    fn first_occurrences(&self) -> Vec<bool> {
        let mut seen: OpenHashSet<&T> = OpenHashSet::with_capacity(self.len());
        self.items.iter().map(|item| seen.add(item)).collect()
    }

    /// Returns `true` if some element occurs more than once.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.first_occurrences().contains(&false)
    }

    /// Removes every repeated occurrence, keeping the first one, and returns
    /// how many were removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = [3, 1, 3, 2, 1].into_iter().collect();
    /// assert_eq!(list.remove_duplicates(), 2);
    /// assert_eq!(list.as_slice(), &[3, 1, 2]);
    /// ```
    pub fn remove_duplicates(&mut self) -> usize {
        let keep = self.first_occurrences();
        self.retain_positions(&keep)
    }
}

impl<T: Hash + Eq + Clone> ArrayList<T> {
    /// Returns each element that occurs more than once, in order of its
    /// second occurrence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let list: ArrayList<char> = "abcabca".chars().collect();
    /// assert_eq!(list.duplicates().as_slice(), &['a', 'b', 'c']);
    /// ```
    #[must_use]
    pub fn duplicates(&self) -> Self {
        let mut seen: OpenHashSet<&T> = OpenHashSet::with_capacity(self.len());
        let mut reported: OpenHashSet<&T> = OpenHashSet::new();
        let mut result = Self::new();
        for item in &self.items {
            if !seen.add(item) && reported.add(item) {
                result.add(item.clone());
            }
        }
        result
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Appends every element of `other` not already present and returns how
    /// many were appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = [1, 2].into_iter().collect();
    /// assert_eq!(list.union_with([2, 3, 3]), 1);
    /// assert_eq!(list.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn union_with<I: IntoIterator<Item = T>>(&mut self, other: I) -> usize {
        let start = self.len();
        for item in other {
            if !self.contains(&item) {
                self.grow_for(self.items.len() + 1);
                self.items.push(item);
            }
        }
        let added = self.len() - start;
        if added > 0 {
            self.notify_added(start, added);
        }
        added
    }

    /// Removes every element that also occurs in `other` and returns how
    /// many were removed.
    pub fn except_with<I: IntoIterator<Item = T>>(&mut self, other: I) -> usize {
        let other: Vec<T> = other.into_iter().collect();
        self.remove_all(|item| other.contains(item))
    }

    /// Keeps only the elements that also occur in `other` and returns how
    /// many were removed.
    pub fn intersect_with<I: IntoIterator<Item = T>>(&mut self, other: I) -> usize {
        let other: Vec<T> = other.into_iter().collect();
        self.remove_all(|item| !other.contains(item))
    }
}

impl<T> ArrayList<T> {
    /// Returns the distinct keys produced by `key`, in first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let words: ArrayList<&str> = ["apple", "avocado", "banana"].into_iter().collect();
    /// let initials = words.distinct_keys(|word| word.chars().next());
    /// assert_eq!(initials.as_slice(), &[Some('a'), Some('b')]);
    /// ```
    pub fn distinct_keys<K, F>(&self, key: F) -> ArrayList<K>
    where
        K: Hash + Eq,
        F: FnMut(&T) -> K,
    {
        // No removals happen, so slot order is first-seen order.
        let keys: OpenHashSet<K> = self.items.iter().map(key).collect();
        keys.into_iter().collect()
    }

    /// Groups clones of the elements by `key`. Groups appear in first-seen
    /// key order and keep the list order inside each group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let values: ArrayList<i32> = (1..=6).collect();
    /// let groups = values.group_by_key(|value| value % 3);
    ///
    /// assert_eq!(groups.len(), 3);
    /// assert_eq!(groups[0].0, 1);
    /// assert_eq!(groups[0].1.as_slice(), &[1, 4]);
    /// assert_eq!(groups[2].1.as_slice(), &[3, 6]);
    /// ```
    pub fn group_by_key<K, F>(&self, mut key: F) -> Vec<(K, Self)>
    where
        T: Clone,
        K: Hash + Eq + Clone,
        F: FnMut(&T) -> K,
    {
        let mut positions: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Self)> = Vec::new();
        for item in &self.items {
            let group_key = key(item);
            let position = *positions.entry(group_key.clone()).or_insert_with(|| {
                groups.push((group_key, Self::new()));
                groups.len() - 1
            });
            groups[position].1.add(item.clone());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_has_duplicates() {
        let unique: ArrayList<i32> = (0..10).collect();
        let repeated: ArrayList<i32> = [1, 2, 1].into_iter().collect();
        assert!(!unique.has_duplicates());
        assert!(repeated.has_duplicates());
    }

    #[rstest]
    fn test_duplicates_reported_once() {
        let list: ArrayList<i32> = [5, 5, 5, 6, 7, 6].into_iter().collect();
        assert_eq!(list.duplicates().as_slice(), &[5, 6]);
    }

    #[rstest]
    fn test_remove_duplicates_on_unique_list() {
        let mut list: ArrayList<i32> = (0..4).collect();
        assert_eq!(list.remove_duplicates(), 0);
        assert_eq!(list.as_slice(), &[0, 1, 2, 3]);
    }

    #[rstest]
    fn test_except_with() {
        let mut list: ArrayList<i32> = [1, 2, 3, 2, 4].into_iter().collect();
        assert_eq!(list.except_with([2, 4]), 3);
        assert_eq!(list.as_slice(), &[1, 3]);
    }

    #[rstest]
    fn test_intersect_with() {
        let mut list: ArrayList<i32> = [1, 2, 3, 2, 4].into_iter().collect();
        assert_eq!(list.intersect_with([2, 9]), 3);
        assert_eq!(list.as_slice(), &[2, 2]);
    }

    #[rstest]
    fn test_union_with_keeps_existing_duplicates() {
        let mut list: ArrayList<i32> = [1, 1].into_iter().collect();
        assert_eq!(list.union_with([1, 2]), 1);
        assert_eq!(list.as_slice(), &[1, 1, 2]);
    }

    #[rstest]
    fn test_group_by_key_strings() {
        let words: ArrayList<String> = ["bee", "ant", "bat", "cow", "ape"]
            .into_iter()
            .map(String::from)
            .collect();
        let groups = words.group_by_key(|word| word.chars().next());
        let keys: Vec<Option<char>> = groups.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, vec![Some('b'), Some('a'), Some('c')]);
        assert_eq!(groups[1].1.as_slice(), &["ant".to_string(), "ape".to_string()]);
    }

    #[rstest]
    fn test_distinct_keys_empty() {
        let list: ArrayList<i32> = ArrayList::new();
        assert!(list.distinct_keys(|value| *value).is_empty());
    }
}
