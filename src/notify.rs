//! Change notifications.
//!
//! A list with notifications enabled tells its observers about every
//! mutation: a [`Property`] signal for `Count` and the indexer, and a
//! [`CollectionChange`] describing what happened. Data-binding layers keep
//! cached views in sync from these events; [`CollectionChange::Reset`] means
//! "discard every cached view and re-read from scratch".
//!
//! When notifications are disabled no observer is called and no event is
//! built.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use flatcoll::list::ArrayList;
//! use flatcoll::notify::CollectionChange;
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//!
//! let mut list: ArrayList<i32> = ArrayList::new();
//! list.set_notify(true);
//! list.subscribe(Box::new(move |change: &CollectionChange<'_, i32>| {
//!     if let Ok(mut log) = sink.lock() {
//!         log.push(change.action());
//!     }
//! }));
//!
//! list.add(1);
//! list.sort();
//! assert_eq!(*log.lock().unwrap(), vec!["add", "reset"]);
//! ```

use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// Events
// =============================================================================

/// Observable properties of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The number of live elements.
    Count,
    /// The element at some index.
    Indexer,
}

/// A description of one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange<'a, T> {
    /// `items` were inserted starting at `index`.
    Add {
        /// The inserted elements.
        items: &'a [T],
        /// Position of the first inserted element.
        index: usize,
    },
    /// `items` were removed starting at `index`.
    Remove {
        /// The removed elements.
        items: &'a [T],
        /// Position the first removed element occupied.
        index: usize,
    },
    /// The element at `index` was overwritten.
    Replace {
        /// Previous element.
        old: &'a T,
        /// New element.
        new: &'a T,
        /// Position of the replacement.
        index: usize,
    },
    /// `item` moved from `old_index` to `new_index`.
    Move {
        /// The moved element.
        item: &'a T,
        /// Position before the move.
        old_index: usize,
        /// Position after the move.
        new_index: usize,
    },
    /// Bulk change; observers must re-read everything.
    Reset,
}

impl<T> CollectionChange<'_, T> {
    /// Short lowercase name of the action.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Move { .. } => "move",
            Self::Reset => "reset",
        }
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Receives change notifications.
///
/// Closures taking a `&CollectionChange<'_, T>` implement this trait and
/// ignore property signals.
pub trait ChangeObserver<T> {
    /// Called once per affected property, before [`collection_changed`].
    ///
    /// [`collection_changed`]: ChangeObserver::collection_changed
    fn property_changed(&mut self, property: Property) {
        let _ = property;
    }

    /// Called once per mutation.
    fn collection_changed(&mut self, change: &CollectionChange<'_, T>);
}

impl<T, F> ChangeObserver<T> for F
where
    F: for<'a> FnMut(&CollectionChange<'a, T>),
{
    fn collection_changed(&mut self, change: &CollectionChange<'_, T>) {
        self(change);
    }
}

/// An observer as stored by a list. Observers are `Send` so a list of
/// `Send` elements can move between threads.
pub type BoxedObserver<T> = Box<dyn ChangeObserver<T> + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

// =============================================================================
// Notifier
// =============================================================================

/// Observer registry plus the enabled flag.
pub(crate) struct Notifier<T> {
    enabled: bool,
    next_id: u64,
    observers: SmallVec<[(SubscriptionId, BoxedObserver<T>); 2]>,
}

impl<T> Notifier<T> {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            next_id: 0,
            observers: SmallVec::new(),
        }
    }

    #[inline]
    pub(crate) const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True when an event would reach at least one observer.
    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.enabled && !self.observers.is_empty()
    }

    pub(crate) fn subscribe(&mut self, observer: BoxedObserver<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Sends `change` to every observer. `Count` is signalled only when the
    /// change altered the number of elements.
    pub(crate) fn emit(&mut self, change: &CollectionChange<'_, T>) {
        if !self.is_active() {
            return;
        }
        let count_changed = !matches!(
            change,
            CollectionChange::Replace { .. } | CollectionChange::Move { .. }
        );
        for (_, observer) in &mut self.observers {
            if count_changed {
                observer.property_changed(Property::Count);
            }
            observer.property_changed(Property::Indexer);
            observer.collection_changed(change);
        }
    }
}

impl<T> Clone for Notifier<T> {
    /// Observers belong to the instance they subscribed to; a clone starts
    /// with none.
    fn clone(&self) -> Self {
        Self::new(self.enabled)
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Notifier")
            .field("enabled", &self.enabled)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        properties: Arc<Mutex<Vec<Property>>>,
        actions: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ChangeObserver<i32> for Recorder {
        fn property_changed(&mut self, property: Property) {
            self.properties.lock().unwrap().push(property);
        }

        fn collection_changed(&mut self, change: &CollectionChange<'_, i32>) {
            self.actions.lock().unwrap().push(change.action());
        }
    }

    #[rstest]
    fn test_disabled_notifier_is_silent() {
        let recorder = Recorder::default();
        let actions = Arc::clone(&recorder.actions);
        let mut notifier: Notifier<i32> = Notifier::new(false);
        notifier.subscribe(Box::new(recorder));

        notifier.emit(&CollectionChange::Reset);
        assert!(actions.lock().unwrap().is_empty());
    }

    #[rstest]
    fn test_replace_signals_indexer_only() {
        let recorder = Recorder::default();
        let properties = Arc::clone(&recorder.properties);
        let mut notifier: Notifier<i32> = Notifier::new(true);
        notifier.subscribe(Box::new(recorder));

        notifier.emit(&CollectionChange::Replace {
            old: &1,
            new: &2,
            index: 0,
        });
        assert_eq!(*properties.lock().unwrap(), vec![Property::Indexer]);
    }

    #[rstest]
    fn test_add_signals_count_and_indexer() {
        let recorder = Recorder::default();
        let properties = Arc::clone(&recorder.properties);
        let mut notifier: Notifier<i32> = Notifier::new(true);
        notifier.subscribe(Box::new(recorder));

        notifier.emit(&CollectionChange::Add {
            items: &[7],
            index: 0,
        });
        assert_eq!(
            *properties.lock().unwrap(),
            vec![Property::Count, Property::Indexer]
        );
    }

    #[rstest]
    fn test_unsubscribe() {
        let mut notifier: Notifier<i32> = Notifier::new(true);
        let first = notifier.subscribe(Box::new(|_: &CollectionChange<'_, i32>| {}));
        let second = notifier.subscribe(Box::new(|_: &CollectionChange<'_, i32>| {}));
        assert_ne!(first, second);
        assert!(notifier.unsubscribe(first));
        assert!(!notifier.unsubscribe(first));
        assert_eq!(notifier.observer_count(), 1);
    }

    #[rstest]
    fn test_clone_drops_observers() {
        let mut notifier: Notifier<i32> = Notifier::new(true);
        notifier.subscribe(Box::new(|_: &CollectionChange<'_, i32>| {}));
        let cloned = notifier.clone();
        assert!(cloned.is_enabled());
        assert_eq!(cloned.observer_count(), 0);
    }
}
