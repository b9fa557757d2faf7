//! Entrance animation bookkeeping
//!
//! Elements carrying one of the [`ANIMATION_CLASSES`] start hidden (by CSS)
//! and get [`VISIBLE_CLASS`] the first time they scroll into view. The
//! transition is one-way: once revealed, an element is never hidden again
//! and never observed again.
//!
//! [`RevealTracker`] holds that state independently of any DOM, keyed by
//! whatever identifies an element in the host environment. The browser
//! binding drives it from an `IntersectionObserver`.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::AnimationConfig;

/// Marker classes that opt an element into entrance animation
pub const ANIMATION_CLASSES: [&str; 5] = [
    "animate-on-scroll",
    "animate-fade",
    "animate-left",
    "animate-right",
    "animate-scale",
];

/// Class added once an element has been revealed
pub const VISIBLE_CLASS: &str = "visible";

/// Containers whose children animate one after another
pub const STAGGER_SELECTOR: &str = ".stagger";

/// Custom property carrying a child's position in a stagger container
pub const STAGGER_PROPERTY: &str = "--stagger-i";

/// CSS selector matching every animatable element
pub fn animation_selector() -> String {
    ANIMATION_CLASSES
        .iter()
        .map(|c| format!(".{}", c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Values for [`STAGGER_PROPERTY`] on each of `count` children
pub fn stagger_indices(count: usize) -> impl Iterator<Item = String> {
    (0..count).map(|i| i.to_string())
}

/// Options for the shared reveal observer
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl From<&AnimationConfig> for ObserverOptions {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin(),
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

/// Reveal state for every element the observer has seen
#[derive(Debug)]
pub struct RevealTracker<K> {
    observed: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            observed: HashSet::new(),
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick which candidates to start observing
    ///
    /// `candidates` yields each matching element with whether it already
    /// carries the visible class. Visible, revealed and already observed
    /// elements are skipped, so calling this repeatedly is safe.
    pub fn scan<I>(&mut self, candidates: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut to_observe = Vec::new();
        for (key, visible) in candidates {
            if visible {
                self.revealed.insert(key);
                continue;
            }
            if self.revealed.contains(&key) || self.observed.contains(&key) {
                continue;
            }
            self.observed.insert(key.clone());
            to_observe.push(key);
        }
        to_observe
    }

    /// Handle an intersection callback
    ///
    /// Returns the elements to reveal and stop observing: every intersecting
    /// entry that is currently observed.
    pub fn intersect<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut to_reveal = Vec::new();
        for (key, intersecting) in entries {
            if intersecting && self.observed.remove(&key) {
                self.revealed.insert(key.clone());
                to_reveal.push(key);
            }
        }
        to_reveal
    }

    pub fn is_observed(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector() {
        assert_eq!(
            animation_selector(),
            ".animate-on-scroll,.animate-fade,.animate-left,.animate-right,.animate-scale"
        );
    }

    #[test]
    fn test_default_options() {
        let options = ObserverOptions::default();
        assert_eq!(options.threshold, 0.10);
        assert_eq!(options.root_margin, "0px 0px -30px 0px");
    }

    #[test]
    fn test_stagger_indices() {
        let values: Vec<String> = stagger_indices(3).collect();
        assert_eq!(values, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_scan_skips_visible_elements() {
        let mut tracker = RevealTracker::new();
        let observed = tracker.scan(vec![(1, false), (2, true), (3, false)]);
        assert_eq!(observed, vec![1, 3]);
        assert!(tracker.is_revealed(&2));
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.scan(vec![(1, false), (2, false)]), vec![1, 2]);
        assert!(tracker.scan(vec![(1, false), (2, false)]).is_empty());

        // element 1 revealed; dynamically inserted element 3 appears
        assert_eq!(tracker.intersect(vec![(1, true), (2, false)]), vec![1]);
        let observed = tracker.scan(vec![(1, true), (2, false), (3, false)]);
        assert_eq!(observed, vec![3]);
        assert_eq!(tracker.observed_count(), 2);
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut tracker = RevealTracker::new();
        tracker.scan(vec![("a", false)]);
        assert_eq!(tracker.intersect(vec![("a", true)]), vec!["a"]);

        // leaving and re-entering the viewport does nothing
        assert!(tracker.intersect(vec![("a", false), ("a", true)]).is_empty());
        // even if the class was stripped, the element is not observed again
        assert!(tracker.scan(vec![("a", false)]).is_empty());
        assert!(!tracker.is_observed(&"a"));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_intersect_ignores_unobserved() {
        let mut tracker: RevealTracker<u32> = RevealTracker::new();
        assert!(tracker.intersect(vec![(9, true)]).is_empty());
        assert!(!tracker.is_revealed(&9));
    }
}
