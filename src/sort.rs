//! Ordering of changes for output.
//!
//! Changes are ordered by the position of their component in
//! [`Config::components`], then by the position of their kind in
//! [`Config::kinds`], then by time. A list that is empty in the config does not
//! take part in the ordering.

use std::cmp::Ordering;

use crate::change::Change;
use crate::config::Config;

/// Comparator built from the configured component and kind order.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSorter<'a> {
    components: &'a [String],
    kinds: &'a [String],
}

impl<'a> ChangeSorter<'a> {
    pub fn new(config: &'a Config) -> Self {
        ChangeSorter {
            components: &config.components,
            kinds: &config.kinds,
        }
    }

    /// Compare two changes: component index, then kind index, then time.
    pub fn compare(&self, a: &Change, b: &Change) -> Ordering {
        rank(self.components, &a.component)
            .cmp(&rank(self.components, &b.component))
            .then_with(|| rank(self.kinds, &a.kind).cmp(&rank(self.kinds, &b.kind)))
            .then_with(|| a.time.cmp(&b.time))
    }

    /// Sort in place. Changes that compare equal keep their input order.
    pub fn sort(&self, changes: &mut [Change]) {
        changes.sort_by(|a, b| self.compare(a, b));
    }
}

/// Position of `value` in `order`. Values missing from a non-empty list rank
/// after every listed value; an empty list ranks everything equally.
fn rank(order: &[String], value: &str) -> usize {
    if order.is_empty() {
        return 0;
    }
    order
        .iter()
        .position(|item| item == value)
        .unwrap_or(order.len())
}
