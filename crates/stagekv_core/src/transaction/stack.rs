//! Stack of overlay layers.

use crate::transaction::overlay::Overlay;
use crate::types::Value;
use std::collections::HashMap;

/// Where a committed layer's writes went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeTarget {
    /// Folded into the enclosing layer; the transaction is still open.
    Parent,
    /// Applied to the committed base state.
    Base,
}

/// Ordered stack of overlay layers, bottom first.
///
/// An empty stack means no transaction is open. Reads resolve from the top
/// layer downwards; the first layer holding the key wins.
#[derive(Debug, Default)]
pub(crate) struct OverlayStack {
    layers: Vec<Overlay>,
}

impl OverlayStack {
    /// Creates an empty stack.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open layers.
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layer is open.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Opens a new empty layer on top.
    pub(crate) fn push(&mut self) {
        self.layers.push(Overlay::new());
    }

    /// Removes the top layer and returns it.
    pub(crate) fn pop(&mut self) -> Option<Overlay> {
        self.layers.pop()
    }

    /// Returns the top layer for writing.
    pub(crate) fn top_mut(&mut self) -> Option<&mut Overlay> {
        self.layers.last_mut()
    }

    /// Resolves a key against the open layers, top to bottom.
    #[must_use]
    pub(crate) fn resolve(&self, key: &str) -> Option<Value> {
        self.layers.iter().rev().find_map(|layer| layer.get(key))
    }

    /// Detaches the top layer and merges it into the layer beneath, or into
    /// `base` when it was the last one.
    ///
    /// Returns the merge target and the number of writes carried, or `None`
    /// when no layer is open.
    pub(crate) fn commit_top(
        &mut self,
        base: &mut HashMap<String, Value>,
    ) -> Option<(MergeTarget, usize)> {
        let top = self.layers.pop()?;
        let count = top.len();

        match self.layers.last_mut() {
            Some(parent) => {
                parent.absorb(top);
                Some((MergeTarget::Parent, count))
            }
            None => {
                base.extend(top.into_writes());
                Some((MergeTarget::Base, count))
            }
        }
    }

    /// Returns the effective staged writes across all layers.
    #[must_use]
    pub(crate) fn flattened(&self) -> HashMap<&str, Value> {
        let mut view = HashMap::new();
        for layer in &self.layers {
            view.extend(layer.iter());
        }
        view
    }

    /// Returns the number of distinct keys staged across all layers.
    #[must_use]
    pub(crate) fn pending_len(&self) -> usize {
        match self.layers.as_slice() {
            [] => 0,
            [only] => only.len(),
            _ => self.flattened().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_with(layers: &[&[(&str, Value)]]) -> OverlayStack {
        let mut stack = OverlayStack::new();
        for writes in layers {
            stack.push();
            let top = stack.top_mut().unwrap();
            for (k, v) in *writes {
                top.put((*k).to_string(), *v);
            }
        }
        stack
    }

    #[test]
    fn empty_stack_resolves_nothing() {
        let stack = OverlayStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.resolve("a"), None);
        assert_eq!(stack.pending_len(), 0);
    }

    #[test]
    fn top_layer_shadows_lower() {
        let stack = stack_with(&[&[("a", 1), ("b", 2)], &[("a", 10)]]);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.resolve("a"), Some(10));
        assert_eq!(stack.resolve("b"), Some(2));
        assert_eq!(stack.resolve("c"), None);
    }

    #[test]
    fn commit_last_layer_merges_into_base() {
        let mut stack = stack_with(&[&[("a", 1), ("b", 2)]]);
        let mut base = HashMap::from([("b".to_string(), 0), ("z".to_string(), 9)]);

        let outcome = stack.commit_top(&mut base);

        assert_eq!(outcome, Some((MergeTarget::Base, 2)));
        assert!(stack.is_empty());
        assert_eq!(base.get("a"), Some(&1));
        assert_eq!(base.get("b"), Some(&2));
        assert_eq!(base.get("z"), Some(&9));
    }

    #[test]
    fn commit_inner_layer_merges_into_parent() {
        let mut stack = stack_with(&[&[("a", 1)], &[("a", 2), ("b", 3)]]);
        let mut base = HashMap::new();

        let outcome = stack.commit_top(&mut base);

        assert_eq!(outcome, Some((MergeTarget::Parent, 2)));
        assert!(base.is_empty());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.resolve("a"), Some(2));
        assert_eq!(stack.resolve("b"), Some(3));
    }

    #[test]
    fn commit_on_empty_stack_is_none() {
        let mut stack = OverlayStack::new();
        let mut base = HashMap::new();
        assert_eq!(stack.commit_top(&mut base), None);
    }

    #[test]
    fn pop_discards_only_top() {
        let mut stack = stack_with(&[&[("a", 1)], &[("a", 2)]]);
        let popped = stack.pop().unwrap();
        assert_eq!(popped.get("a"), Some(2));
        assert_eq!(stack.resolve("a"), Some(1));
    }

    #[test]
    fn pending_len_counts_distinct_keys() {
        let stack = stack_with(&[&[("a", 1), ("b", 2)], &[("a", 3), ("c", 4)]]);
        assert_eq!(stack.pending_len(), 3);

        let flat = stack.flattened();
        assert_eq!(flat.get("a"), Some(&3));
        assert_eq!(flat.get("c"), Some(&4));
    }
}
