//! Shared per-field filter-condition registry.
//!
//! One [`FilterContext`] is owned by the grid container and shared by
//! reference with every header controller; controllers hold no duplicate
//! filter state. All mutation goes through [`add`](FilterContext::add) and
//! [`delete`](FilterContext::delete) so the [`on_change`](FilterContext::on_change)
//! channel remains the sole source of truth for filter changes.

use parking_lot::RwLock;

use trellis_core::Signal;

use super::expression::{Expression, FilterCondition};

/// Registry of active filter conditions, at most one per field.
///
/// # Change Notification
///
/// `on_change` is multicast and synchronous: it fires after every `add` or
/// `delete` commits, and every subscriber runs before the mutating call
/// returns. The write lock is released first, so subscribers may re-enter
/// [`get`](Self::get) or [`expression`](Self::expression).
pub struct FilterContext {
    /// Active conditions in field insertion order.
    conditions: RwLock<Vec<FilterCondition>>,

    /// Emitted after a condition is added, replaced, or removed.
    pub on_change: Signal<()>,
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterContext {
    /// Creates an empty filter context.
    pub fn new() -> Self {
        Self {
            conditions: RwLock::new(Vec::new()),
            on_change: Signal::new(),
        }
    }

    /// Adds a condition, replacing any existing condition for the same
    /// field.
    ///
    /// Fires `on_change` after the mutation commits.
    pub fn add(&self, condition: FilterCondition) {
        {
            let mut conditions = self.conditions.write();
            match conditions.iter_mut().find(|c| c.field == condition.field) {
                Some(existing) => *existing = condition,
                None => conditions.push(condition),
            }
        }
        tracing::debug!(target: "trellis::filter", "filter condition committed");
        self.on_change.emit(());
    }

    /// Removes the conditions for the given fields.
    ///
    /// Fires `on_change` once if anything was removed.
    pub fn delete<S: AsRef<str>>(&self, fields: &[S]) {
        let removed = {
            let mut conditions = self.conditions.write();
            let before = conditions.len();
            conditions.retain(|c| !fields.iter().any(|f| f.as_ref() == c.field));
            before != conditions.len()
        };
        if removed {
            tracing::debug!(target: "trellis::filter", "filter condition(s) removed");
            self.on_change.emit(());
        }
    }

    /// Returns the condition for a field, if one is active.
    pub fn get(&self, field: &str) -> Option<FilterCondition> {
        self.conditions
            .read()
            .iter()
            .find(|c| c.field == field)
            .cloned()
    }

    /// Derives the composite expression from all active conditions.
    pub fn expression(&self) -> Expression {
        Expression::from_conditions(self.conditions.read().iter().cloned())
    }

    /// Returns an independent copy of this context.
    ///
    /// The copy carries the same conditions but a fresh, unsubscribed change
    /// channel, so it can be mutated speculatively without disturbing the
    /// shared instance or notifying its subscribers.
    pub fn deep_clone(&self) -> FilterContext {
        FilterContext {
            conditions: RwLock::new(self.conditions.read().clone()),
            on_change: Signal::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_add_and_get_round_trip() {
        let context = FilterContext::new();
        let condition = FilterCondition::contains("name", "Ali");

        context.add(condition.clone());
        assert_eq!(context.get("name"), Some(condition));
    }

    #[test]
    fn test_add_replaces_existing_condition() {
        let context = FilterContext::new();
        context.add(FilterCondition::contains("name", "a"));
        context.add(FilterCondition::match_any("name", [Value::from("b")]));

        let active = context.get("name").unwrap();
        assert_eq!(active.values, vec![Value::from("b")]);
        assert_eq!(context.expression().conditions().len(), 1);
    }

    #[test]
    fn test_delete() {
        let context = FilterContext::new();
        context.add(FilterCondition::contains("name", "a"));
        context.add(FilterCondition::contains("age", 30i64));

        context.delete(&["name"]);
        assert_eq!(context.get("name"), None);
        assert!(context.get("age").is_some());
    }

    #[test]
    fn test_expression_preserves_insertion_order() {
        let context = FilterContext::new();
        context.add(FilterCondition::contains("b", "1"));
        context.add(FilterCondition::contains("a", "2"));

        let fields: Vec<_> = context
            .expression()
            .conditions()
            .iter()
            .map(|c| c.field.clone())
            .collect();
        assert_eq!(fields, vec!["b", "a"]);
    }

    #[test]
    fn test_on_change_fires_after_commit() {
        let context = Arc::new(FilterContext::new());
        let observed = Arc::new(AtomicUsize::new(0));

        let context_clone = context.clone();
        let observed_clone = observed.clone();
        context.on_change.connect(move |_| {
            // The mutation must be visible from inside the notification.
            let count = context_clone.expression().conditions().len();
            observed_clone.store(count, Ordering::SeqCst);
        });

        context.add(FilterCondition::contains("name", "x"));
        assert_eq!(observed.load(Ordering::SeqCst), 1);

        context.delete(&["name"]);
        assert_eq!(observed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delete_missing_field_does_not_notify() {
        let context = FilterContext::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = fired.clone();
        context.on_change.connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        context.delete(&["nothing"]);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let context = FilterContext::new();
        context.add(FilterCondition::contains("name", "x"));

        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        context.on_change.connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        let clone = context.deep_clone();
        assert!(clone.get("name").is_some());

        // Mutating the clone affects neither the source's conditions nor its
        // subscribers.
        clone.delete(&["name"]);
        clone.add(FilterCondition::contains("age", 1i64));

        assert!(context.get("name").is_some());
        assert!(context.get("age").is_none());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
