//! Per-column header interaction controller.
//!
//! One controller exists per column header and owns the column's transient
//! interaction state: the sort-cycle trigger, the filter popup visibility,
//! and the distinct-value list the popup offers. Durable state lives
//! elsewhere - the sort spec on the data source, filter conditions in the
//! shared [`FilterContext`](crate::data::FilterContext) - and the controller
//! only coordinates it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use trellis_core::ConnectionId;

use crate::data::{
    DataSourcePager, FilterCondition, Result, SortDirection, SortSpec, Value, ViewOptions,
};

use super::column::GridColumn;
use super::container::Grid;

/// Header interaction controller for one column, obtained from
/// [`Grid::header_controller`].
///
/// Subscribes to the grid's filter context at construction and unsubscribes
/// on drop, so a mounted header always tracks filter changes made by other
/// columns and a dropped one never leaks its slot.
pub struct HeaderController<T> {
    grid: Arc<Grid<T>>,
    column_index: usize,
    filter_visible: Arc<AtomicBool>,
    refresh_pending: Arc<AtomicBool>,
    connection: ConnectionId,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> HeaderController<T> {
    pub(super) fn new(grid: Arc<Grid<T>>, column_index: usize) -> Self {
        let filter_visible = Arc::new(AtomicBool::new(false));
        let refresh_pending = Arc::new(AtomicBool::new(false));

        // Another column changing the shared filter invalidates this
        // column's distinct-value list; flag a refresh while the popup is
        // open so the render layer can re-request the values.
        let visible = filter_visible.clone();
        let pending = refresh_pending.clone();
        let connection = grid.filter_context().on_change.connect(move |_| {
            if visible.load(Ordering::SeqCst) {
                pending.store(true, Ordering::SeqCst);
            }
        });

        Self {
            grid,
            column_index,
            filter_visible,
            refresh_pending,
            connection,
        }
    }

    /// The column this controller drives, if the index is still in range.
    pub fn column(&self) -> Option<&GridColumn<T>> {
        self.grid.columns().get(self.column_index)
    }

    fn field(&self) -> Option<&str> {
        self.column()?.field.as_deref()
    }

    /// The column's current sort direction.
    ///
    /// Defined only when exactly one entry of the view's sort spec targets
    /// this column's field; zero or several matches yield `None`.
    pub fn sort_direction(&self) -> Option<SortDirection> {
        let field = self.field()?;
        let view = self.grid.data_source().view()?;
        let mut matching = view.sorted_by.iter().filter(|spec| spec.field == field);
        let first = matching.next()?;
        if matching.next().is_some() {
            return None;
        }
        Some(first.direction)
    }

    /// Advances the column's sort cycle and re-binds the data source.
    ///
    /// The active field cycles ascending, descending, unsorted; triggering a
    /// different column starts it at ascending. Each transition replaces the
    /// sort spec wholesale, so at most one field is ever sorted. Non-sortable
    /// columns and columns without a field ignore the trigger.
    pub async fn toggle_sort(&self) -> Result<()> {
        let Some(column) = self.column() else {
            return Ok(());
        };
        if !column.is_sortable {
            return Ok(());
        }
        let Some(field) = column.field.clone() else {
            return Ok(());
        };

        let next = match self.sort_direction() {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };
        tracing::debug!(target: "trellis::grid", field, ?next, "sort transition");

        let sorted_by = match next {
            Some(direction) => vec![SortSpec::new(field, direction)],
            None => Vec::new(),
        };
        let source = self.grid.data_source();
        source.sort(sorted_by);
        source.data_bind(false).await?;
        Ok(())
    }

    /// Whether the filter popup is open.
    pub fn is_filter_visible(&self) -> bool {
        self.filter_visible.load(Ordering::SeqCst)
    }

    /// Opens or closes the filter popup. Touches nothing else.
    pub fn toggle_filter_visible(&self) {
        self.filter_visible.fetch_xor(true, Ordering::SeqCst);
    }

    /// Whether this column's field currently has an active filter condition.
    pub fn is_filtered(&self) -> bool {
        match self.field() {
            Some(field) => self.grid.filter_context().get(field).is_some(),
            None => false,
        }
    }

    /// Consumes the pending refresh request, if one was raised by a filter
    /// change while the popup was open.
    pub fn take_refresh_request(&self) -> bool {
        self.refresh_pending.swap(false, Ordering::SeqCst)
    }

    /// Replaces this column's filter condition with the given values and
    /// re-binds the data source under the updated composite filter.
    ///
    /// No values removes the condition; a single value filters by
    /// containment; several values filter by membership. Columns without a
    /// field ignore the call.
    pub async fn apply_filter(&self, values: Vec<Value>) -> Result<()> {
        let Some(field) = self.field().map(str::to_owned) else {
            return Ok(());
        };

        let context = self.grid.filter_context();
        let mut values = values;
        match values.len() {
            0 => context.delete(&[field.as_str()]),
            1 => context.add(FilterCondition::contains(field, values.remove(0))),
            _ => context.add(FilterCondition::match_any(field, values)),
        }

        let source = self.grid.data_source();
        source.filter(context.expression());
        source.data_bind(true).await?;
        Ok(())
    }

    /// The distinct values of this column's field over the dataset with
    /// every filter except this column's own applied.
    ///
    /// Excluding the column's own condition keeps alternative choices
    /// offered: filtering a state column to `CA` must still list the other
    /// states reachable under the remaining filters. The suppression happens
    /// on a deep clone of the filter context, and the data source is
    /// restored to the original composite filter before returning, so no
    /// externally visible state changes.
    ///
    /// Returns `Ok(None)` when no view is materialized or the column has no
    /// field; missing values are dropped and first-occurrence order is kept.
    pub async fn filter_values(&self) -> Result<Option<Vec<Value>>> {
        let Some(field) = self.field().map(str::to_owned) else {
            return Ok(None);
        };
        let source = self.grid.data_source();
        if source.view().is_none() {
            return Ok(None);
        }

        let context = self.grid.filter_context();
        let suppressed = context.get(&field).is_some();
        if suppressed {
            let scratch = context.deep_clone();
            scratch.delete(&[field.as_str()]);
            source.filter(scratch.expression());
            source.data_bind(true).await?;
        }

        let values = match source.view() {
            Some(view) => {
                // Candidates come from the complete scope, not the resident
                // page; fetch it when the source does not keep it around.
                let items: Vec<T> = match view.all_data() {
                    Some(all) => all.to_vec(),
                    None if DataSourcePager::new(source.as_ref()).page_count() > 1 => {
                        source
                            .get_view(ViewOptions {
                                filtered_by: view.filtered_by.clone(),
                                sorted_by: view.sorted_by.clone(),
                            })
                            .await?
                            .data
                            .clone()
                    }
                    None => view.data.clone(),
                };
                let accessor = source.field_accessor();
                let mut distinct: Vec<Value> = Vec::new();
                for item in &items {
                    let value = accessor.get_value(item, &field);
                    if value.is_none() || distinct.contains(&value) {
                        continue;
                    }
                    distinct.push(value);
                }
                Some(distinct)
            }
            None => None,
        };

        if suppressed {
            source.filter(context.expression());
            source.data_bind(true).await?;
        }
        Ok(values)
    }
}

impl<T> Drop for HeaderController<T> {
    fn drop(&mut self) {
        self.grid.filter_context().on_change.disconnect(self.connection);
    }
}
