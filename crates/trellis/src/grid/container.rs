//! The grid container: coordinated selection, sort, and filter state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::data::{DataSource, FilterContext};

use super::column::GridColumn;
use super::header::HeaderController;
use super::selector::GridSelector;

/// Selection behaviour of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Selection is disabled; all selection triggers are ignored.
    #[default]
    None,
    /// At most one item is selected at a time.
    Single,
    /// Any number of items may be selected.
    Multiple,
}

/// Callback invoked after a selection mutation commits.
///
/// Receives the grid (post-mutation) and the items the triggering operation
/// added or removed.
pub type SelectionCallback<T> = Arc<dyn Fn(&Grid<T>, &[T]) + Send + Sync>;

/// The grid container.
///
/// Owns the pieces the interaction layer coordinates: the data source, the
/// shared [`FilterContext`], the column configurations, and the selection.
/// Interaction goes through [`selector`](Grid::selector) and
/// [`header_controller`](Grid::header_controller); the container itself only
/// holds state.
///
/// Selection callbacks run strictly after the mutation committed and the
/// selection lock was released, so they observe post-mutation state and may
/// re-enter selection queries.
pub struct Grid<T> {
    source: Arc<dyn DataSource<T>>,
    filter_context: Arc<FilterContext>,
    columns: Vec<GridColumn<T>>,
    selection_mode: SelectionMode,
    selection: RwLock<Vec<T>>,
    on_select: Option<SelectionCallback<T>>,
    on_unselect: Option<SelectionCallback<T>>,
}

impl<T> Grid<T> {
    /// The grid's data source.
    pub fn data_source(&self) -> &Arc<dyn DataSource<T>> {
        &self.source
    }

    /// The shared filter-condition registry.
    pub fn filter_context(&self) -> &Arc<FilterContext> {
        &self.filter_context
    }

    /// The column configurations, in display order.
    pub fn columns(&self) -> &[GridColumn<T>] {
        &self.columns
    }

    /// The active selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub(super) fn selection(&self) -> &RwLock<Vec<T>> {
        &self.selection
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Grid<T> {
    /// A snapshot of the selected items, in selection order.
    pub fn selected_items(&self) -> Vec<T> {
        self.selection.read().clone()
    }

    /// The selection manager for this grid.
    pub fn selector(&self) -> GridSelector<'_, T> {
        GridSelector::new(self)
    }

    /// A header interaction controller for the given column, or `None` when
    /// the index is out of range.
    pub fn header_controller(self: &Arc<Self>, column_index: usize) -> Option<HeaderController<T>> {
        (column_index < self.columns.len())
            .then(|| HeaderController::new(Arc::clone(self), column_index))
    }

    pub(super) fn notify_select(&self, items: &[T]) {
        tracing::debug!(
            target: "trellis::selection",
            count = items.len(),
            "selection committed"
        );
        if let Some(callback) = &self.on_select {
            callback(self, items);
        }
    }

    pub(super) fn notify_unselect(&self, items: &[T]) {
        tracing::debug!(
            target: "trellis::selection",
            count = items.len(),
            "unselection committed"
        );
        if let Some(callback) = &self.on_unselect {
            callback(self, items);
        }
    }
}

/// Builder for [`Grid`].
pub struct GridBuilder<T> {
    source: Arc<dyn DataSource<T>>,
    selection_mode: SelectionMode,
    columns: Vec<GridColumn<T>>,
    on_select: Option<SelectionCallback<T>>,
    on_unselect: Option<SelectionCallback<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> GridBuilder<T> {
    /// Starts a builder over the given data source.
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            source,
            selection_mode: SelectionMode::default(),
            columns: Vec::new(),
            on_select: None,
            on_unselect: None,
        }
    }

    /// Sets the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Appends a column.
    pub fn column(mut self, column: GridColumn<T>) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends several columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = GridColumn<T>>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Sets the callback fired after items are selected.
    pub fn on_select(mut self, callback: impl Fn(&Grid<T>, &[T]) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    /// Sets the callback fired after items are unselected.
    pub fn on_unselect(
        mut self,
        callback: impl Fn(&Grid<T>, &[T]) + Send + Sync + 'static,
    ) -> Self {
        self.on_unselect = Some(Arc::new(callback));
        self
    }

    /// Builds the grid.
    pub fn build(self) -> Arc<Grid<T>> {
        Arc::new(Grid {
            source: self.source,
            filter_context: Arc::new(FilterContext::new()),
            columns: self.columns,
            selection_mode: self.selection_mode,
            selection: RwLock::new(Vec::new()),
            on_select: self.on_select,
            on_unselect: self.on_unselect,
        })
    }
}
