//! Selection manager.
//!
//! All selection mutations follow the same shape: mutate under the write
//! lock, release it, then invoke the matching callback with the items the
//! operation touched. Callbacks therefore always observe committed state.
//!
//! Item identity is plain equality on `T`; the grid never assumes an id
//! field.

use crate::data::{DataSourcePager, Result, ViewOptions};

use super::container::{Grid, SelectionMode};

/// Selection manager for a grid, obtained from [`Grid::selector`].
pub struct GridSelector<'g, T> {
    grid: &'g Grid<T>,
}

impl<'g, T: Clone + PartialEq + Send + Sync + 'static> GridSelector<'g, T> {
    pub(super) fn new(grid: &'g Grid<T>) -> Self {
        Self { grid }
    }

    /// Returns `true` if `item` is selected.
    pub fn is_selected(&self, item: &T) -> bool {
        self.grid.selection().read().contains(item)
    }

    /// Returns `true` if every item in the current view's scope is selected.
    ///
    /// Compares the selection length against the view's total count across
    /// all pages; `false` when no view is materialized.
    pub fn is_all_selected(&self) -> bool {
        let Some(view) = self.grid.data_source().view() else {
            return false;
        };
        self.grid.selection().read().len() == view.total_count
    }

    /// Selects `item`.
    ///
    /// Ignored when the selection mode is [`SelectionMode::None`] or the item
    /// is already selected. Under [`SelectionMode::Single`] the previous
    /// selection is cleared first. Fires `on_select` with the item after the
    /// mutation commits.
    pub fn select(&self, item: &T) {
        if self.grid.selection_mode() == SelectionMode::None {
            return;
        }
        {
            let mut selection = self.grid.selection().write();
            if selection.contains(item) {
                return;
            }
            if self.grid.selection_mode() == SelectionMode::Single {
                selection.clear();
            }
            selection.push(item.clone());
        }
        self.grid.notify_select(std::slice::from_ref(item));
    }

    /// Unselects `item` if it is selected.
    ///
    /// Fires `on_unselect` with the item after the mutation commits.
    pub fn unselect(&self, item: &T) {
        let removed = {
            let mut selection = self.grid.selection().write();
            match selection.iter().position(|selected| selected == item) {
                Some(index) => {
                    selection.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.grid.notify_unselect(std::slice::from_ref(item));
        }
    }

    /// Selects `item` if unselected, unselects it otherwise.
    pub fn select_or_unselect(&self, item: &T) {
        if self.is_selected(item) {
            self.unselect(item);
        } else {
            self.select(item);
        }
    }

    /// Selects every item in the current view's scope.
    ///
    /// When the scope spans more than one page, a dedicated full-scope fetch
    /// runs under the view's own filter and sort; a single-page scope reuses
    /// the resident page data without refetching. The selection is replaced
    /// wholesale and `on_select` fires exactly once with the full result.
    ///
    /// No-op when no view is materialized or the mode is not
    /// [`SelectionMode::Multiple`].
    pub async fn select_all(&self) -> Result<()> {
        if self.grid.selection_mode() != SelectionMode::Multiple {
            return Ok(());
        }
        let source = self.grid.data_source();
        let Some(view) = source.view() else {
            return Ok(());
        };

        let items: Vec<T> = if DataSourcePager::new(source.as_ref()).page_count() > 1 {
            let fetched = source
                .get_view(ViewOptions {
                    filtered_by: view.filtered_by.clone(),
                    sorted_by: view.sorted_by.clone(),
                })
                .await?;
            fetched.data.clone()
        } else {
            view.data.clone()
        };

        *self.grid.selection().write() = items.clone();
        self.grid.notify_select(&items);
        Ok(())
    }

    /// Selects all when not everything is selected, unselects all otherwise.
    pub async fn select_or_unselect_all(&self) -> Result<()> {
        if self.is_all_selected() {
            self.unselect_all();
            Ok(())
        } else {
            self.select_all().await
        }
    }

    /// Clears the selection.
    ///
    /// Fires `on_unselect` with the removed items; an already-empty selection
    /// fires nothing.
    pub fn unselect_all(&self) {
        let removed = std::mem::take(&mut *self.grid.selection().write());
        if !removed.is_empty() {
            self.grid.notify_unselect(&removed);
        }
    }
}
